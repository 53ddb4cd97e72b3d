/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations. Users are
 * created lazily on first successful identity verification and are
 * never hard-deleted by any flow in this codebase.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID string)
    pub id: String,
    /// External identity subject (Google account id); unique when set
    pub external_id: Option<String>,
    /// Display name, refreshed on every login
    pub name: String,
    /// Verified email address (unique)
    pub email: String,
    /// Avatar URL, refreshed on every login
    pub photo: Option<String>,
    /// Dark mode display preference
    pub dark_mode: bool,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `external_id` - External identity subject, if this user arrived via a provider
/// * `name` - Display name
/// * `email` - Verified email
/// * `photo` - Avatar URL
pub async fn create_user(
    pool: &SqlitePool,
    external_id: Option<&str>,
    name: &str,
    email: &str,
    photo: Option<&str>,
) -> Result<User, sqlx::Error> {
    let id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, external_id, name, email, photo, dark_mode, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, 0, $6, $7)
        RETURNING id, external_id, name, email, photo, dark_mode, created_at, updated_at
        "#,
    )
    .bind(&id)
    .bind(external_id)
    .bind(name)
    .bind(email)
    .bind(photo)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by external identity subject
pub async fn get_user_by_external_id(
    pool: &SqlitePool,
    external_id: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, external_id, name, email, photo, dark_mode, created_at, updated_at
        FROM users
        WHERE external_id = $1
        "#,
    )
    .bind(external_id)
    .fetch_optional(pool)
    .await
}

/// Get user by email
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, external_id, name, email, photo, dark_mode, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, external_id, name, email, photo, dark_mode, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Refresh the profile fields a provider may change between logins
///
/// Optionally attaches the external identity subject, which is how an
/// email-matched account gets linked on first provider login.
pub async fn update_profile(
    pool: &SqlitePool,
    id: &str,
    external_id: Option<&str>,
    name: &str,
    photo: Option<&str>,
) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET external_id = COALESCE($2, external_id), name = $3, photo = $4, updated_at = $5
        WHERE id = $1
        RETURNING id, external_id, name, email, photo, dark_mode, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(external_id)
    .bind(name)
    .bind(photo)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Set the dark mode display preference
pub async fn set_dark_mode(
    pool: &SqlitePool,
    id: &str,
    dark_mode: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET dark_mode = $2 WHERE id = $1")
        .bind(id)
        .bind(dark_mode)
        .execute(pool)
        .await?;
    Ok(())
}
