/**
 * Canvas Model and Database Operations
 *
 * This module owns canvas records. Every canvas has exactly one owner;
 * all owner-scoped operations put the ownership predicate directly in
 * the SQL (`WHERE id = ? AND user_id = ?`) so a logic bug elsewhere
 * cannot bypass it. An ownership mismatch and a nonexistent id are
 * indistinguishable to callers; both read as "not there".
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Maximum stored canvas name length, in characters
pub const MAX_NAME_CHARS: usize = 100;

/// Name applied when a canvas is created without one
const DEFAULT_NAME: &str = "New Canvas";

/// Canvas struct representing a canvas in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    /// Unique canvas ID (UUID string)
    pub id: String,
    /// Owning user ID
    pub user_id: String,
    /// Display name (≤100 chars)
    pub name: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp; bumped whenever the node set changes
    pub updated_at: DateTime<Utc>,
}

/// Truncate a name to the stored limit, on a character boundary.
fn clamp_name(name: &str) -> String {
    name.chars().take(MAX_NAME_CHARS).collect()
}

/// List a user's canvases, most recently updated first
pub async fn list_canvases(pool: &SqlitePool, user_id: &str) -> Result<Vec<Canvas>, sqlx::Error> {
    sqlx::query_as::<_, Canvas>(
        r#"
        SELECT id, user_id, name, created_at, updated_at
        FROM canvases
        WHERE user_id = $1
        ORDER BY updated_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Create a canvas for a user
///
/// A missing or empty name falls back to the default; names longer
/// than 100 characters are stored truncated.
pub async fn create_canvas(
    pool: &SqlitePool,
    user_id: &str,
    name: Option<&str>,
) -> Result<Canvas, sqlx::Error> {
    let id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now();
    let name = match name {
        Some(n) if !n.is_empty() => clamp_name(n),
        _ => DEFAULT_NAME.to_string(),
    };

    sqlx::query_as::<_, Canvas>(
        r#"
        INSERT INTO canvases (id, user_id, name, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, name, created_at, updated_at
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(&name)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get a canvas by id, scoped to its owner
pub async fn get_canvas_for_user(
    pool: &SqlitePool,
    canvas_id: &str,
    user_id: &str,
) -> Result<Option<Canvas>, sqlx::Error> {
    sqlx::query_as::<_, Canvas>(
        r#"
        SELECT id, user_id, name, created_at, updated_at
        FROM canvases
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(canvas_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Get a canvas by id regardless of owner (share-token resolution only)
pub async fn get_canvas(pool: &SqlitePool, canvas_id: &str) -> Result<Option<Canvas>, sqlx::Error> {
    sqlx::query_as::<_, Canvas>(
        r#"
        SELECT id, user_id, name, created_at, updated_at
        FROM canvases
        WHERE id = $1
        "#,
    )
    .bind(canvas_id)
    .fetch_optional(pool)
    .await
}

/// Rename a canvas, scoped to its owner
///
/// Returns `None` when the canvas does not exist or is not owned by
/// `user_id`. Names are truncated to 100 characters; empty names must
/// be rejected by the caller before reaching here.
pub async fn rename_canvas(
    pool: &SqlitePool,
    canvas_id: &str,
    user_id: &str,
    name: &str,
) -> Result<Option<Canvas>, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Canvas>(
        r#"
        UPDATE canvases
        SET name = $3, updated_at = $4
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, name, created_at, updated_at
        "#,
    )
    .bind(canvas_id)
    .bind(user_id)
    .bind(clamp_name(name))
    .bind(now)
    .fetch_optional(pool)
    .await
}

/// Delete a canvas, scoped to its owner
///
/// Foreign keys cascade the delete to the canvas's nodes and shares.
/// Returns whether a row was actually removed.
pub async fn delete_canvas(
    pool: &SqlitePool,
    canvas_id: &str,
    user_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM canvases WHERE id = $1 AND user_id = $2")
        .bind(canvas_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Bump a canvas's updated_at, called after a node snapshot replace
pub async fn touch_canvas(pool: &SqlitePool, canvas_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE canvases SET updated_at = $2 WHERE id = $1")
        .bind(canvas_id)
        .bind(Utc::now())
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::create_user;
    use crate::backend::server::config::connect_pool;

    async fn pool_with_user() -> (SqlitePool, String) {
        let pool = connect_pool("sqlite::memory:").await.unwrap();
        let user = create_user(&pool, None, "Ada", "ada@example.com", None)
            .await
            .unwrap();
        (pool, user.id)
    }

    #[tokio::test]
    async fn test_create_defaults_name() {
        let (pool, user_id) = pool_with_user().await;

        let canvas = create_canvas(&pool, &user_id, None).await.unwrap();
        assert_eq!(canvas.name, "New Canvas");

        let canvas = create_canvas(&pool, &user_id, Some("")).await.unwrap();
        assert_eq!(canvas.name, "New Canvas");
    }

    #[tokio::test]
    async fn test_create_truncates_long_name() {
        let (pool, user_id) = pool_with_user().await;

        let long = "x".repeat(150);
        let canvas = create_canvas(&pool, &user_id, Some(&long)).await.unwrap();
        assert_eq!(canvas.name.chars().count(), 100);
    }

    #[tokio::test]
    async fn test_list_orders_by_recent_update() {
        let (pool, user_id) = pool_with_user().await;

        let first = create_canvas(&pool, &user_id, Some("First")).await.unwrap();
        let _second = create_canvas(&pool, &user_id, Some("Second")).await.unwrap();

        // Touching the older canvas moves it to the front.
        touch_canvas(&pool, &first.id).await.unwrap();

        let list = list_canvases(&pool, &user_id).await.unwrap();
        assert_eq!(list[0].name, "First");
    }

    #[tokio::test]
    async fn test_rename_scoped_to_owner() {
        let (pool, user_id) = pool_with_user().await;
        let other = create_user(&pool, None, "Eve", "eve@example.com", None)
            .await
            .unwrap();

        let canvas = create_canvas(&pool, &user_id, Some("Mine")).await.unwrap();

        let denied = rename_canvas(&pool, &canvas.id, &other.id, "Stolen")
            .await
            .unwrap();
        assert!(denied.is_none());

        let renamed = rename_canvas(&pool, &canvas.id, &user_id, "Work")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "Work");
    }

    #[tokio::test]
    async fn test_delete_scoped_to_owner() {
        let (pool, user_id) = pool_with_user().await;
        let other = create_user(&pool, None, "Eve", "eve@example.com", None)
            .await
            .unwrap();

        let canvas = create_canvas(&pool, &user_id, None).await.unwrap();

        assert!(!delete_canvas(&pool, &canvas.id, &other.id).await.unwrap());
        assert!(delete_canvas(&pool, &canvas.id, &user_id).await.unwrap());
        assert!(get_canvas(&pool, &canvas.id).await.unwrap().is_none());
    }
}
