/**
 * Server Configuration
 *
 * This module handles loading of server configuration: the SQLite
 * database pool and the Google OAuth client id.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables, with sensible
 * defaults for local development:
 *
 * - `DATABASE_URL` - SQLite connection string (default `sqlite:taskboard.db`)
 * - `GOOGLE_CLIENT_ID` - OAuth client id; when unset, login falls back
 *   to a static verifier that accepts any credential (development only)
 * - `SERVER_PORT` - listen port (default 3001)
 */

use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::backend::auth::identity::{GoogleVerifier, IdentityVerifier, StaticVerifier};

/// Default SQLite database file for local development
const DEFAULT_DATABASE_URL: &str = "sqlite:taskboard.db";

/// Default listen port
pub const DEFAULT_PORT: u16 = 3001;

/// Connect to a SQLite database and bring the schema up to date
///
/// Foreign key enforcement is switched on for every connection; the
/// cascade behavior of canvas and node deletes depends on it. An
/// in-memory url gets a single-connection pool, since each pooled
/// connection would otherwise see its own empty database.
pub async fn connect_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = database_url.contains(":memory:");

    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let max_connections = if in_memory { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

/// Load the database pool from the environment
pub async fn load_database() -> Result<SqlitePool, sqlx::Error> {
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    tracing::info!("Connecting to database at {}", database_url);

    let pool = connect_pool(&database_url).await?;

    tracing::info!("Database ready");

    Ok(pool)
}

/// Load the identity verifier from the environment
///
/// Without `GOOGLE_CLIENT_ID`, login accepts any credential; fine for
/// local development, never for a deployed server.
pub fn load_verifier() -> Arc<dyn IdentityVerifier> {
    match std::env::var("GOOGLE_CLIENT_ID") {
        Ok(client_id) if !client_id.is_empty() => {
            tracing::info!("Google token verification enabled");
            Arc::new(GoogleVerifier::new(client_id))
        }
        _ => {
            tracing::warn!("GOOGLE_CLIENT_ID not set; accepting any login credential");
            Arc::new(StaticVerifier)
        }
    }
}

/// Load the listen port from the environment
pub fn load_port() -> u16 {
    std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_pool_keeps_schema_across_queries() {
        let pool = connect_pool("sqlite::memory:").await.unwrap();

        // Two sequential queries must hit the same migrated database.
        for _ in 0..2 {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(&pool)
                .await
                .unwrap();
            assert_eq!(count, 0);
        }
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let pool = connect_pool("sqlite::memory:").await.unwrap();

        let result = sqlx::query(
            "INSERT INTO canvases (id, user_id, name, created_at, updated_at)
             VALUES ('c1', 'no-such-user', 'X', datetime('now'), datetime('now'))",
        )
        .execute(&pool)
        .await;

        assert!(result.is_err());
    }
}
