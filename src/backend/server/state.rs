/**
 * Application State Management
 *
 * This module defines the application state structure shared by every
 * handler: the SQLite pool and the identity verifier.
 *
 * # Thread Safety
 *
 * `SqlitePool` is internally reference-counted and the verifier sits
 * behind an `Arc<dyn IdentityVerifier>`, so `AppState` is cheap to
 * clone per request.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::identity::IdentityVerifier;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Verifier for external login credentials
    pub verifier: Arc<dyn IdentityVerifier>,
}

/// Allows handlers that only touch the database to extract the pool
/// directly with `State(SqlitePool)`.
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

impl FromRef<AppState> for Arc<dyn IdentityVerifier> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.verifier.clone()
    }
}

#[cfg(test)]
impl AppState {
    /// Fresh in-memory state accepting any login credential
    pub async fn for_tests() -> Self {
        use crate::backend::auth::identity::StaticVerifier;
        use crate::backend::server::config::connect_pool;

        let db = connect_pool("sqlite::memory:")
            .await
            .unwrap_or_else(|e| panic!("in-memory database: {e}"));

        AppState {
            db,
            verifier: Arc::new(StaticVerifier),
        }
    }
}
