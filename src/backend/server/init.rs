/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server: loading configuration, building state, and assembling the
 * router.
 *
 * # Initialization Process
 *
 * 1. Connect the database pool and run migrations
 * 2. Build the identity verifier from configuration
 * 3. Create the router with all routes and middleware
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, load_verifier};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application from the environment
///
/// # Errors
///
/// Fails if the database cannot be opened or migrated; the server has
/// nothing useful to do without storage.
pub async fn create_app() -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing task board server");

    let db = load_database().await?;
    let verifier = load_verifier();

    let app_state = AppState { db, verifier };

    Ok(create_router(app_state))
}
