/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * the public and protected route sets into a single Axum router.
 *
 * # Route Order
 *
 * The shared-canvas routes use a literal `shared` path segment under
 * `/api/canvases/`, which the router matches ahead of the `{id}`
 * parameter of the owner-scoped routes.
 */

use axum::middleware::from_fn_with_state;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::backend::middleware::auth::auth_middleware;
use crate::backend::routes::api_routes::{protected_routes, public_routes};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// Protected routes sit behind the authentication middleware; public
/// routes (login, shared-canvas access) do not. CORS is permissive
/// since the share links are meant to be opened from anywhere.
pub fn create_router(app_state: AppState) -> Router {
    let protected =
        protected_routes().layer(from_fn_with_state(app_state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes())
        .merge(protected)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
