/**
 * API Route Handlers
 *
 * This module wires the API endpoints to their handlers, split into a
 * public set and a set behind the authentication middleware.
 *
 * # Routes
 *
 * ## Public
 * - `POST /api/auth/google` - exchange a Google credential for a session
 * - `GET /api/canvases/shared/{token}` - read a shared canvas
 * - `PUT /api/canvases/shared/{token}/nodes` - write through an edit share
 *
 * ## Protected (Bearer token required)
 * - `GET /api/auth/me` - current user
 * - `PATCH /api/auth/me/darkmode` - toggle dark mode
 * - `POST /api/auth/logout` - end session (client-side discard)
 * - `GET|POST /api/canvases` - list / create canvases
 * - `PATCH|DELETE /api/canvases/{id}` - rename / delete
 * - `GET|PUT /api/canvases/{id}/nodes` - read / replace node snapshot
 * - `GET|POST /api/canvases/{id}/shares` - list / mint share links
 * - `DELETE /api/canvases/{id}/shares/{share_id}` - revoke a share link
 */

use axum::routing::{delete, get, patch, post, put};
use axum::Router;

use crate::backend::auth::handlers::google::google_login;
use crate::backend::auth::handlers::me::{get_me, logout, set_dark_mode};
use crate::backend::canvas::handlers::{canvases, nodes, shared, shares};
use crate::backend::server::state::AppState;

/// Routes reachable without a session
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/google", post(google_login))
        .route("/api/canvases/shared/{token}", get(shared::get_shared_canvas))
        .route(
            "/api/canvases/shared/{token}/nodes",
            put(shared::replace_shared_nodes),
        )
}

/// Routes requiring an authenticated user
///
/// The caller applies the auth middleware; these definitions only
/// declare the paths.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/auth/me/darkmode", patch(set_dark_mode))
        .route("/api/auth/logout", post(logout))
        .route(
            "/api/canvases",
            get(canvases::list_canvases).post(canvases::create_canvas),
        )
        .route(
            "/api/canvases/{id}",
            patch(canvases::rename_canvas).delete(canvases::delete_canvas),
        )
        .route(
            "/api/canvases/{id}/nodes",
            get(nodes::get_nodes).put(nodes::replace_nodes),
        )
        .route(
            "/api/canvases/{id}/shares",
            get(shares::list_shares).post(shares::create_share),
        )
        .route(
            "/api/canvases/{id}/shares/{share_id}",
            delete(shares::revoke_share),
        )
}
