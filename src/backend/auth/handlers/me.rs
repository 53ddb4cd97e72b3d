/**
 * Current User Handlers
 *
 * Handlers for the authenticated profile endpoints:
 *
 * - `GET /api/auth/me` - return the current user's profile
 * - `PATCH /api/auth/me/darkmode` - store the dark mode preference
 * - `POST /api/auth/logout` - acknowledge logout (stateless tokens;
 *   the client simply discards its token)
 *
 * All three run behind the auth middleware, which has already loaded
 * the user row for the request.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{
    DarkModeRequest, DarkModeResponse, MessageResponse, UserResponse,
};
use crate::backend::auth::users;
use crate::backend::error::{ApiError, AppJson};
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

/// Get current user handler
pub async fn get_me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

/// Store the dark mode display preference
pub async fn set_dark_mode(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(request): AppJson<DarkModeRequest>,
) -> Result<Json<DarkModeResponse>, ApiError> {
    users::set_dark_mode(&state.db, &user.id, request.dark_mode).await?;

    Ok(Json(DarkModeResponse {
        dark_mode: request.dark_mode,
    }))
}

/// Logout handler
///
/// Session tokens are stateless; there is no server-side revocation
/// list, so this only acknowledges. Invalidation happens client-side
/// by discarding the token.
pub async fn logout(AuthUser(user): AuthUser) -> Json<MessageResponse> {
    tracing::debug!("User logged out: {}", user.id);
    Json(MessageResponse {
        message: "Logged out.".to_string(),
    })
}
