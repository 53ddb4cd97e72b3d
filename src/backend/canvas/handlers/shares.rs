/**
 * Share Management Handlers
 *
 * Owner-scoped management of a canvas's share links:
 *
 * - `GET /api/canvases/{id}/shares` - list active links
 * - `POST /api/canvases/{id}/shares` - mint a new link (201)
 * - `DELETE /api/canvases/{id}/shares/{share_id}` - revoke a link
 *
 * Anonymous consumption of the minted tokens lives in `shared.rs`.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::canvas::handlers::types::CreateShareRequest;
use crate::backend::canvas::shares::{self, Share};
use crate::backend::canvas::store;
use crate::backend::error::{ApiError, AppJson};
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

/// List the share links of an owned canvas
pub async fn list_shares(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(canvas_id): Path<String>,
) -> Result<Json<Vec<Share>>, ApiError> {
    store::get_canvas_for_user(&state.db, &canvas_id, &user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Canvas not found."))?;

    let shares = shares::list_shares(&state.db, &canvas_id).await?;
    Ok(Json(shares))
}

/// Mint a share link for an owned canvas
pub async fn create_share(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(canvas_id): Path<String>,
    AppJson(request): AppJson<CreateShareRequest>,
) -> Result<(StatusCode, Json<Share>), ApiError> {
    store::get_canvas_for_user(&state.db, &canvas_id, &user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Canvas not found."))?;

    let mode = request.mode.unwrap_or_default();
    let share = shares::create_share(&state.db, &canvas_id, mode).await?;

    tracing::debug!(
        "Share {} minted for canvas {} ({})",
        share.id,
        canvas_id,
        mode.as_str()
    );

    Ok((StatusCode::CREATED, Json(share)))
}

/// Revoke a share link of an owned canvas
pub async fn revoke_share(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((canvas_id, share_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    store::get_canvas_for_user(&state.db, &canvas_id, &user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Canvas not found."))?;

    let revoked = shares::revoke_share(&state.db, &canvas_id, &share_id).await?;
    if !revoked {
        return Err(ApiError::not_found("Share not found."));
    }

    Ok(Json(MessageResponse {
        message: "Share revoked.".to_string(),
    }))
}
