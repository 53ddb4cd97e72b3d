/**
 * Canvas CRUD Handlers
 *
 * Handlers for the owner-scoped canvas endpoints:
 *
 * - `GET /api/canvases` - list the caller's canvases, most recent first
 * - `POST /api/canvases` - create a canvas (201)
 * - `PATCH /api/canvases/{id}` - rename
 * - `DELETE /api/canvases/{id}` - delete (cascades to nodes and shares)
 *
 * A canvas that does not exist and a canvas owned by someone else both
 * answer 404; existence is never revealed to non-owners.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::canvas::handlers::types::{CreateCanvasRequest, RenameCanvasRequest};
use crate::backend::canvas::store::{self, Canvas};
use crate::backend::error::{ApiError, AppJson};
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

/// List the caller's canvases
pub async fn list_canvases(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Canvas>>, ApiError> {
    let canvases = store::list_canvases(&state.db, &user.id).await?;
    Ok(Json(canvases))
}

/// Create a canvas
pub async fn create_canvas(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(request): AppJson<CreateCanvasRequest>,
) -> Result<(StatusCode, Json<Canvas>), ApiError> {
    let canvas = store::create_canvas(&state.db, &user.id, request.name.as_deref()).await?;

    tracing::debug!("Canvas {} created for user {}", canvas.id, user.id);

    Ok((StatusCode::CREATED, Json(canvas)))
}

/// Rename a canvas
pub async fn rename_canvas(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(canvas_id): Path<String>,
    AppJson(request): AppJson<RenameCanvasRequest>,
) -> Result<Json<Canvas>, ApiError> {
    if request.name.is_empty() {
        return Err(ApiError::validation("Name is required."));
    }

    let canvas = store::rename_canvas(&state.db, &canvas_id, &user.id, &request.name)
        .await?
        .ok_or_else(|| ApiError::not_found("Canvas not found."))?;

    Ok(Json(canvas))
}

/// Delete a canvas
///
/// Foreign keys cascade the delete to all of the canvas's nodes and
/// share links.
pub async fn delete_canvas(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(canvas_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = store::delete_canvas(&state.db, &canvas_id, &user.id).await?;
    if !deleted {
        return Err(ApiError::not_found("Canvas not found."));
    }

    Ok(Json(MessageResponse {
        message: "Canvas deleted.".to_string(),
    }))
}
