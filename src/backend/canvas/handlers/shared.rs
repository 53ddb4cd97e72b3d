/**
 * Anonymous Share Access Handlers
 *
 * Public endpoints reached with a share token instead of a session:
 *
 * - `GET /api/canvases/shared/{token}` - read canvas + nodes + mode
 * - `PUT /api/canvases/shared/{token}/nodes` - replace nodes (edit only)
 *
 * The token is the whole authorization. A revoked or unknown token is a
 * 404; a view token used for writing is a 403.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::canvas::handlers::types::{
    ReplaceNodesRequest, SavedResponse, SharedCanvasResponse,
};
use crate::backend::canvas::shares::{self, Share, ShareMode};
use crate::backend::canvas::{nodes, store};
use crate::backend::error::{ApiError, AppJson};
use crate::backend::server::state::AppState;

/// Resolve a token to its share, treating unknown tokens as missing
async fn resolve_share(state: &AppState, token: &str) -> Result<Share, ApiError> {
    shares::find_by_token(&state.db, token)
        .await?
        .ok_or_else(|| ApiError::not_found("Share not found."))
}

/// Read a shared canvas through its token
pub async fn get_shared_canvas(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<SharedCanvasResponse>, ApiError> {
    let share = resolve_share(&state, &token).await?;

    // The canvas row can only be gone if a delete raced the share
    // lookup; treat that the same as a revoked token.
    let canvas = store::get_canvas(&state.db, &share.canvas_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Share not found."))?;
    let nodes = nodes::find_by_canvas(&state.db, &share.canvas_id).await?;

    Ok(Json(SharedCanvasResponse {
        canvas: canvas.into(),
        nodes,
        mode: share.mode,
    }))
}

/// Replace a shared canvas's nodes through an edit token
pub async fn replace_shared_nodes(
    State(state): State<AppState>,
    Path(token): Path<String>,
    AppJson(request): AppJson<ReplaceNodesRequest>,
) -> Result<Json<SavedResponse>, ApiError> {
    let share = resolve_share(&state, &token).await?;

    if share.mode != ShareMode::Edit {
        return Err(ApiError::forbidden("This share link is view-only."));
    }

    nodes::validate_snapshot(&request.nodes)
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let saved = nodes::replace_all(&state.db, &share.canvas_id, &request.nodes).await?;
    store::touch_canvas(&state.db, &share.canvas_id).await?;

    Ok(Json(SavedResponse { saved }))
}
