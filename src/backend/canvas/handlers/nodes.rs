/**
 * Node Snapshot Handlers
 *
 * Owner-scoped read and replace of a canvas's node set:
 *
 * - `GET /api/canvases/{id}/nodes` - full snapshot read
 * - `PUT /api/canvases/{id}/nodes` - full snapshot replace
 *
 * A successful replace also bumps the canvas's updated_at so the canvas
 * list reflects recent editing activity.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::canvas::handlers::types::{ReplaceNodesRequest, SavedResponse};
use crate::backend::canvas::{nodes, store};
use crate::backend::error::{ApiError, AppJson};
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::NodeData;

/// Read the full node snapshot of an owned canvas
pub async fn get_nodes(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(canvas_id): Path<String>,
) -> Result<Json<Vec<NodeData>>, ApiError> {
    store::get_canvas_for_user(&state.db, &canvas_id, &user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Canvas not found."))?;

    let nodes = nodes::find_by_canvas(&state.db, &canvas_id).await?;
    Ok(Json(nodes))
}

/// Replace the full node snapshot of an owned canvas
pub async fn replace_nodes(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(canvas_id): Path<String>,
    AppJson(request): AppJson<ReplaceNodesRequest>,
) -> Result<Json<SavedResponse>, ApiError> {
    store::get_canvas_for_user(&state.db, &canvas_id, &user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Canvas not found."))?;

    nodes::validate_snapshot(&request.nodes)
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let saved = nodes::replace_all(&state.db, &canvas_id, &request.nodes).await?;
    store::touch_canvas(&state.db, &canvas_id).await?;

    tracing::debug!("Canvas {} snapshot replaced ({} nodes)", canvas_id, saved);

    Ok(Json(SavedResponse { saved }))
}
