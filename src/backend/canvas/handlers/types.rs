/**
 * Canvas Handler Types
 *
 * Request and response types for the canvas, node, and share endpoints.
 */

use serde::{Deserialize, Serialize};

use crate::backend::canvas::shares::ShareMode;
use crate::backend::canvas::store::Canvas;
use crate::shared::NodeData;

/// Create canvas request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CreateCanvasRequest {
    /// Optional name; defaulted and truncated to 100 chars server-side
    #[serde(default)]
    pub name: Option<String>,
}

/// Rename canvas request
#[derive(Deserialize, Serialize, Debug)]
pub struct RenameCanvasRequest {
    #[serde(default)]
    pub name: String,
}

/// Full node snapshot push
#[derive(Deserialize, Serialize, Debug)]
pub struct ReplaceNodesRequest {
    pub nodes: Vec<NodeData>,
}

/// Acknowledgement of a stored snapshot
#[derive(Serialize, Deserialize, Debug)]
pub struct SavedResponse {
    /// Number of nodes in the stored snapshot
    pub saved: usize,
}

/// Create share request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CreateShareRequest {
    /// Access level; omitted means view-only
    #[serde(default)]
    pub mode: Option<ShareMode>,
}

/// Canvas fields exposed to anonymous share visitors
///
/// Deliberately excludes the owner's user id; a share token grants
/// access to the content, not to who owns it.
#[derive(Serialize, Deserialize, Debug)]
pub struct SharedCanvasMeta {
    pub id: String,
    pub name: String,
}

impl From<Canvas> for SharedCanvasMeta {
    fn from(canvas: Canvas) -> Self {
        SharedCanvasMeta {
            id: canvas.id,
            name: canvas.name,
        }
    }
}

/// Response for a public shared-canvas read
#[derive(Serialize, Deserialize, Debug)]
pub struct SharedCanvasResponse {
    pub canvas: SharedCanvasMeta,
    pub nodes: Vec<NodeData>,
    pub mode: ShareMode,
}
