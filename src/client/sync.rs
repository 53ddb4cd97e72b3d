/**
 * Server Sync Client
 *
 * Thin HTTP client for the node-sync endpoints. The protocol is full
 * snapshots in both directions: the client pulls the complete node set
 * on load and pushes the complete node set on save. There is no
 * per-node patching and no merge; the server keeps whatever arrived
 * last.
 *
 * Authenticated calls carry a bearer token; shared-canvas calls carry
 * the share token in the URL instead.
 */

use serde::Deserialize;
use thiserror::Error;

use crate::shared::NodeData;

/// Sync failures surfaced to the autosave status line
#[derive(Debug, Error)]
pub enum SyncError {
    /// Transport-level failure (DNS, refused connection, timeout)
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error body
    #[error("{message}")]
    Api { status: u16, message: String },
}

/// Error body shape used by every server endpoint
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Saved acknowledgement from a snapshot push
#[derive(Debug, Deserialize)]
pub struct SaveAck {
    pub saved: usize,
}

/// A shared canvas as served to anonymous visitors
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedCanvas {
    pub canvas: SharedCanvasMeta,
    pub nodes: Vec<NodeData>,
    pub mode: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedCanvasMeta {
    pub id: String,
    pub name: String,
}

/// HTTP client for the sync endpoints
pub struct SyncClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl SyncClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        SyncClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach the session token used for authenticated calls
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Decode a response, turning error bodies into `SyncError::Api`
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SyncError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("request failed with status {status}"),
        };
        Err(SyncError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Pull the full node snapshot of an owned canvas
    pub async fn load_nodes(&self, canvas_id: &str) -> Result<Vec<NodeData>, SyncError> {
        let url = self.url(&format!("/api/canvases/{canvas_id}/nodes"));
        let response = self.authorize(self.http.get(url)).send().await?;
        Self::decode(response).await
    }

    /// Push the full node snapshot of an owned canvas
    pub async fn push_nodes(
        &self,
        canvas_id: &str,
        nodes: &[NodeData],
    ) -> Result<SaveAck, SyncError> {
        let url = self.url(&format!("/api/canvases/{canvas_id}/nodes"));
        let response = self
            .authorize(self.http.put(url))
            .json(&serde_json::json!({ "nodes": nodes }))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Pull a shared canvas through its share token
    pub async fn load_shared(&self, token: &str) -> Result<SharedCanvas, SyncError> {
        let url = self.url(&format!("/api/canvases/shared/{token}"));
        let response = self.http.get(url).send().await?;
        Self::decode(response).await
    }

    /// Push a snapshot through an edit share token
    pub async fn push_shared(
        &self,
        token: &str,
        nodes: &[NodeData],
    ) -> Result<SaveAck, SyncError> {
        let url = self.url(&format!("/api/canvases/shared/{token}/nodes"));
        let response = self
            .http
            .put(url)
            .json(&serde_json::json!({ "nodes": nodes }))
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = SyncClient::new("http://localhost:3001/");
        assert_eq!(
            client.url("/api/canvases/c1/nodes"),
            "http://localhost:3001/api/canvases/c1/nodes"
        );
    }

    #[test]
    fn test_shared_canvas_decodes_wire_shape() {
        let body = serde_json::json!({
            "canvas": { "id": "c1", "name": "Work" },
            "nodes": [{ "id": "n1", "title": "Task", "x": 1.0, "y": 2.0,
                        "priority": "high", "completed": false,
                        "parentId": null, "dueDate": null }],
            "mode": "view"
        });

        let shared: SharedCanvas = serde_json::from_value(body).unwrap();
        assert_eq!(shared.canvas.name, "Work");
        assert_eq!(shared.nodes.len(), 1);
        assert_eq!(shared.mode, "view");
    }
}
