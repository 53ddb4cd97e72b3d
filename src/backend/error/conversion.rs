/**
 * Error Conversion
 *
 * This module converts `ApiError` into HTTP responses and provides the
 * `AppJson` extractor, which maps body deserialization failures to the
 * same 400 error shape instead of Axum's default 422 rejection.
 *
 * # Response Format
 *
 * All errors are returned as JSON:
 *
 * ```json
 * {
 *   "error": "Canvas not found."
 * }
 * ```
 */

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    response::{IntoResponse, Json, Response},
};
use serde::de::DeserializeOwned;

use crate::backend::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::debug!("request rejected ({}): {}", status, self);
        }

        let body = serde_json::json!({ "error": self.public_message() });
        (status, Json(body)).into_response()
    }
}

/// JSON body extractor with 400-on-malformed semantics
///
/// Wraps `axum::Json` so that an unparseable or invalid request body
/// (including a bad priority value) is reported as a `Validation`
/// error rather than Axum's default rejection.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(match rejection {
                JsonRejection::JsonDataError(e) => ApiError::validation(e.body_text()),
                JsonRejection::JsonSyntaxError(e) => ApiError::validation(e.body_text()),
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::validation("Expected application/json request body.")
                }
                other => ApiError::validation(other.body_text()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_error_response_shape() {
        let response = ApiError::not_found("Canvas not found.").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "Canvas not found.");
    }

    #[tokio::test]
    async fn test_internal_error_is_opaque() {
        let response = ApiError::Internal("secret detail".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "Internal server error.");
    }
}
