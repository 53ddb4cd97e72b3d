/**
 * Backend Error Types
 *
 * This module defines the error type used across HTTP handlers. Every
 * handler returns `Result<_, ApiError>`, and the error is converted to
 * a JSON response at the request boundary.
 *
 * # Error Categories
 *
 * - `Validation` - bad request bodies, invalid enum values, empty names
 * - `Unauthenticated` - missing/expired/invalid bearer credentials
 * - `Forbidden` - a valid principal attempting an operation its mode
 *   does not permit (a view-only share pushing nodes)
 * - `NotFound` - a resource that is absent or not owned by the caller;
 *   the two cases are deliberately indistinguishable
 * - `Database` / `Internal` - unexpected failures, surfaced as 500
 *   with no internal detail exposed
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Backend error taxonomy
///
/// Each variant maps to one HTTP status code. Construction helpers keep
/// handler code terse.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing required field, bad enum value
    #[error("{0}")]
    Validation(String),

    /// Missing, expired, or unverifiable credential
    #[error("{0}")]
    Unauthenticated(String),

    /// Valid identity, insufficient mode for the operation
    #[error("{0}")]
    Forbidden(String),

    /// Resource absent or not owned by the caller
    #[error("{0}")]
    NotFound(String),

    /// Storage failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other unexpected failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// The HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message exposed to the caller
    ///
    /// Internal failures collapse to a generic message; the real cause
    /// is only logged server-side.
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "Internal server error.".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthenticated("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::forbidden("view only").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::not_found("gone").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let err = ApiError::Internal("connection pool exhausted".into());
        assert_eq!(err.public_message(), "Internal server error.");

        let err = ApiError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.public_message(), "Internal server error.");
    }

    #[test]
    fn test_client_errors_keep_message() {
        let err = ApiError::validation("name is required");
        assert_eq!(err.public_message(), "name is required");
    }
}
