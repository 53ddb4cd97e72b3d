/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header, re-loads the user row, and attaches it to the
 * request for handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::verify_token;
use crate::backend::auth::users::{self, User};
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the JWT token from the Authorization header
/// 2. Verifies the token signature and expiry
/// 3. Re-loads the user row, so a deleted account is rejected even
///    while its tokens are still formally valid
/// 4. Attaches the user to request extensions for use in handlers
///
/// Returns 401 Unauthorized if the token is missing or invalid.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!("Missing Authorization header");
            ApiError::unauthenticated("Authentication required.")
        })?;

    // Format: "Bearer <token>"
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::debug!("Invalid Authorization header format");
        ApiError::unauthenticated("Authentication required.")
    })?;

    let claims = verify_token(token).map_err(|e| {
        tracing::debug!("Invalid token: {:?}", e);
        ApiError::unauthenticated("Invalid or expired token.")
    })?;

    let user = users::get_user_by_id(&state.db, &claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::debug!("Token subject {} no longer exists", claims.sub);
            ApiError::unauthenticated("Invalid or expired token.")
        })?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Usable as a handler parameter on any route behind `auth_middleware`;
/// yields the full user row loaded by the middleware.
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<User>().cloned().ok_or_else(|| {
            tracing::warn!("User not found in request extensions");
            ApiError::unauthenticated("Authentication required.")
        })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use chrono::Utc;

    fn sample_user() -> User {
        User {
            id: "u-1".to_string(),
            external_id: Some("g-1".to_string()),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            photo: None,
            dark_mode: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_extractor_reads_user_from_extensions() {
        let mut request = Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();
        request.extensions_mut().insert(sample_user());

        let (mut parts, _) = request.into_parts();
        let state = AppState::for_tests().await;

        let AuthUser(user) = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_extractor_rejects_without_user() {
        let request = Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();

        let (mut parts, _) = request.into_parts();
        let state = AppState::for_tests().await;

        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
