/**
 * Google Login Handler
 *
 * This module implements the handler for POST /api/auth/google.
 *
 * # Authentication Process
 *
 * 1. The frontend obtains a Google ID token (JWT) from Google Identity
 *    Services and posts it here as `credential`.
 * 2. The token is verified against Google (audience, expiry, verified
 *    email).
 * 3. The verified claims are resolved to an internal user, creating
 *    the user and a default canvas on first login.
 * 4. A session token is issued and returned together with the profile.
 *
 * # Security
 *
 * - An unverifiable Google token returns 401
 * - A verified token without a verified email returns 400
 * - The session token embeds only id/email/name, never the Google token
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, GoogleLoginRequest, UserResponse};
use crate::backend::auth::identity::{self, IdentityError};
use crate::backend::auth::sessions::create_token;
use crate::backend::error::{ApiError, AppJson};
use crate::backend::server::state::AppState;

/// Google login handler
///
/// # Errors
///
/// * `400 Bad Request` - missing credential, or no verified email claim
/// * `401 Unauthorized` - the Google token does not verify
/// * `500 Internal Server Error` - storage or token signing failure
pub async fn google_login(
    State(state): State<AppState>,
    AppJson(request): AppJson<GoogleLoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if request.credential.is_empty() {
        return Err(ApiError::validation("credential is required."));
    }

    let claims = state
        .verifier
        .verify(&request.credential)
        .await
        .map_err(|e| match e {
            IdentityError::MissingClaim(claim) => {
                ApiError::validation(format!("Missing required claim: {}.", claim))
            }
            IdentityError::InvalidCredential(_) => {
                tracing::warn!("Google credential rejected: {}", e);
                ApiError::unauthenticated("Invalid Google credential.")
            }
            IdentityError::ProviderUnavailable(_) => {
                tracing::error!("Identity provider unreachable: {}", e);
                ApiError::Internal(e.to_string())
            }
        })?;

    let user = identity::resolve_user(&state.db, &claims).await?;

    let token = create_token(&user).map_err(|e| {
        tracing::error!("Failed to sign session token: {:?}", e);
        ApiError::Internal(e.to_string())
    })?;

    tracing::info!("User logged in: {} ({})", user.name, user.email);

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(&user),
    }))
}
