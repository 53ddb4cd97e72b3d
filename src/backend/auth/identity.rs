/**
 * Identity Resolution
 *
 * This module exchanges an external identity assertion (a Google ID
 * token) for an internal user record.
 *
 * # Resolution Algorithm
 *
 * 1. Look up the user by external subject id; if found, refresh
 *    name/photo (providers may change these) and return it.
 * 2. Otherwise look up by verified email; if found, link the subject
 *    id to that record and refresh name/photo.
 * 3. Otherwise create a new user, and as a side effect create one
 *    default canvas for them.
 *
 * # Verification
 *
 * Token verification is behind the `IdentityVerifier` trait so the
 * HTTP handler can be exercised with a stub in tests. The production
 * implementation asks Google's tokeninfo endpoint and checks the
 * audience and email verification claims.
 */

use async_trait::async_trait;
use serde::Deserialize;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::backend::auth::users::{self, User};
use crate::backend::canvas::store;

/// Name given to the canvas created alongside a brand-new user
const DEFAULT_CANVAS_NAME: &str = "My Workspace";

/// Claims extracted from a verified external identity assertion
#[derive(Debug, Clone)]
pub struct IdentityClaims {
    /// Provider subject id (stable per account)
    pub subject: String,
    /// Verified email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Avatar URL
    pub picture: Option<String>,
}

/// Identity verification failures
///
/// Both variants are terminal for the request; there is nothing to
/// retry.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Signature/audience mismatch, expiry, or provider rejection
    #[error("invalid identity credential: {0}")]
    InvalidCredential(String),

    /// The assertion verified but lacks a required claim (verified email)
    #[error("missing required claim: {0}")]
    MissingClaim(&'static str),

    /// Could not reach the provider at all
    #[error("identity provider unreachable: {0}")]
    ProviderUnavailable(String),
}

/// Verifies an external identity assertion and extracts its claims
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, credential: &str) -> Result<IdentityClaims, IdentityError>;
}

/// Google tokeninfo response (fields arrive as strings)
#[derive(Debug, Deserialize)]
struct TokenInfo {
    sub: String,
    aud: String,
    email: Option<String>,
    #[serde(default)]
    email_verified: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

/// Production verifier backed by Google's tokeninfo endpoint
pub struct GoogleVerifier {
    http: reqwest::Client,
    client_id: String,
    endpoint: String,
}

impl GoogleVerifier {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: client_id.into(),
            endpoint: "https://oauth2.googleapis.com/tokeninfo".to_string(),
        }
    }
}

#[async_trait]
impl IdentityVerifier for GoogleVerifier {
    async fn verify(&self, credential: &str) -> Result<IdentityClaims, IdentityError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("id_token", credential)])
            .send()
            .await
            .map_err(|e| IdentityError::ProviderUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IdentityError::InvalidCredential(format!(
                "tokeninfo returned {}",
                response.status()
            )));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| IdentityError::InvalidCredential(e.to_string()))?;

        if info.aud != self.client_id {
            return Err(IdentityError::InvalidCredential(
                "audience mismatch".to_string(),
            ));
        }

        let email = match (info.email, info.email_verified.as_deref()) {
            (Some(email), Some("true")) => email,
            _ => return Err(IdentityError::MissingClaim("verified email")),
        };

        Ok(IdentityClaims {
            subject: info.sub,
            email,
            name: info.name.unwrap_or_else(|| "User".to_string()),
            picture: info.picture,
        })
    }
}

/// Verifier that accepts any non-empty credential with fixed claims
///
/// For local development without Google credentials, and for tests
/// exercising the HTTP surface. The credential string becomes the
/// subject, so distinct credentials act as distinct accounts.
pub struct StaticVerifier;

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn verify(&self, credential: &str) -> Result<IdentityClaims, IdentityError> {
        if credential.is_empty() {
            return Err(IdentityError::InvalidCredential("empty credential".to_string()));
        }

        Ok(IdentityClaims {
            subject: credential.to_string(),
            email: format!("{credential}@example.com"),
            name: format!("Dev {credential}"),
            picture: None,
        })
    }
}

/// Resolve verified claims to an internal user, creating one lazily
///
/// A brand-new user also gets one default canvas so their first load
/// is never empty.
pub async fn resolve_user(pool: &SqlitePool, claims: &IdentityClaims) -> Result<User, sqlx::Error> {
    if let Some(user) = users::get_user_by_external_id(pool, &claims.subject).await? {
        return users::update_profile(
            pool,
            &user.id,
            None,
            &claims.name,
            claims.picture.as_deref(),
        )
        .await;
    }

    if let Some(user) = users::get_user_by_email(pool, &claims.email).await? {
        // Account created before the provider link existed; attach it.
        return users::update_profile(
            pool,
            &user.id,
            Some(&claims.subject),
            &claims.name,
            claims.picture.as_deref(),
        )
        .await;
    }

    let user = users::create_user(
        pool,
        Some(&claims.subject),
        &claims.name,
        &claims.email,
        claims.picture.as_deref(),
    )
    .await?;

    store::create_canvas(pool, &user.id, Some(DEFAULT_CANVAS_NAME)).await?;

    tracing::info!("Created new user {} with default canvas", user.id);

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::connect_pool;

    fn claims(subject: &str, email: &str) -> IdentityClaims {
        IdentityClaims {
            subject: subject.to_string(),
            email: email.to_string(),
            name: "Ada".to_string(),
            picture: None,
        }
    }

    #[tokio::test]
    async fn test_first_login_creates_user_and_default_canvas() {
        let pool = connect_pool("sqlite::memory:").await.unwrap();

        let user = resolve_user(&pool, &claims("g-1", "ada@example.com"))
            .await
            .unwrap();

        let canvases = store::list_canvases(&pool, &user.id).await.unwrap();
        assert_eq!(canvases.len(), 1);
        assert_eq!(canvases[0].name, DEFAULT_CANVAS_NAME);
    }

    #[tokio::test]
    async fn test_second_login_creates_nothing_new() {
        let pool = connect_pool("sqlite::memory:").await.unwrap();

        let first = resolve_user(&pool, &claims("g-1", "ada@example.com"))
            .await
            .unwrap();
        let second = resolve_user(&pool, &claims("g-1", "ada@example.com"))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);

        let canvases = store::list_canvases(&pool, &first.id).await.unwrap();
        assert_eq!(canvases.len(), 1);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_login_refreshes_profile() {
        let pool = connect_pool("sqlite::memory:").await.unwrap();

        resolve_user(&pool, &claims("g-1", "ada@example.com"))
            .await
            .unwrap();

        let mut renamed = claims("g-1", "ada@example.com");
        renamed.name = "Ada Lovelace".to_string();
        renamed.picture = Some("http://a/p.png".to_string());

        let user = resolve_user(&pool, &renamed).await.unwrap();
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.photo.as_deref(), Some("http://a/p.png"));
    }

    #[tokio::test]
    async fn test_email_match_links_external_id() {
        let pool = connect_pool("sqlite::memory:").await.unwrap();

        let existing = users::create_user(&pool, None, "Ada", "ada@example.com", None)
            .await
            .unwrap();

        let user = resolve_user(&pool, &claims("g-9", "ada@example.com"))
            .await
            .unwrap();
        assert_eq!(user.id, existing.id);
        assert_eq!(user.external_id.as_deref(), Some("g-9"));

        // Linking is not a first login; no extra default canvas appears.
        let canvases = store::list_canvases(&pool, &user.id).await.unwrap();
        assert!(canvases.is_empty());
    }
}
