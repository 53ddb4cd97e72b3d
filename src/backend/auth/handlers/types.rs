/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by the
 * authentication handlers.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;

/// Google login request
///
/// Carries the ID token issued to the browser by Google.
#[derive(Deserialize, Serialize, Debug)]
pub struct GoogleLoginRequest {
    /// Google ID token (JWT) to verify
    #[serde(default)]
    pub credential: String,
}

/// Auth response
///
/// Returned by the login handler. Contains the session token and user
/// information for immediate display.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// Signed session token (7-day expiration)
    pub token: String,
    /// User information (no internal fields)
    pub user: UserResponse,
}

/// User response (public profile fields only)
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User's unique ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Avatar URL
    pub photo: Option<String>,
    /// Dark mode display preference
    pub dark_mode: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            photo: user.photo.clone(),
            dark_mode: user.dark_mode,
        }
    }
}

/// Dark mode preference request
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DarkModeRequest {
    pub dark_mode: bool,
}

/// Dark mode preference response
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DarkModeResponse {
    pub dark_mode: bool,
}

/// Plain acknowledgement response
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}
