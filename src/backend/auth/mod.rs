//! Authentication Module
//!
//! This module handles identity resolution, session management, and
//! the user store.
//!
//! # Architecture
//!
//! - **`identity`** - External identity verification and lazy user creation
//! - **`users`** - User model and database operations
//! - **`sessions`** - JWT token generation and validation
//! - **`handlers`** - HTTP handlers for the auth endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── identity.rs     - Identity verifier trait + user resolution
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Login**: Google ID token verified → user resolved (created on
//!    first login, with one default canvas) → session token returned
//! 2. **Authenticated request**: bearer token verified, user row
//!    re-loaded (a token for a deleted user is rejected)
//! 3. **Logout**: client-side token discard only
//!
//! # Security
//!
//! - Session tokens are HS256 JWTs with a 7-day expiry
//! - Invalid credentials return 401 with no information leakage
//! - The Google token itself is never stored or re-issued

/// External identity verification and user resolution
pub mod identity;

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, GoogleLoginRequest, UserResponse};
pub use handlers::{get_me, google_login, logout, set_dark_mode};
pub use identity::{GoogleVerifier, IdentityClaims, IdentityError, IdentityVerifier};
pub use users::User;
