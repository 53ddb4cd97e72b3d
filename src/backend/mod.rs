//! Backend Module
//!
//! This module contains all server-side code for the TaskBoard
//! application: an Axum HTTP server over a SQLite store.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Identity resolution, JWT sessions, user store, auth handlers
//! - **`canvas`** - Canvas store, node snapshot store, share registry, handlers
//! - **`middleware`** - Bearer-token authentication middleware
//! - **`error`** - Backend error taxonomy
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── canvas/         - Canvas, node, and share stores + handlers
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! 1. The identity resolver exchanges a Google ID token for an internal
//!    user record, creating it lazily on first login.
//! 2. The session authority issues a signed, expiring bearer token.
//! 3. Every authenticated request passes through the auth middleware,
//!    which validates the token and re-loads the user row.
//! 4. Canvas, node, and share operations scope every query by the
//!    owning user id directly in the SQL, so ownership cannot be
//!    bypassed by a handler bug.
//! 5. Share tokens substitute for user identity on the public shared
//!    endpoints, with edit-mode gating for writes.
//!
//! # Error Handling
//!
//! All errors are converted to a JSON `{"error": ...}` body at the
//! request boundary via `ApiError`, with conventional status codes.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and user management
pub mod auth;

/// Canvas, node, and share stores and handlers
pub mod canvas;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

pub use error::ApiError;
pub use server::init::create_app;
