//! Backend Error Module
//!
//! This module defines the error taxonomy used by every HTTP handler
//! and the conversion of those errors into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse conversion and AppJson extractor
//! ```
//!
//! # Taxonomy
//!
//! - `Validation` → 400 (malformed or missing fields, bad enum values)
//! - `Unauthenticated` → 401 (missing, expired, or invalid credential)
//! - `Forbidden` → 403 (valid identity, wrong mode: e.g. edit on a
//!   view-only share)
//! - `NotFound` → 404 (absent OR not owned by the caller; the two are
//!   merged so ownership is never leaked)
//! - `Database` / `Internal` → 500 with a generic message; detail is
//!   logged server-side only

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use conversion::AppJson;
pub use types::ApiError;
