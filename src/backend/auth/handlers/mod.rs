//! Authentication HTTP Handlers
//!
//! ```text
//! handlers/
//! ├── mod.rs    - Handler exports
//! ├── types.rs  - Request/response types
//! ├── google.rs - Google ID-token login handler
//! └── me.rs     - Profile, dark mode, and logout handlers
//! ```

/// Request/response types
pub mod types;

/// Google ID-token login handler
pub mod google;

/// Profile, preference, and logout handlers
pub mod me;

pub use google::google_login;
pub use me::{get_me, logout, set_dark_mode};
