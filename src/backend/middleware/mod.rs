//! Middleware Module
//!
//! HTTP middleware applied before requests reach handlers. Currently:
//!
//! - **`auth`** - JWT verification and user loading for protected routes

pub mod auth;

pub use auth::{auth_middleware, AuthUser};
