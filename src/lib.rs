//! TaskBoard - Main Library
//!
//! TaskBoard is a multi-user visual task board: users authenticate with
//! an external identity provider, own one or more canvases, and each
//! canvas holds a tree of draggable task nodes with priority,
//! completion, and due-date attributes. Canvases can be shared via
//! tokenized links with view or edit access.
//!
//! # Module Structure
//!
//! The library is organized into three main modules:
//!
//! - **`shared`** - Types shared between backend and client
//!   - Node wire shape, priority levels
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server with bearer-token authentication
//!   - Canvas, node, and share stores over SQLite
//!   - Full-snapshot node synchronization endpoint
//!
//! - **`client`** - Client-side sync model
//!   - In-memory node tree with bounded undo/redo history
//!   - Debounced full-snapshot autosave
//!   - HTTP sync client
//!
//! # Synchronization Model
//!
//! The client holds the authoritative working copy of a canvas's node
//! set. Every mutation reschedules a debounced push that replaces the
//! server-side snapshot wholesale. Concurrent writers to the same
//! canvas are last-writer-wins by design; there is no merge.

/// Types shared between backend and client
pub mod shared;

/// Server-side code
pub mod backend;

/// Client-side sync model
pub mod client;
