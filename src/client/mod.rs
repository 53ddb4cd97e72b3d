//! Client Module
//!
//! The client-side editing model: an in-memory canvas snapshot mutated
//! locally, wrapped in bounded undo/redo history, pushed to the server
//! through a debounced autosaver.
//!
//! # Module Structure
//!
//! ```text
//! client/
//! ├── mod.rs       - Module exports and documentation
//! ├── model.rs     - Snapshot mutations and cascade delete
//! ├── history.rs   - Bounded undo/redo with drag coalescing
//! ├── autosave.rs  - Debounced save scheduling with observable status
//! └── sync.rs      - HTTP snapshot sync client
//! ```
//!
//! # Edit Flow
//!
//! 1. A user gesture becomes a `Mutation` committed to the `History`.
//! 2. The commit reschedules the `Autosaver`'s debounce window.
//! 3. When the window elapses, `SyncClient` pushes the full present
//!    snapshot; the outcome lands in the observable `SaveStatus`.

/// Snapshot mutations
pub mod model;

/// Bounded undo/redo
pub mod history;

/// Debounced autosave
pub mod autosave;

/// HTTP sync client
pub mod sync;

pub use autosave::{Autosaver, SaveStatus, AUTOSAVE_DELAY};
pub use history::{History, UNDO_CAP};
pub use model::Mutation;
pub use sync::{SyncClient, SyncError};
