//! Shared Types
//!
//! Types shared between the backend HTTP surface and the client sync
//! model. Keeping the wire shapes in one place guarantees the two sides
//! agree on field names and defaults.
//!
//! # Module Structure
//!
//! ```text
//! shared/
//! ├── mod.rs   - Module exports
//! └── nodes.rs - Node wire shape and priority levels
//! ```

/// Node wire shape and priority levels
pub mod nodes;

pub use nodes::{NodeData, Priority};
