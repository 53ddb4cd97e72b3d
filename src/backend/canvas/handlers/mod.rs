/**
 * Canvas Handlers Module
 *
 * HTTP handlers for canvases, node snapshots, and share links.
 */

pub mod canvases;
pub mod nodes;
pub mod shared;
pub mod shares;
pub mod types;
