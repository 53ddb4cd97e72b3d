/**
 * Canvas Module
 *
 * Everything owned by a user's canvases: the canvas records themselves,
 * the node snapshots stored under them, and the share links that open
 * them to anonymous viewers and editors.
 *
 * Structure:
 * - store.rs    - canvas records and owner-scoped queries
 * - nodes.rs    - node snapshot validation and transactional replace
 * - shares.rs   - share link minting, listing, revocation, resolution
 * - handlers/   - HTTP handlers over the above
 */

pub mod handlers;
pub mod nodes;
pub mod shares;
pub mod store;
