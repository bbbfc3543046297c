//! Publish snapshot domain logic.
//!
//! Renders a menu tree into the document sent to the remote platform and
//! computes its digest. The rendered string is stored verbatim on the
//! version as the audit record of what was sent.
//!
//! ## Non-Responsibilities
//!
//! - Persistence (handled by `menuver-store`)
//! - Orchestration (handled by `menuver-engine`)

pub mod digest;
pub mod wire;

pub use digest::compute_snapshot_digest;
pub use wire::{render_wire_menu, serialize_menu, WireButton, WireMenu};
