//! Version diff engine.
//!
//! Matches nodes of two menu trees by lineage key and reports which logical
//! nodes were added, removed, or had content fields changed.
//!
//! ## Entry point
//!
//! ```ignore
//! use menuver_core::diff::{compare, render_diff_summary};
//!
//! let diff = compare(&old_tree, &new_tree);
//! println!("{}", render_diff_summary(&diff));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: entries are sorted by lineage key; identical inputs give
//!   identical output.
//! - **Content only**: parent and position changes are not reported.
//! - **Scope agnostic**: live and versioned trees compare against each other,
//!   since a live node's lineage key is its own id.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compare;
pub use human_summary::render_diff_summary;
pub use model::{FieldChange, NodeChange, NodeRef, VersionDiff};
