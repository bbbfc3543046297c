//! menuver engine - command orchestration
//!
//! Coordinates the core tree and lifecycle logic with the SQLite store. Every
//! mutating command runs in its own IMMEDIATE transaction.

pub mod commands;

pub use commands::node::{
    add_node, move_node, remove_node, reorder_nodes, set_node_enabled, update_node,
};
pub use commands::publish::{publish, PublishOutcome};
pub use commands::version::{
    archive, compare, create_version, get_version, list_versions, load_tree, rollback,
    ArchiveOutcome, TargetTree,
};
pub use commands::MenuTarget;
