//! menuver core - menu tree model and version semantics
//!
//! This crate holds the storage-free kernel of menu versioning:
//! - live and versioned menu nodes over one generic node shape
//! - the tree arena with its structural limits and validator
//! - the copy engine that snapshots trees into versions with lineage
//! - the version lifecycle table and rollback rules
//! - the lineage-keyed diff engine
//! - the remote wire document and its digest
//! - the error and logging facilities shared by the other crates

pub mod copy;
pub mod diff;
pub mod errors;
pub mod lifecycle;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod publisher;
pub mod rules;
pub mod snapshot;

pub use menuver_core_types as core_types;

// Re-export commonly used types
pub use copy::{copy_from_live, copy_from_version};
pub use diff::{compare, render_diff_summary, VersionDiff};
pub use errors::{ExError, ExErrorKind, MenuError, Result};
pub use model::{
    AccountScope, LiveNode, MenuKind, MenuNode, NodeDraft, NodePatch, NodeScope, Version,
    VersionNode, VersionScope, VersionStatus,
};
pub use ops::MenuTree;
pub use publisher::{NoopRemotePublisher, RemotePublisher};
#[cfg(any(test, feature = "testing"))]
pub use publisher::{RecordingRemotePublisher, RejectingRemotePublisher};
pub use rules::{validate, StructureLimits};
