pub mod node;
pub mod version;

pub use node::{AccountScope, MenuKind, MenuNode, NodeDraft, NodePatch, NodeScope, VersionScope};
pub use version::{Version, VersionStatus};

/// Live node bound to an account
pub type LiveNode = MenuNode<AccountScope>;

/// Versioned node bound to a version
pub type VersionNode = MenuNode<VersionScope>;
