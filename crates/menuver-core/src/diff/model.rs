//! Diff output types.
//!
//! Collections use `BTreeMap` and sorted `Vec` for deterministic serialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Structured difference between two menu trees
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VersionDiff {
    /// Nodes present only in the newer tree
    pub added: Vec<NodeRef>,
    /// Nodes present only in the older tree
    pub removed: Vec<NodeRef>,
    /// Nodes present in both with at least one content field changed
    pub modified: Vec<NodeChange>,
}

impl VersionDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    pub fn change_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }
}

/// A node reported as added or removed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeRef {
    pub lineage_key: String,
    pub node_id: String,
    pub name: String,
    pub kind: String,
}

/// A node whose content changed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeChange {
    pub lineage_key: String,
    /// Node id in the newer tree
    pub node_id: String,
    /// Name in the newer tree
    pub name: String,
    /// Changed fields only, keyed by field name
    pub changes: BTreeMap<String, FieldChange>,
}

/// Old and new value of one field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldChange {
    pub old: Value,
    pub new: Value,
}
