//! Diff computation.
//!
//! The entry point is [`compare`], which matches nodes by lineage key in
//! O(n) and produces a [`VersionDiff`].

use std::collections::{BTreeMap, HashMap};

use serde_json::{json, Value};

use crate::diff::model::{FieldChange, NodeChange, NodeRef, VersionDiff};
use crate::model::{MenuNode, NodeScope};
use crate::ops::MenuTree;

/// Content fields compared between matched nodes, in report order
pub const COMPARED_FIELDS: &[&str] = &[
    "name",
    "kind",
    "click_key",
    "url",
    "app_id",
    "page_path",
    "media_id",
    "enabled",
];

/// Compare an older tree `a` with a newer tree `b`
pub fn compare<A: NodeScope, B: NodeScope>(a: &MenuTree<A>, b: &MenuTree<B>) -> VersionDiff {
    let old_by_key: HashMap<&str, &MenuNode<A>> =
        a.nodes().map(|n| (n.lineage_key(), n)).collect();
    let new_by_key: HashMap<&str, &MenuNode<B>> =
        b.nodes().map(|n| (n.lineage_key(), n)).collect();

    let mut diff = VersionDiff::default();

    for (key, new_node) in &new_by_key {
        match old_by_key.get(key) {
            None => diff.added.push(node_ref(new_node)),
            Some(old_node) => {
                let changes = field_changes(old_node, new_node);
                if !changes.is_empty() {
                    diff.modified.push(NodeChange {
                        lineage_key: key.to_string(),
                        node_id: new_node.id.clone(),
                        name: new_node.name.clone(),
                        changes,
                    });
                }
            }
        }
    }

    for (key, old_node) in &old_by_key {
        if !new_by_key.contains_key(key) {
            diff.removed.push(node_ref(old_node));
        }
    }

    diff.added.sort_by(|x, y| x.lineage_key.cmp(&y.lineage_key));
    diff.removed.sort_by(|x, y| x.lineage_key.cmp(&y.lineage_key));
    diff.modified.sort_by(|x, y| x.lineage_key.cmp(&y.lineage_key));
    diff
}

fn node_ref<S: NodeScope>(node: &MenuNode<S>) -> NodeRef {
    NodeRef {
        lineage_key: node.lineage_key().to_string(),
        node_id: node.id.clone(),
        name: node.name.clone(),
        kind: node.kind.as_str().to_string(),
    }
}

fn content_values<S>(node: &MenuNode<S>) -> [Value; 8] {
    [
        json!(node.name),
        json!(node.kind.as_str()),
        json!(node.click_key),
        json!(node.url),
        json!(node.app_id),
        json!(node.page_path),
        json!(node.media_id),
        json!(node.enabled),
    ]
}

fn field_changes<A, B>(old: &MenuNode<A>, new: &MenuNode<B>) -> BTreeMap<String, FieldChange> {
    COMPARED_FIELDS
        .iter()
        .zip(content_values(old).into_iter().zip(content_values(new)))
        .filter(|(_, (o, n))| o != n)
        .map(|(field, (old, new))| (field.to_string(), FieldChange { old, new }))
        .collect()
}
