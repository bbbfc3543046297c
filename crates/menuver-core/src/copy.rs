//! Snapshot/copy engine
//!
//! Deep-clones a menu tree into a version, allocating fresh ids while keeping
//! shape, order and every content field. Clones carry a lineage id so the diff
//! engine can match the same logical node across versions.

use std::collections::HashMap;

use uuid::Uuid;

use crate::model::{AccountScope, MenuNode, VersionScope};
use crate::ops::MenuTree;

/// Snapshot the live tree of an account into a version
///
/// Two passes: clone every node and record `live id → clone id`, then re-link
/// each clone's parent through that table. Each clone's lineage is the live
/// node's id.
pub fn copy_from_live(
    live: &MenuTree<AccountScope>,
    target_version_id: &str,
) -> MenuTree<VersionScope> {
    let source = live.walk();
    let mut id_map: HashMap<&str, String> = HashMap::with_capacity(source.len());
    let mut clones = Vec::with_capacity(source.len());

    for node in &source {
        let clone_id = Uuid::now_v7().to_string();
        id_map.insert(node.id.as_str(), clone_id.clone());
        clones.push(node.clone_with_scope(
            clone_id,
            node.parent_id.clone(),
            VersionScope::with_lineage(target_version_id, node.id.clone()),
        ));
    }

    for clone in &mut clones {
        clone.parent_id = clone
            .parent_id
            .as_deref()
            .and_then(|live_parent| id_map.get(live_parent).cloned());
    }

    let mut tree = MenuTree::with_limits(*live.limits());
    for clone in clones {
        tree.insert(clone);
    }
    tree
}

/// Clone a version's tree into another version
///
/// Depth-first from each root; every clone inherits the source node's lineage
/// key, so a node born in the source version seeds the lineage with its own id.
pub fn copy_from_version(
    source: &MenuTree<VersionScope>,
    target_version_id: &str,
) -> MenuTree<VersionScope> {
    let mut tree = MenuTree::with_limits(*source.limits());
    for root in source.roots() {
        clone_subtree(source, root, None, target_version_id, &mut tree);
    }
    tree
}

fn clone_subtree(
    source: &MenuTree<VersionScope>,
    node: &MenuNode<VersionScope>,
    new_parent_id: Option<String>,
    target_version_id: &str,
    out: &mut MenuTree<VersionScope>,
) {
    let clone_id = Uuid::now_v7().to_string();
    out.insert(node.clone_with_scope(
        clone_id.clone(),
        new_parent_id,
        VersionScope::with_lineage(target_version_id, node.lineage_key()),
    ));

    for child in source.children(&node.id) {
        clone_subtree(source, child, Some(clone_id.clone()), target_version_id, out);
    }
}
