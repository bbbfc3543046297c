use std::collections::HashSet;

use crate::errors::{MenuError, Result};
use crate::model::{MenuKind, MenuNode, NodeScope};
use crate::ops::MenuTree;

/// Fanout and depth limits of a menu tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureLimits {
    pub max_roots: usize,
    pub max_children: usize,
    pub max_depth: usize,
}

impl Default for StructureLimits {
    fn default() -> Self {
        Self {
            max_roots: 3,
            max_children: 5,
            max_depth: 2,
        }
    }
}

/// Fields a leaf of the given kind must carry
pub fn required_fields(kind: MenuKind) -> &'static [&'static str] {
    match kind {
        MenuKind::Click
        | MenuKind::ScancodePush
        | MenuKind::ScancodeWaitmsg
        | MenuKind::PicSysphoto
        | MenuKind::PicPhotoOrAlbum
        | MenuKind::PicWeixin
        | MenuKind::LocationSelect => &["click_key"],
        MenuKind::View => &["url"],
        MenuKind::Miniprogram => &["url", "app_id", "page_path"],
        MenuKind::MediaId | MenuKind::ViewLimited => &["media_id"],
    }
}

/// Required fields that are absent or blank on a node
pub fn missing_required_fields<S>(node: &MenuNode<S>) -> Vec<&'static str> {
    required_fields(node.kind)
        .iter()
        .copied()
        .filter(|field| {
            let value = match *field {
                "click_key" => &node.click_key,
                "url" => &node.url,
                "app_id" => &node.app_id,
                "page_path" => &node.page_path,
                _ => &node.media_id,
            };
            value.as_deref().map_or(true, |v| v.trim().is_empty())
        })
        .collect()
}

/// Validate a whole tree with the default limits
pub fn validate<S: NodeScope>(tree: &MenuTree<S>) -> Vec<String> {
    validate_with(tree, &StructureLimits::default())
}

/// Validate a whole tree, collecting every violation
///
/// Rules are evaluated independently. An empty list means the tree may be
/// published.
pub fn validate_with<S: NodeScope>(tree: &MenuTree<S>, limits: &StructureLimits) -> Vec<String> {
    let mut violations = Vec::new();
    let index = tree.index();

    let roots = index.roots();
    if roots.len() > limits.max_roots {
        violations.push(format!(
            "menu has {} root nodes; at most {} allowed",
            roots.len(),
            limits.max_roots
        ));
    }

    for root in &roots {
        let child_count = index.child_count(&root.id);
        if child_count > limits.max_children {
            violations.push(format!(
                "root '{}' ({}) has {} children; at most {} allowed",
                root.name, root.id, child_count, limits.max_children
            ));
        }
    }

    for node in tree.nodes() {
        if node.name.trim().is_empty() {
            violations.push(format!("node {} has an empty name", node.id));
        }

        if let Some(parent_id) = &node.parent_id {
            if !tree.contains(parent_id) {
                violations.push(format!(
                    "node '{}' ({}) references missing parent {}",
                    node.name, node.id, parent_id
                ));
                continue;
            }
        }

        match depth_of(tree, node) {
            Some(depth) if depth > limits.max_depth => violations.push(format!(
                "node '{}' ({}) is nested {} levels deep; at most {} allowed",
                node.name, node.id, depth, limits.max_depth
            )),
            Some(_) => {}
            None => violations.push(format!(
                "node '{}' ({}) is part of a parent cycle",
                node.name, node.id
            )),
        }

        // Containers are sent as name + sub_button only; hidden leaves not at all
        if index.child_count(&node.id) == 0 && is_sent(tree, node) {
            for field in missing_required_fields(node) {
                violations.push(format!(
                    "node '{}' ({}) of kind {} is missing required field {}",
                    node.name, node.id, node.kind, field
                ));
            }
        }
    }

    violations
}

/// Level of a node (roots are level 1); `None` if its parent chain loops
fn depth_of<S: NodeScope>(tree: &MenuTree<S>, node: &MenuNode<S>) -> Option<usize> {
    let mut seen = HashSet::new();
    let mut depth = 1;
    let mut current = node;

    while let Some(parent_id) = &current.parent_id {
        if !seen.insert(current.id.as_str()) {
            return None;
        }
        match tree.get(parent_id) {
            Ok(parent) => {
                depth += 1;
                current = parent;
            }
            Err(_) => break,
        }
    }

    Some(depth)
}

/// Whether a node reaches the remote document: it and every ancestor are enabled
fn is_sent<S: NodeScope>(tree: &MenuTree<S>, node: &MenuNode<S>) -> bool {
    let mut seen = HashSet::new();
    let mut current = node;

    loop {
        if !current.enabled {
            return false;
        }
        // Cycles are reported separately
        if !seen.insert(current.id.as_str()) {
            return true;
        }
        match current.parent_id.as_deref().map(|id| tree.get(id)) {
            Some(Ok(parent)) => current = parent,
            _ => return true,
        }
    }
}

/// Gate a single create/move against the fanout limit of its sibling set
///
/// `siblings` is the sibling set at the node's (new) level; the node itself is
/// counted once whether or not it already appears there.
pub fn validate_single_node<S: NodeScope>(
    node: &MenuNode<S>,
    siblings: &[&MenuNode<S>],
    limits: &StructureLimits,
) -> Result<()> {
    let others = siblings.iter().filter(|s| s.id != node.id).count();
    let total = others + 1;

    let (limit, level) = match &node.parent_id {
        None => (limits.max_roots, "root menus".to_string()),
        Some(parent_id) => (limits.max_children, format!("children under {}", parent_id)),
    };

    if total > limit {
        return Err(MenuError::StructureLimit {
            reason: format!(
                "{} would become {}; at most {} allowed",
                level, total, limit
            ),
        });
    }

    Ok(())
}
