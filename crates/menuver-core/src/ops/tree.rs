use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Utc;

use crate::errors::{MenuError, Result};
use crate::model::{MenuNode, NodePatch, NodeScope};
use crate::rules::{validate_single_node, StructureLimits};

/// Arena of menu nodes keyed by id
///
/// Nodes reference their parent by id only; parent→children adjacency is
/// derived on demand through [`ChildIndex`]. Every mutation re-checks the
/// structural limits against the post-mutation sibling set.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuTree<S> {
    nodes: BTreeMap<String, MenuNode<S>>,
    limits: StructureLimits,
}

impl<S: NodeScope> Default for MenuTree<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered parent→children adjacency over a borrowed tree
pub struct ChildIndex<'a, S> {
    roots: Vec<&'a MenuNode<S>>,
    children: HashMap<&'a str, Vec<&'a MenuNode<S>>>,
}

impl<'a, S> ChildIndex<'a, S> {
    fn build(nodes: impl Iterator<Item = &'a MenuNode<S>>) -> Self {
        let mut roots = Vec::new();
        let mut children: HashMap<&'a str, Vec<&'a MenuNode<S>>> = HashMap::new();

        for node in nodes {
            match node.parent_id.as_deref() {
                None => roots.push(node),
                Some(parent_id) => children.entry(parent_id).or_default().push(node),
            }
        }

        roots.sort_by(|a, b| sibling_order(*a, *b));
        for siblings in children.values_mut() {
            siblings.sort_by(|a, b| sibling_order(*a, *b));
        }

        Self { roots, children }
    }

    /// Root nodes in sibling order
    pub fn roots(&self) -> Vec<&'a MenuNode<S>> {
        self.roots.clone()
    }

    /// Children of a node in sibling order
    pub fn children(&self, id: &str) -> Vec<&'a MenuNode<S>> {
        self.children.get(id).cloned().unwrap_or_default()
    }

    pub fn child_count(&self, id: &str) -> usize {
        self.children.get(id).map_or(0, Vec::len)
    }

    /// Siblings at a level (`None` = root level)
    pub fn siblings(&self, parent_id: Option<&str>) -> Vec<&'a MenuNode<S>> {
        match parent_id {
            None => self.roots(),
            Some(id) => self.children(id),
        }
    }
}

/// Total sibling order: position, then id
fn sibling_order<S>(a: &MenuNode<S>, b: &MenuNode<S>) -> std::cmp::Ordering {
    a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id))
}

impl<S: NodeScope> MenuTree<S> {
    /// Create an empty tree with the default limits
    pub fn new() -> Self {
        Self::with_limits(StructureLimits::default())
    }

    pub fn with_limits(limits: StructureLimits) -> Self {
        Self {
            nodes: BTreeMap::new(),
            limits,
        }
    }

    /// Build a tree from stored rows without checking limits
    ///
    /// Used when hydrating; the structural validator reports whatever the
    /// rows contain.
    pub fn from_nodes(nodes: impl IntoIterator<Item = MenuNode<S>>) -> Self {
        let mut tree = Self::new();
        for node in nodes {
            tree.insert(node);
        }
        tree
    }

    pub fn limits(&self) -> &StructureLimits {
        &self.limits
    }

    /// Insert a node as-is, replacing any node with the same id
    pub fn insert(&mut self, node: MenuNode<S>) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Get a node by id
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if no node has this id.
    pub fn get(&self, id: &str) -> Result<&MenuNode<S>> {
        self.nodes.get(id).ok_or_else(|| MenuError::NodeNotFound {
            node_id: id.to_string(),
        })
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut MenuNode<S>> {
        self.nodes.get_mut(id).ok_or_else(|| MenuError::NodeNotFound {
            node_id: id.to_string(),
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes in id order
    pub fn nodes(&self) -> impl Iterator<Item = &MenuNode<S>> {
        self.nodes.values()
    }

    pub fn into_nodes(self) -> Vec<MenuNode<S>> {
        self.nodes.into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index(&self) -> ChildIndex<'_, S> {
        ChildIndex::build(self.nodes.values())
    }

    /// Root nodes in sibling order
    pub fn roots(&self) -> Vec<&MenuNode<S>> {
        self.index().roots()
    }

    /// Children of a node in sibling order
    pub fn children(&self, id: &str) -> Vec<&MenuNode<S>> {
        self.index().children(id)
    }

    /// Depth-first walk in sibling order, parents before children
    ///
    /// Nodes unreachable from a root (dangling parent) are not visited.
    pub fn walk(&self) -> Vec<&MenuNode<S>> {
        let index = self.index();
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut visited = HashSet::new();
        let mut stack: Vec<&MenuNode<S>> = index.roots().into_iter().rev().collect();

        while let Some(node) = stack.pop() {
            if !visited.insert(node.id.as_str()) {
                continue;
            }
            out.push(node);
            stack.extend(index.children(&node.id).into_iter().rev());
        }

        out
    }

    /// Level of a node, roots being level 1
    pub fn depth_of(&self, id: &str) -> Result<usize> {
        let mut depth = 1;
        let mut current = self.get(id)?;
        while let Some(parent_id) = &current.parent_id {
            if depth > self.nodes.len() {
                return Err(MenuError::Cycle {
                    node_id: id.to_string(),
                    new_parent_id: parent_id.clone(),
                });
            }
            current = self.get(parent_id)?;
            depth += 1;
        }
        Ok(depth)
    }

    /// Levels spanned by the subtree under a node, the node included
    fn height_of(&self, id: &str) -> usize {
        let index = self.index();
        let mut height = 1;
        let mut frontier = vec![(id.to_string(), 1usize)];
        while let Some((current, level)) = frontier.pop() {
            height = height.max(level);
            if level > self.nodes.len() {
                break;
            }
            for child in index.children(&current) {
                frontier.push((child.id.clone(), level + 1));
            }
        }
        height
    }

    /// Whether `id` lies strictly below `ancestor_id`
    pub fn is_descendant(&self, ancestor_id: &str, id: &str) -> bool {
        let mut seen = HashSet::new();
        let mut current = self.nodes.get(id);
        while let Some(node) = current {
            if !seen.insert(node.id.as_str()) {
                return false;
            }
            match node.parent_id.as_deref() {
                Some(parent_id) if parent_id == ancestor_id => return true,
                Some(parent_id) => current = self.nodes.get(parent_id),
                None => return false,
            }
        }
        false
    }

    /// Position for a node appended at a level: one past the highest sibling,
    /// or 0 for the first
    pub fn next_position(&self, parent_id: Option<&str>) -> i64 {
        self.nodes
            .values()
            .filter(|n| n.parent_id.as_deref() == parent_id)
            .map(|n| n.position + 1)
            .max()
            .unwrap_or(0)
    }

    fn check_parent(&self, parent_id: &str, subtree_height: usize) -> Result<()> {
        if !self.contains(parent_id) {
            return Err(MenuError::ParentNotFound {
                node_id: parent_id.to_string(),
            });
        }

        let depth = self.depth_of(parent_id)? + subtree_height;
        if depth > self.limits.max_depth {
            return Err(MenuError::StructureLimit {
                reason: format!(
                    "placing under {} would nest {} levels deep; at most {} allowed",
                    parent_id, depth, self.limits.max_depth
                ),
            });
        }
        Ok(())
    }

    /// Attach a new node under `parent_id` (or at root level for `None`)
    ///
    /// The node is placed last among its siblings. Returns the node's id.
    ///
    /// # Errors
    ///
    /// * `InvalidName` - name is blank
    /// * `DuplicateNode` - id already present
    /// * `ParentNotFound` - parent does not exist
    /// * `StructureLimit` - depth or fanout would be exceeded
    pub fn add_child(&mut self, parent_id: Option<&str>, mut node: MenuNode<S>) -> Result<String> {
        ensure_name(&node.name)?;

        if self.contains(&node.id) {
            return Err(MenuError::DuplicateNode { node_id: node.id });
        }

        if let Some(pid) = parent_id {
            self.check_parent(pid, 1)?;
        }

        node.parent_id = parent_id.map(str::to_string);
        {
            let index = self.index();
            let siblings = index.siblings(parent_id);
            validate_single_node(&node, &siblings, &self.limits)?;
        }

        node.position = self.next_position(parent_id);
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        Ok(id)
    }

    /// Remove a leaf node
    ///
    /// # Errors
    ///
    /// * `NodeNotFound` - node does not exist
    /// * `HasChildren` - node still has children
    pub fn remove_node(&mut self, id: &str) -> Result<MenuNode<S>> {
        self.get(id)?;

        let child_count = self.index().child_count(id);
        if child_count > 0 {
            return Err(MenuError::HasChildren {
                node_id: id.to_string(),
                child_count,
            });
        }

        self.nodes.remove(id).ok_or_else(|| MenuError::NodeNotFound {
            node_id: id.to_string(),
        })
    }

    /// Re-parent a node, placing it last among its new siblings
    ///
    /// Moving to the current parent is a no-op.
    ///
    /// # Errors
    ///
    /// * `NodeNotFound` / `ParentNotFound` - node or target parent missing
    /// * `Cycle` - target is the node itself or one of its descendants
    /// * `StructureLimit` - depth or fanout would be exceeded
    pub fn move_node(&mut self, id: &str, new_parent_id: Option<&str>) -> Result<()> {
        let current_parent = self.get(id)?.parent_id.clone();

        if let Some(pid) = new_parent_id {
            if pid == id || self.is_descendant(id, pid) {
                return Err(MenuError::Cycle {
                    node_id: id.to_string(),
                    new_parent_id: pid.to_string(),
                });
            }
        }

        if current_parent.as_deref() == new_parent_id {
            return Ok(());
        }

        if let Some(pid) = new_parent_id {
            self.check_parent(pid, self.height_of(id))?;
        }

        let mut moved = self.get(id)?.clone();
        moved.parent_id = new_parent_id.map(str::to_string);
        {
            let index = self.index();
            let siblings = index.siblings(new_parent_id);
            validate_single_node(&moved, &siblings, &self.limits)?;
        }

        let position = self.next_position(new_parent_id);
        let node = self.get_mut(id)?;
        node.parent_id = moved.parent_id;
        node.position = position;
        node.updated_at = Utc::now();
        Ok(())
    }

    /// Edit a node's content fields
    ///
    /// # Errors
    ///
    /// * `NodeNotFound` - node does not exist
    /// * `InvalidName` - patch sets a blank name
    pub fn update_node(&mut self, id: &str, patch: NodePatch) -> Result<&MenuNode<S>> {
        if let Some(name) = &patch.name {
            ensure_name(name)?;
        }
        let node = self.get_mut(id)?;
        node.apply_patch(patch);
        Ok(node)
    }

    /// Toggle one node's `enabled` flag; children keep their own flags
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<&MenuNode<S>> {
        let node = self.get_mut(id)?;
        if node.enabled != enabled {
            node.enabled = enabled;
            node.updated_at = Utc::now();
        }
        Ok(node)
    }

    /// Rewrite sibling positions to 0..n in the given order
    ///
    /// # Errors
    ///
    /// * `ParentNotFound` - parent does not exist
    /// * `SiblingSetMismatch` - `ordered_ids` is not exactly the current
    ///   sibling set
    pub fn reorder(&mut self, parent_id: Option<&str>, ordered_ids: &[String]) -> Result<()> {
        if let Some(pid) = parent_id {
            if !self.contains(pid) {
                return Err(MenuError::ParentNotFound {
                    node_id: pid.to_string(),
                });
            }
        }

        let current: HashSet<String> = self
            .index()
            .siblings(parent_id)
            .into_iter()
            .map(|n| n.id.clone())
            .collect();
        let requested: HashSet<String> = ordered_ids.iter().cloned().collect();

        if current != requested || requested.len() != ordered_ids.len() {
            return Err(MenuError::SiblingSetMismatch {
                parent: parent_id.unwrap_or("<root>").to_string(),
            });
        }

        let now = Utc::now();
        for (position, id) in ordered_ids.iter().enumerate() {
            let node = self.get_mut(id)?;
            let position = position as i64;
            if node.position != position {
                node.position = position;
                node.updated_at = now;
            }
        }
        Ok(())
    }
}

fn ensure_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(MenuError::InvalidName {
            reason: "name must not be blank".to_string(),
        });
    }
    Ok(())
}
