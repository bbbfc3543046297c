//! Tree mutation commands.
//!
//! The same edits apply to a live tree and to a Draft version's tree. Each
//! edit is a small [`TreeEdit`] applied to whichever tree the target names,
//! then the touched rows are written back in the same transaction.

#![allow(clippy::result_large_err)]

use menuver_core::errors::{ExError, ExErrorKind};
use menuver_core::lifecycle::ensure_draft;
use menuver_core::model::{
    AccountScope, MenuNode, NodeDraft, NodePatch, NodeScope, VersionScope,
};
use menuver_core::MenuTree;
use menuver_core_types::RequestContext;
use menuver_store::errors::{version_not_found, Result};
use menuver_store::repo::{load_live_tree, load_version_tree};
use menuver_store::SqliteRepo;
use rusqlite::Connection;

use super::{begin_immediate, instrumented, MenuTarget};

/// Row persistence for one node scope
pub(crate) trait ScopeStore: NodeScope + Sized {
    fn persist(conn: &Connection, node: &MenuNode<Self>) -> Result<()>;
    fn delete(conn: &Connection, node_id: &str) -> Result<bool>;
}

impl ScopeStore for AccountScope {
    fn persist(conn: &Connection, node: &MenuNode<Self>) -> Result<()> {
        SqliteRepo::persist_live_node(conn, node)
    }

    fn delete(conn: &Connection, node_id: &str) -> Result<bool> {
        SqliteRepo::delete_live_node(conn, node_id)
    }
}

impl ScopeStore for VersionScope {
    fn persist(conn: &Connection, node: &MenuNode<Self>) -> Result<()> {
        SqliteRepo::persist_version_node(conn, node)
    }

    fn delete(conn: &Connection, node_id: &str) -> Result<bool> {
        SqliteRepo::delete_version_node(conn, node_id)
    }
}

/// One mutation, generic over the tree's scope
trait TreeEdit {
    type Output;

    /// Apply to `tree` and write the touched rows through `conn`
    fn apply<S: ScopeStore>(
        self,
        conn: &Connection,
        tree: &mut MenuTree<S>,
        scope: &S,
    ) -> Result<Self::Output>;
}

/// Load the target tree in an IMMEDIATE transaction, apply, commit
fn edit_target<E: TreeEdit>(conn: &mut Connection, target: &MenuTarget, edit: E) -> Result<E::Output> {
    let tx = begin_immediate(conn)?;

    let output = match target {
        MenuTarget::Live { account_id } => {
            let mut tree = load_live_tree(&tx, account_id)?;
            edit.apply(&tx, &mut tree, &AccountScope::new(account_id.as_str()))?
        }
        MenuTarget::Version { version_id } => {
            let version = SqliteRepo::get_version(&tx, version_id)?
                .ok_or_else(|| version_not_found(version_id))?;
            ensure_draft(&version)?;
            let mut tree = load_version_tree(&tx, version_id)?;
            edit.apply(&tx, &mut tree, &VersionScope::new(version_id.as_str()))?
        }
    };

    tx.commit().map_err(menuver_store::errors::from_rusqlite)?;
    Ok(output)
}

struct AddNode {
    parent_id: Option<String>,
    draft: NodeDraft,
}

impl TreeEdit for AddNode {
    type Output = String;

    fn apply<S: ScopeStore>(
        self,
        conn: &Connection,
        tree: &mut MenuTree<S>,
        scope: &S,
    ) -> Result<String> {
        let node = MenuNode::from_draft(scope.clone(), self.draft);
        let id = tree.add_child(self.parent_id.as_deref(), node)?;
        S::persist(conn, tree.get(&id)?)?;
        Ok(id)
    }
}

struct UpdateNode {
    node_id: String,
    patch: NodePatch,
}

impl TreeEdit for UpdateNode {
    type Output = ();

    fn apply<S: ScopeStore>(self, conn: &Connection, tree: &mut MenuTree<S>, _: &S) -> Result<()> {
        if self.patch.is_empty() {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_entity_id(self.node_id)
                .with_message("update changes no fields"));
        }
        let node = tree.update_node(&self.node_id, self.patch)?;
        S::persist(conn, node)
    }
}

struct MoveNode {
    node_id: String,
    new_parent_id: Option<String>,
}

impl TreeEdit for MoveNode {
    type Output = ();

    fn apply<S: ScopeStore>(self, conn: &Connection, tree: &mut MenuTree<S>, _: &S) -> Result<()> {
        tree.move_node(&self.node_id, self.new_parent_id.as_deref())?;
        S::persist(conn, tree.get(&self.node_id)?)
    }
}

struct RemoveNode {
    node_id: String,
}

impl TreeEdit for RemoveNode {
    type Output = ();

    fn apply<S: ScopeStore>(self, conn: &Connection, tree: &mut MenuTree<S>, _: &S) -> Result<()> {
        let removed = tree.remove_node(&self.node_id)?;
        S::delete(conn, &removed.id)?;
        Ok(())
    }
}

struct SetEnabled {
    node_id: String,
    enabled: bool,
}

impl TreeEdit for SetEnabled {
    type Output = ();

    fn apply<S: ScopeStore>(self, conn: &Connection, tree: &mut MenuTree<S>, _: &S) -> Result<()> {
        let node = tree.set_enabled(&self.node_id, self.enabled)?;
        S::persist(conn, node)
    }
}

struct Reorder {
    parent_id: Option<String>,
    ordered_ids: Vec<String>,
}

impl TreeEdit for Reorder {
    type Output = ();

    fn apply<S: ScopeStore>(self, conn: &Connection, tree: &mut MenuTree<S>, _: &S) -> Result<()> {
        tree.reorder(self.parent_id.as_deref(), &self.ordered_ids)?;
        for id in &self.ordered_ids {
            S::persist(conn, tree.get(id)?)?;
        }
        Ok(())
    }
}

/// Add a node under `parent_id` (root level for `None`); returns the new id
///
/// # Errors
///
/// `StructureLimit` when the level is full or too deep, `NotFound` for a
/// missing parent or version, `NotDraft` for a non-Draft version target.
pub fn add_node(
    conn: &mut Connection,
    ctx: &RequestContext,
    target: &MenuTarget,
    parent_id: Option<&str>,
    draft: NodeDraft,
) -> Result<String> {
    instrumented("add_node", ctx, target.subject(), || {
        edit_target(
            conn,
            target,
            AddNode {
                parent_id: parent_id.map(str::to_string),
                draft,
            },
        )
    })
}

/// Edit a node's content fields
pub fn update_node(
    conn: &mut Connection,
    ctx: &RequestContext,
    target: &MenuTarget,
    node_id: &str,
    patch: NodePatch,
) -> Result<()> {
    instrumented("update_node", ctx, target.subject(), || {
        edit_target(
            conn,
            target,
            UpdateNode {
                node_id: node_id.to_string(),
                patch,
            },
        )
    })
}

/// Re-parent a node; it is placed last among its new siblings
///
/// # Errors
///
/// `CycleDetected` when moving under itself or a descendant,
/// `StructureLimit` when the destination is full or too deep.
pub fn move_node(
    conn: &mut Connection,
    ctx: &RequestContext,
    target: &MenuTarget,
    node_id: &str,
    new_parent_id: Option<&str>,
) -> Result<()> {
    instrumented("move_node", ctx, target.subject(), || {
        edit_target(
            conn,
            target,
            MoveNode {
                node_id: node_id.to_string(),
                new_parent_id: new_parent_id.map(str::to_string),
            },
        )
    })
}

/// Remove a leaf node
///
/// # Errors
///
/// `HasChildren` when the node still has children.
pub fn remove_node(
    conn: &mut Connection,
    ctx: &RequestContext,
    target: &MenuTarget,
    node_id: &str,
) -> Result<()> {
    instrumented("remove_node", ctx, target.subject(), || {
        edit_target(
            conn,
            target,
            RemoveNode {
                node_id: node_id.to_string(),
            },
        )
    })
}

/// Toggle a single node's `enabled` flag (children are untouched)
pub fn set_node_enabled(
    conn: &mut Connection,
    ctx: &RequestContext,
    target: &MenuTarget,
    node_id: &str,
    enabled: bool,
) -> Result<()> {
    instrumented("set_node_enabled", ctx, target.subject(), || {
        edit_target(
            conn,
            target,
            SetEnabled {
                node_id: node_id.to_string(),
                enabled,
            },
        )
    })
}

/// Rewrite the order of one sibling set
///
/// # Errors
///
/// `InvalidInput` when `ordered_ids` is not exactly the current sibling set.
pub fn reorder_nodes(
    conn: &mut Connection,
    ctx: &RequestContext,
    target: &MenuTarget,
    parent_id: Option<&str>,
    ordered_ids: Vec<String>,
) -> Result<()> {
    instrumented("reorder_nodes", ctx, target.subject(), || {
        edit_target(
            conn,
            target,
            Reorder {
                parent_id: parent_id.map(str::to_string),
                ordered_ids,
            },
        )
    })
}
