//! Version lifecycle commands: create, archive, rollback, compare, queries.

#![allow(clippy::result_large_err)]

use chrono::Utc;
use menuver_core::copy::{copy_from_live, copy_from_version};
use menuver_core::diff::{compare as compare_trees, VersionDiff};
use menuver_core::errors::{ExError, ExErrorKind};
use menuver_core::lifecycle::{
    archive_transition, ensure_rollback_target, next_version_label, rollback_description,
    Transition,
};
use menuver_core::model::{AccountScope, Version, VersionScope, VersionStatus};
use menuver_core::MenuTree;
use menuver_core_types::RequestContext;
use menuver_store::errors::{from_rusqlite, version_not_found, Result};
use menuver_store::repo::{load_live_tree, load_version_tree};
use menuver_store::SqliteRepo;
use rusqlite::Connection;

use super::{begin_immediate, instrumented, MenuTarget, Subject};

/// A hydrated tree of either scope
#[derive(Debug, Clone)]
pub enum TargetTree {
    Live(MenuTree<AccountScope>),
    Version(MenuTree<VersionScope>),
}

impl TargetTree {
    pub fn len(&self) -> usize {
        match self {
            TargetTree::Live(tree) => tree.len(),
            TargetTree::Version(tree) => tree.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of [`archive`]
#[derive(Debug, Clone, PartialEq)]
pub enum ArchiveOutcome {
    /// A Draft was deleted with its nodes
    Discarded { version_id: String },
    /// A Published version moved to Archived
    Archived(Version),
}

fn require_version(conn: &Connection, version_id: &str) -> Result<Version> {
    SqliteRepo::get_version(conn, version_id)?.ok_or_else(|| version_not_found(version_id))
}

/// Create a Draft version for `account_id`
///
/// The tree is copied from the account's live tree, or from `copy_from` when
/// given (which must belong to the same account). Without a `label` the next
/// `vN` label is suggested.
///
/// # Errors
///
/// `NotFound` for a missing `copy_from`, `InvalidInput` when it belongs to
/// another account.
pub fn create_version(
    conn: &mut Connection,
    ctx: &RequestContext,
    account_id: &str,
    description: &str,
    label: Option<&str>,
    copy_from: Option<&str>,
) -> Result<Version> {
    instrumented("create_version", ctx, Subject::Account(account_id), || {
        let tx = begin_immediate(conn)?;

        let label = match label {
            Some(label) => label.to_string(),
            None => {
                let existing = SqliteRepo::list_versions(&tx, account_id)?;
                next_version_label(existing.iter().map(|v| v.version_label.as_str()))
            }
        };
        let mut version = Version::new_draft(account_id, label, description);

        let tree = match copy_from {
            Some(source_id) => {
                let source = require_version(&tx, source_id)?;
                if source.account_id != account_id {
                    return Err(ExError::new(ExErrorKind::InvalidInput)
                        .with_version_id(source_id)
                        .with_entity_id(account_id)
                        .with_message(format!(
                            "Version {} belongs to account {}",
                            source_id, source.account_id
                        )));
                }
                version.copied_from_version_id = Some(source.id.clone());
                copy_from_version(&load_version_tree(&tx, source_id)?, &version.id)
            }
            None => copy_from_live(&load_live_tree(&tx, account_id)?, &version.id),
        };

        SqliteRepo::persist_version(&tx, &version)?;
        SqliteRepo::persist_version_tree(&tx, &tree)?;
        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!(
            version_id = %version.id,
            version_label = %version.version_label,
            node_count = tree.len(),
            "version created"
        );
        Ok(version)
    })
}

/// Archive a version: a Draft is discarded, a Published version is archived
///
/// # Errors
///
/// `InvalidTransition` for an already Archived version.
pub fn archive(
    conn: &mut Connection,
    ctx: &RequestContext,
    version_id: &str,
) -> Result<ArchiveOutcome> {
    instrumented("archive", ctx, Subject::Version(version_id), || {
        let tx = begin_immediate(conn)?;
        let mut version = require_version(&tx, version_id)?;

        let outcome = match archive_transition(&version)? {
            Transition::Discard => {
                SqliteRepo::delete_version(&tx, version_id)?;
                ArchiveOutcome::Discarded {
                    version_id: version_id.to_string(),
                }
            }
            transition => {
                transition.check(&version)?;
                version.status = VersionStatus::Archived;
                version.updated_at = Utc::now();
                SqliteRepo::persist_version(&tx, &version)?;
                ArchiveOutcome::Archived(version)
            }
        };

        tx.commit().map_err(from_rusqlite)?;
        Ok(outcome)
    })
}

/// Create a new Draft holding a copy of `target_version_id`'s tree
///
/// The target is left untouched.
///
/// # Errors
///
/// `InvalidRollbackTarget` when the target is a Draft.
pub fn rollback(
    conn: &mut Connection,
    ctx: &RequestContext,
    target_version_id: &str,
) -> Result<Version> {
    instrumented("rollback", ctx, Subject::Version(target_version_id), || {
        let tx = begin_immediate(conn)?;
        let target = require_version(&tx, target_version_id)?;
        ensure_rollback_target(&target)?;

        let existing = SqliteRepo::list_versions(&tx, &target.account_id)?;
        let label = next_version_label(existing.iter().map(|v| v.version_label.as_str()));

        let mut version =
            Version::new_draft(&target.account_id, label, rollback_description(&target));
        version.copied_from_version_id = Some(target.id.clone());

        let tree = copy_from_version(&load_version_tree(&tx, &target.id)?, &version.id);
        SqliteRepo::persist_version(&tx, &version)?;
        SqliteRepo::persist_version_tree(&tx, &tree)?;
        tx.commit().map_err(from_rusqlite)?;

        Ok(version)
    })
}

/// Load the tree a target names
///
/// # Errors
///
/// `NotFound` for a missing version.
pub fn load_tree(conn: &Connection, target: &MenuTarget) -> Result<TargetTree> {
    match target {
        MenuTarget::Live { account_id } => Ok(TargetTree::Live(load_live_tree(conn, account_id)?)),
        MenuTarget::Version { version_id } => {
            require_version(conn, version_id)?;
            Ok(TargetTree::Version(load_version_tree(conn, version_id)?))
        }
    }
}

/// Diff two trees by lineage; `a` is the old side
pub fn compare(
    conn: &Connection,
    ctx: &RequestContext,
    a: &MenuTarget,
    b: &MenuTarget,
) -> Result<VersionDiff> {
    instrumented("compare", ctx, a.subject(), || {
        let diff = match (load_tree(conn, a)?, load_tree(conn, b)?) {
            (TargetTree::Live(a), TargetTree::Live(b)) => compare_trees(&a, &b),
            (TargetTree::Live(a), TargetTree::Version(b)) => compare_trees(&a, &b),
            (TargetTree::Version(a), TargetTree::Live(b)) => compare_trees(&a, &b),
            (TargetTree::Version(a), TargetTree::Version(b)) => compare_trees(&a, &b),
        };
        Ok(diff)
    })
}

pub fn get_version(conn: &Connection, version_id: &str) -> Result<Version> {
    require_version(conn, version_id)
}

/// All versions of an account, oldest first
pub fn list_versions(conn: &Connection, account_id: &str) -> Result<Vec<Version>> {
    SqliteRepo::list_versions(conn, account_id)
}
