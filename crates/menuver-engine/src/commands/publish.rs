//! Publish pipeline
//!
//! Two short IMMEDIATE transactions around the remote call:
//! 1. stage: check the Draft, validate, freeze its wire document on the
//!    version row and commit;
//! 2. the remote call, with no transaction open;
//! 3. activate: re-check the Draft and its tree against the staged document,
//!    flip statuses and archive every other Published version.
//!
//! A remote failure leaves the staged snapshot as the record of the attempt;
//! the version stays Draft.

#![allow(clippy::result_large_err)]

use chrono::Utc;
use menuver_core::errors::{ExError, ExErrorKind};
use menuver_core::lifecycle::{ensure_draft, Transition};
use menuver_core::model::{Version, VersionStatus};
use menuver_core::publisher::RemotePublisher;
use menuver_core::rules::validate;
use menuver_core::snapshot::{compute_snapshot_digest, serialize_menu};
use menuver_core_types::RequestContext;
use menuver_store::errors::{from_rusqlite, version_not_found, Result};
use menuver_store::repo::load_version_tree;
use menuver_store::SqliteRepo;
use rusqlite::Connection;

use super::{begin_immediate, instrumented, Subject};

/// A successful publish
#[derive(Debug, Clone, PartialEq)]
pub struct PublishOutcome {
    /// The version, now Published
    pub version: Version,
    /// Versions of the same account moved from Published to Archived
    pub archived_version_ids: Vec<String>,
}

/// Publish a Draft version
///
/// The database write lock is never held across the remote call, so writers
/// for other accounts proceed while the platform responds.
///
/// # Errors
///
/// - `NotDraft` when the version is not a Draft, checked before the remote
///   call and again after it
/// - `StructureInvalid` (with every violation) when the tree is invalid;
///   nothing is written
/// - `RemotePublish` wrapping the publisher's error; the version stays Draft
///   with its snapshot stored
/// - `InvalidTransition` when the Draft's tree was edited while the remote
///   call was in flight; the version stays Draft
pub fn publish(
    conn: &mut Connection,
    ctx: &RequestContext,
    version_id: &str,
    publisher: &dyn RemotePublisher,
) -> Result<PublishOutcome> {
    instrumented("publish", ctx, Subject::Version(version_id), || {
        let (staged, snapshot) = stage(conn, version_id)?;

        if let Err(remote_err) = publisher.publish(&staged.account_id, &snapshot) {
            tracing::warn!(
                version_id = %staged.id,
                account_id = %staged.account_id,
                error_code = remote_err.code(),
                "remote publish failed; version left as draft"
            );
            return Err(ExError::new(ExErrorKind::RemotePublish)
                .with_op("publish")
                .with_version_id(version_id)
                .with_entity_id(staged.account_id.clone())
                .with_message("Remote platform rejected the menu")
                .with_source(remote_err));
        }

        activate(conn, ctx, version_id, &snapshot)
    })
}

/// Validate the Draft and store its wire document
fn stage(conn: &mut Connection, version_id: &str) -> Result<(Version, String)> {
    let tx = begin_immediate(conn)?;

    let mut version = require_draft(&tx, version_id)?;
    let tree = load_version_tree(&tx, version_id)?;
    let violations = validate(&tree);
    if !violations.is_empty() {
        return Err(ExError::new(ExErrorKind::StructureInvalid)
            .with_version_id(version_id)
            .with_message(format!(
                "Menu structure is invalid ({} violation(s))",
                violations.len()
            ))
            .with_violations(violations));
    }

    let snapshot = serialize_menu(&tree)?;
    version.snapshot_digest = Some(compute_snapshot_digest(&snapshot));
    version.menu_snapshot = Some(snapshot.clone());
    version.updated_at = Utc::now();
    SqliteRepo::persist_version(&tx, &version)?;

    tx.commit().map_err(from_rusqlite)?;
    Ok((version, snapshot))
}

/// Mark the staged version Published and archive the account's other
/// Published versions
fn activate(
    conn: &mut Connection,
    ctx: &RequestContext,
    version_id: &str,
    snapshot: &str,
) -> Result<PublishOutcome> {
    let tx = begin_immediate(conn)?;

    let mut version = require_draft(&tx, version_id)?;
    if serialize_menu(&load_version_tree(&tx, version_id)?)? != snapshot {
        return Err(ExError::new(ExErrorKind::InvalidTransition)
            .with_version_id(version_id)
            .with_message("Draft was edited while the remote publish was in flight"));
    }

    Transition::Publish.check(&version)?;
    let now = Utc::now();
    version.snapshot_digest = Some(compute_snapshot_digest(snapshot));
    version.menu_snapshot = Some(snapshot.to_string());
    version.status = VersionStatus::Published;
    version.published_at = Some(now);
    version.published_by = Some(ctx.actor.clone());
    version.updated_at = now;
    SqliteRepo::persist_version(&tx, &version)?;

    let mut archived_version_ids = Vec::new();
    for mut other in SqliteRepo::list_published_versions(&tx, &version.account_id)? {
        if other.id == version.id {
            continue;
        }
        Transition::Archive.check(&other)?;
        other.status = VersionStatus::Archived;
        other.updated_at = now;
        SqliteRepo::persist_version(&tx, &other)?;
        archived_version_ids.push(other.id);
    }

    tx.commit().map_err(from_rusqlite)?;

    tracing::info!(
        version_id = %version.id,
        account_id = %version.account_id,
        archived = archived_version_ids.len(),
        "version published"
    );
    Ok(PublishOutcome {
        version,
        archived_version_ids,
    })
}

fn require_draft(conn: &Connection, version_id: &str) -> Result<Version> {
    let version =
        SqliteRepo::get_version(conn, version_id)?.ok_or_else(|| version_not_found(version_id))?;
    ensure_draft(&version)?;
    Ok(version)
}
