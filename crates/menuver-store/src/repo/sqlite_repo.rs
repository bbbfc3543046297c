//! SQLite repository implementation
//!
//! Writes take a `&Connection`; pass a `Transaction` (it derefs to one) to
//! group writes atomically.

#![allow(clippy::result_large_err)]

use crate::errors::{corrupt_row, from_rusqlite, Result};
use chrono::{DateTime, TimeZone, Utc};
use menuver_core::model::{LiveNode, Version, VersionNode, VersionScope, VersionStatus};
use menuver_core::MenuTree;
use rusqlite::{Connection, OptionalExtension, Row};

const VERSION_COLUMNS: &str = "id, account_id, version_label, description, status, published_at, \
     published_by, copied_from_version_id, menu_snapshot, snapshot_digest, created_at, updated_at";

/// SQLite repository for menu nodes and versions
pub struct SqliteRepo;

impl SqliteRepo {
    /// Insert or update a live node
    pub fn persist_live_node(conn: &Connection, node: &LiveNode) -> Result<()> {
        conn.execute(
            "INSERT INTO menu_nodes (id, account_id, parent_id, name, kind, click_key, url, app_id,
                 page_path, media_id, position, enabled, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
             ON CONFLICT(id) DO UPDATE SET
                parent_id = excluded.parent_id,
                name = excluded.name,
                kind = excluded.kind,
                click_key = excluded.click_key,
                url = excluded.url,
                app_id = excluded.app_id,
                page_path = excluded.page_path,
                media_id = excluded.media_id,
                position = excluded.position,
                enabled = excluded.enabled,
                updated_at = excluded.updated_at",
            rusqlite::params![
                node.id,
                node.scope.account_id,
                node.parent_id,
                node.name,
                node.kind.as_str(),
                node.click_key,
                node.url,
                node.app_id,
                node.page_path,
                node.media_id,
                node.position,
                node.enabled,
                node.created_at.timestamp_millis(),
                node.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Delete a live node row; returns whether a row was removed
    pub fn delete_live_node(conn: &Connection, node_id: &str) -> Result<bool> {
        let removed = conn
            .execute("DELETE FROM menu_nodes WHERE id = ?", [node_id])
            .map_err(from_rusqlite)?;
        Ok(removed > 0)
    }

    /// Insert or update a versioned node
    pub fn persist_version_node(conn: &Connection, node: &VersionNode) -> Result<()> {
        conn.execute(
            "INSERT INTO menu_version_nodes (id, version_id, lineage_id, parent_id, name, kind,
                 click_key, url, app_id, page_path, media_id, position, enabled, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
             ON CONFLICT(id) DO UPDATE SET
                parent_id = excluded.parent_id,
                name = excluded.name,
                kind = excluded.kind,
                click_key = excluded.click_key,
                url = excluded.url,
                app_id = excluded.app_id,
                page_path = excluded.page_path,
                media_id = excluded.media_id,
                position = excluded.position,
                enabled = excluded.enabled,
                updated_at = excluded.updated_at",
            rusqlite::params![
                node.id,
                node.scope.version_id,
                node.scope.lineage_id,
                node.parent_id,
                node.name,
                node.kind.as_str(),
                node.click_key,
                node.url,
                node.app_id,
                node.page_path,
                node.media_id,
                node.position,
                node.enabled,
                node.created_at.timestamp_millis(),
                node.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Persist every node of a version tree, parents before children
    pub fn persist_version_tree(conn: &Connection, tree: &MenuTree<VersionScope>) -> Result<()> {
        for node in tree.walk() {
            Self::persist_version_node(conn, node)?;
        }
        Ok(())
    }

    /// Delete a versioned node row; returns whether a row was removed
    pub fn delete_version_node(conn: &Connection, node_id: &str) -> Result<bool> {
        let removed = conn
            .execute("DELETE FROM menu_version_nodes WHERE id = ?", [node_id])
            .map_err(from_rusqlite)?;
        Ok(removed > 0)
    }

    /// Insert or update a version row
    ///
    /// `account_id`, `created_at` and `copied_from_version_id` are fixed at
    /// creation and never rewritten.
    pub fn persist_version(conn: &Connection, version: &Version) -> Result<()> {
        conn.execute(
            "INSERT INTO menu_versions (id, account_id, version_label, description, status,
                 published_at, published_by, copied_from_version_id, menu_snapshot, snapshot_digest,
                 created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
             ON CONFLICT(id) DO UPDATE SET
                version_label = excluded.version_label,
                description = excluded.description,
                status = excluded.status,
                published_at = excluded.published_at,
                published_by = excluded.published_by,
                menu_snapshot = excluded.menu_snapshot,
                snapshot_digest = excluded.snapshot_digest,
                updated_at = excluded.updated_at",
            rusqlite::params![
                version.id,
                version.account_id,
                version.version_label,
                version.description,
                version.status.as_str(),
                version.published_at.map(|t| t.timestamp_millis()),
                version.published_by,
                version.copied_from_version_id,
                version.menu_snapshot,
                version.snapshot_digest,
                version.created_at.timestamp_millis(),
                version.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Delete a version and, by cascade, its nodes
    pub fn delete_version(conn: &Connection, version_id: &str) -> Result<bool> {
        let removed = conn
            .execute("DELETE FROM menu_versions WHERE id = ?", [version_id])
            .map_err(from_rusqlite)?;
        Ok(removed > 0)
    }

    /// Load a version by id
    pub fn get_version(conn: &Connection, version_id: &str) -> Result<Option<Version>> {
        let sql = format!("SELECT {} FROM menu_versions WHERE id = ?", VERSION_COLUMNS);
        let row = conn
            .query_row(&sql, [version_id], VersionRow::from_row)
            .optional()
            .map_err(from_rusqlite)?;

        row.map(VersionRow::into_version).transpose()
    }

    /// All versions of an account, oldest first
    pub fn list_versions(conn: &Connection, account_id: &str) -> Result<Vec<Version>> {
        Self::query_versions(
            conn,
            &format!(
                "SELECT {} FROM menu_versions WHERE account_id = ? ORDER BY created_at, id",
                VERSION_COLUMNS
            ),
            account_id,
        )
    }

    /// Published versions of an account (at most one when the invariant holds)
    pub fn list_published_versions(conn: &Connection, account_id: &str) -> Result<Vec<Version>> {
        Self::query_versions(
            conn,
            &format!(
                "SELECT {} FROM menu_versions WHERE account_id = ? AND status = 'published' \
                 ORDER BY created_at, id",
                VERSION_COLUMNS
            ),
            account_id,
        )
    }

    fn query_versions(conn: &Connection, sql: &str, account_id: &str) -> Result<Vec<Version>> {
        let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([account_id], VersionRow::from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        rows.into_iter().map(VersionRow::into_version).collect()
    }
}

/// Unix milliseconds to a UTC timestamp
pub(crate) fn from_millis(table: &str, id: &str, ms: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| corrupt_row(table, id, &format!("timestamp out of range: {}", ms)))
}

/// Raw `menu_versions` row before domain validation
struct VersionRow {
    id: String,
    account_id: String,
    version_label: String,
    description: String,
    status: String,
    published_at: Option<i64>,
    published_by: Option<String>,
    copied_from_version_id: Option<String>,
    menu_snapshot: Option<String>,
    snapshot_digest: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl VersionRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            account_id: row.get(1)?,
            version_label: row.get(2)?,
            description: row.get(3)?,
            status: row.get(4)?,
            published_at: row.get(5)?,
            published_by: row.get(6)?,
            copied_from_version_id: row.get(7)?,
            menu_snapshot: row.get(8)?,
            snapshot_digest: row.get(9)?,
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
        })
    }

    fn into_version(self) -> Result<Version> {
        const TABLE: &str = "menu_versions";
        let status = VersionStatus::parse(&self.status).ok_or_else(|| {
            corrupt_row(TABLE, &self.id, &format!("unknown status '{}'", self.status))
        })?;
        let published_at = self
            .published_at
            .map(|ms| from_millis(TABLE, &self.id, ms))
            .transpose()?;
        let created_at = from_millis(TABLE, &self.id, self.created_at)?;
        let updated_at = from_millis(TABLE, &self.id, self.updated_at)?;

        Ok(Version {
            id: self.id,
            account_id: self.account_id,
            version_label: self.version_label,
            description: self.description,
            status,
            published_at,
            published_by: self.published_by,
            copied_from_version_id: self.copied_from_version_id,
            menu_snapshot: self.menu_snapshot,
            snapshot_digest: self.snapshot_digest,
            created_at,
            updated_at,
        })
    }
}
