//! Hydration layer - loads stored rows into `MenuTree`s
//!
//! Rows are loaded as-is; structural limits are not re-checked here so the
//! validator can report whatever the store holds.

#![allow(clippy::result_large_err)]

use crate::errors::{corrupt_row, from_rusqlite, Result};
use crate::repo::sqlite_repo::from_millis;
use menuver_core::model::{AccountScope, MenuKind, MenuNode, NodeScope, VersionScope};
use menuver_core::MenuTree;
use rusqlite::{Connection, Row};

/// Columns shared by `menu_nodes` and `menu_version_nodes`, after the scope
/// columns
const CONTENT_COLUMNS: &str = "parent_id, name, kind, click_key, url, app_id, page_path, \
     media_id, position, enabled, created_at, updated_at";

/// Load the live tree of an account (empty when it has no nodes)
pub fn load_live_tree(conn: &Connection, account_id: &str) -> Result<MenuTree<AccountScope>> {
    let sql = format!(
        "SELECT id, account_id, {} FROM menu_nodes WHERE account_id = ? ORDER BY id",
        CONTENT_COLUMNS
    );
    let rows = query_rows(conn, &sql, account_id, 2, |row| {
        Ok(AccountScope::new(row.get::<_, String>(1)?))
    })?;

    to_tree("menu_nodes", rows)
}

/// Load the tree of a version (empty when it has no nodes)
pub fn load_version_tree(conn: &Connection, version_id: &str) -> Result<MenuTree<VersionScope>> {
    let sql = format!(
        "SELECT id, version_id, lineage_id, {} FROM menu_version_nodes WHERE version_id = ? ORDER BY id",
        CONTENT_COLUMNS
    );
    let rows = query_rows(conn, &sql, version_id, 3, |row| {
        Ok(VersionScope {
            version_id: row.get(1)?,
            lineage_id: row.get(2)?,
        })
    })?;

    to_tree("menu_version_nodes", rows)
}

/// Raw node row; `kind` and timestamps are validated in `into_node`
struct NodeRow<S> {
    id: String,
    scope: S,
    parent_id: Option<String>,
    name: String,
    kind: String,
    click_key: Option<String>,
    url: Option<String>,
    app_id: Option<String>,
    page_path: Option<String>,
    media_id: Option<String>,
    position: i64,
    enabled: bool,
    created_at: i64,
    updated_at: i64,
}

/// `base` is the index of the first content column
fn query_rows<S, F>(
    conn: &Connection,
    sql: &str,
    owner_id: &str,
    base: usize,
    scope_of: F,
) -> Result<Vec<NodeRow<S>>>
where
    F: Fn(&Row<'_>) -> rusqlite::Result<S>,
{
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([owner_id], |row| {
            let scope = scope_of(row)?;
            Ok(NodeRow {
                id: row.get(0)?,
                scope,
                parent_id: row.get(base)?,
                name: row.get(base + 1)?,
                kind: row.get(base + 2)?,
                click_key: row.get(base + 3)?,
                url: row.get(base + 4)?,
                app_id: row.get(base + 5)?,
                page_path: row.get(base + 6)?,
                media_id: row.get(base + 7)?,
                position: row.get(base + 8)?,
                enabled: row.get(base + 9)?,
                created_at: row.get(base + 10)?,
                updated_at: row.get(base + 11)?,
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(rows)
}

fn to_tree<S: NodeScope>(table: &str, rows: Vec<NodeRow<S>>) -> Result<MenuTree<S>> {
    let nodes = rows
        .into_iter()
        .map(|row| row.into_node(table))
        .collect::<Result<Vec<_>>>()?;
    Ok(MenuTree::from_nodes(nodes))
}

impl<S> NodeRow<S> {
    fn into_node(self, table: &str) -> Result<MenuNode<S>> {
        let kind = MenuKind::parse(&self.kind)
            .ok_or_else(|| corrupt_row(table, &self.id, &format!("unknown kind '{}'", self.kind)))?;
        let created_at = from_millis(table, &self.id, self.created_at)?;
        let updated_at = from_millis(table, &self.id, self.updated_at)?;

        Ok(MenuNode {
            id: self.id,
            parent_id: self.parent_id,
            name: self.name,
            kind,
            click_key: self.click_key,
            url: self.url,
            app_id: self.app_id,
            page_path: self.page_path,
            media_id: self.media_id,
            position: self.position,
            enabled: self.enabled,
            scope: self.scope,
            created_at,
            updated_at,
        })
    }
}
