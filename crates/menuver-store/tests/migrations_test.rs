#![allow(clippy::unwrap_used, clippy::expect_used)]

use menuver_store::{db, migrations};
use tempfile::tempdir;

#[test]
fn test_schema_tables_created() {
    let mut conn = db::open_in_memory().unwrap();
    migrations::apply_migrations(&mut conn).unwrap();

    for table in ["menu_nodes", "menu_versions", "menu_version_nodes", "schema_version"] {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1, "table {} should exist", table);
    }
}

#[test]
fn test_migrations_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("menu.db");

    {
        let mut conn = db::open(&path).unwrap();
        migrations::apply_migrations(&mut conn).unwrap();
    }

    let mut conn = db::open(&path).unwrap();
    migrations::apply_migrations(&mut conn).unwrap();
    assert_eq!(migrations::applied_migrations(&conn).unwrap().len(), 1);

    let mode: String = conn
        .query_row("PRAGMA journal_mode", [], |row| row.get(0))
        .unwrap();
    assert_eq!(mode.to_lowercase(), "wal");
}

#[test]
fn test_status_check_constraint() {
    let mut conn = db::open_in_memory().unwrap();
    migrations::apply_migrations(&mut conn).unwrap();

    let result = conn.execute(
        "INSERT INTO menu_versions (id, account_id, version_label, status, created_at, updated_at)
         VALUES ('v', 'a', 'v1', 'deleted', 0, 0)",
        [],
    );
    assert!(result.is_err());
}
