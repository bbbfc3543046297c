//! CLI integration tests
//!
//! Drive the `menuver` binary against a database in a temp dir.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(db: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_menuver"))
        .arg("--db")
        .arg(db)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

/// Run and return trimmed stdout, asserting success
fn run_ok(db: &Path, args: &[&str]) -> String {
    let output = run(db, args);
    assert!(
        output.status.success(),
        "{:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

/// Id from a "Created vN <id>" line
fn created_id(stdout: &str) -> String {
    stdout
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(2))
        .unwrap()
        .to_string()
}

#[test]
fn test_cli_help_desk_publish_flow() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("nested").join("menu.db");

    let help = run_ok(
        &db,
        &["node", "--account", "acct", "add", "--name", "Help", "--key", "HELP"],
    );
    run_ok(
        &db,
        &[
            "node", "--account", "acct", "add", "--name", "FAQ", "--kind", "view", "--url",
            "https://example.com/faq", "--parent", &help,
        ],
    );
    run_ok(
        &db,
        &["node", "--account", "acct", "add", "--name", "Contact", "--key", "CONTACT"],
    );

    let listing = run_ok(&db, &["node", "--account", "acct", "list"]);
    let names: Vec<&str> = listing
        .lines()
        .map(|line| line.split_whitespace().next().unwrap())
        .collect();
    assert_eq!(names, vec!["Help", "FAQ", "Contact"]);

    let created = run_ok(&db, &["version", "create", "--account", "acct"]);
    assert!(created.starts_with("Created v1 "));
    let version_id = created_id(&created);

    let published = run_ok(&db, &["version", "publish", &version_id]);
    assert!(published.starts_with("Published v1"));

    let shown = run_ok(&db, &["version", "show", &version_id]);
    assert!(shown.contains("published"));
    assert!(shown.contains(
        r#"{"button":[{"name":"Help","sub_button":[{"type":"view","name":"FAQ","url":"https://example.com/faq"}]},{"type":"click","name":"Contact","key":"CONTACT"}]}"#
    ));

    let diff = run_ok(
        &db,
        &["version", "diff", &format!("version:{}", version_id), "live:acct"],
    );
    assert_eq!(diff, "No changes.");
}

#[test]
fn test_cli_error_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("menu.db");

    let created = run_ok(&db, &["version", "create", "--account", "acct"]);
    let version_id = created_id(&created);
    run_ok(&db, &["version", "publish", &version_id]);

    let output = run(&db, &["version", "publish", &version_id]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: [ERR_NOT_DRAFT]"), "stderr: {}", stderr);
}

#[test]
fn test_cli_fourth_root_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("menu.db");
    for name in ["A", "B", "C"] {
        run_ok(&db, &["node", "--account", "acct", "add", "--name", name, "--key", name]);
    }

    let output = run(
        &db,
        &["node", "--account", "acct", "add", "--name", "D", "--key", "D"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_STRUCTURE_LIMIT"));
}
