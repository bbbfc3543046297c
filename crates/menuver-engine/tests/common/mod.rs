use menuver_core::NodeDraft;
use menuver_core_types::RequestContext;
use menuver_engine::{add_node, MenuTarget};
use menuver_store::{db, migrations};
use rusqlite::Connection;

pub const ACCOUNT: &str = "acct-test";

/// In-memory database with the schema applied
#[allow(dead_code)]
pub fn setup_db() -> Connection {
    let mut conn = db::open_in_memory().unwrap();
    migrations::apply_migrations(&mut conn).unwrap();
    conn
}

#[allow(dead_code)]
pub fn ctx() -> RequestContext {
    RequestContext::for_actor("tester")
}

#[allow(dead_code)]
pub fn live() -> MenuTarget {
    MenuTarget::live(ACCOUNT)
}

/// Ids of the help-desk live tree
#[allow(dead_code)]
pub struct HelpDesk {
    pub help: String,
    pub faq: String,
    pub contact: String,
}

/// Build the help-desk live tree through the engine:
///
/// ```text
/// Help
///   FAQ (view)
/// Contact (click CONTACT)
/// ```
#[allow(dead_code)]
pub fn seed_help_desk(conn: &mut Connection) -> HelpDesk {
    let ctx = ctx();
    let help = add_node(conn, &ctx, &live(), None, NodeDraft::click("Help", "HELP")).unwrap();
    let faq = add_node(
        conn,
        &ctx,
        &live(),
        Some(&help),
        NodeDraft::view("FAQ", "https://example.com/faq"),
    )
    .unwrap();
    let contact = add_node(
        conn,
        &ctx,
        &live(),
        None,
        NodeDraft::click("Contact", "CONTACT"),
    )
    .unwrap();
    HelpDesk { help, faq, contact }
}

#[allow(dead_code)]
pub const HELP_DESK_JSON: &str = r#"{"button":[{"name":"Help","sub_button":[{"type":"view","name":"FAQ","url":"https://example.com/faq"}]},{"type":"click","name":"Contact","key":"CONTACT"}]}"#;

/// Number of Published versions of an account, read straight from the table
#[allow(dead_code)]
pub fn published_count(conn: &Connection, account_id: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM menu_versions WHERE account_id = ? AND status = 'published'",
        [account_id],
        |row| row.get(0),
    )
    .unwrap()
}

#[allow(dead_code)]
pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })
    .unwrap()
}
