use menuver_store::{db, migrations};
use rusqlite::Connection;

/// In-memory database with the schema applied
#[allow(dead_code)]
pub fn setup_db() -> Connection {
    let mut conn = db::open_in_memory().unwrap();
    migrations::apply_migrations(&mut conn).unwrap();
    conn
}
