//! CLI subcommands

pub mod node;
pub mod version;

use std::path::Path;

use menuver_core_types::RequestContext;
use menuver_engine::MenuTarget;
use menuver_store::{db, migrations};
use rusqlite::Connection;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open database plus the caller context for one invocation
pub struct Session {
    pub conn: Connection,
    pub ctx: RequestContext,
}

impl Session {
    /// Open (creating if needed) the database and bring its schema up to date
    pub fn new(db_path: &str, actor: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(dir) = Path::new(db_path).parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let mut conn = db::open(db_path)?;
        migrations::apply_migrations(&mut conn)?;

        Ok(Self {
            conn,
            ctx: RequestContext::for_actor(actor),
        })
    }
}

/// Parse `live:<account>` or `version:<id>`; a bare value is a version id
pub fn parse_target(s: &str) -> Result<MenuTarget, String> {
    match s.split_once(':') {
        Some(("live", account)) if !account.is_empty() => Ok(MenuTarget::live(account)),
        Some(("version", id)) if !id.is_empty() => Ok(MenuTarget::version(id)),
        Some((prefix, _)) if prefix == "live" || prefix == "version" => {
            Err(format!("missing id after '{}:'", prefix))
        }
        _ if s.is_empty() => Err("empty target".to_string()),
        _ => Ok(MenuTarget::version(s)),
    }
}
