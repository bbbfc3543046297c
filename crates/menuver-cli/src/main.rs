//! menuver CLI
//!
//! Command-line interface over the menu versioning engine

use clap::{Parser, Subcommand, ValueEnum};
use menuver_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "menuver")]
#[command(about = "menuver - versioned two-level account menus", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, default_value = ".menuver/menu.db")]
    db: String,

    /// Log output format (written to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Json)]
    log: LogFormat,

    /// Caller identity recorded on published versions
    #[arg(long, global = true, default_value = "cli")]
    actor: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    fn profile(self) -> Profile {
        match self {
            LogFormat::Json => Profile::Production,
            LogFormat::Pretty => Profile::Development,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Edit a live or draft menu tree
    Node(commands::node::NodeArgs),
    /// Version lifecycle operations
    Version(commands::version::VersionArgs),
}

fn main() {
    let cli = Cli::parse();
    init(cli.log.profile());

    let session = commands::Session::new(&cli.db, &cli.actor);
    let result = session.and_then(|mut session| match cli.command {
        Commands::Node(args) => commands::node::execute(args, &mut session),
        Commands::Version(args) => commands::version::execute(args, &mut session),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
