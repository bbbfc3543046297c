//! `menuver version ...`

use clap::{Args, Subcommand};
use menuver_core::{render_diff_summary, NoopRemotePublisher, Version};
use menuver_engine::{
    archive, compare, create_version, get_version, list_versions, load_tree, publish, rollback,
    ArchiveOutcome, MenuTarget, TargetTree,
};

use super::node::print_tree;
use super::{parse_target, CliResult, Session};

#[derive(Debug, Args)]
pub struct VersionArgs {
    #[command(subcommand)]
    pub command: VersionCommand,
}

#[derive(Debug, Subcommand)]
pub enum VersionCommand {
    /// Create a Draft from the live tree (or from --from)
    Create {
        #[arg(long)]
        account: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Defaults to the next vN label
        #[arg(long)]
        label: Option<String>,

        /// Copy the tree of this version instead of the live tree
        #[arg(long)]
        from: Option<String>,
    },
    /// Validate, send and mark a Draft as Published
    Publish { version_id: String },
    /// Archive a Published version or discard a Draft
    Archive { version_id: String },
    /// Create a new Draft holding a copy of a past version
    Rollback { version_id: String },
    /// Compare two trees (`live:<account>`, `version:<id>` or a bare version id)
    Diff {
        #[arg(value_parser = parse_target)]
        from: MenuTarget,

        #[arg(value_parser = parse_target)]
        to: MenuTarget,
    },
    List {
        #[arg(long)]
        account: String,
    },
    /// Print a version, its tree and its published snapshot
    Show { version_id: String },
}

pub fn execute(args: VersionArgs, session: &mut Session) -> CliResult {
    let Session { conn, ctx } = session;

    match args.command {
        VersionCommand::Create {
            account,
            description,
            label,
            from,
        } => {
            let version = create_version(
                conn,
                ctx,
                &account,
                &description,
                label.as_deref(),
                from.as_deref(),
            )?;
            println!("Created {} {}", version.version_label, version.id);
        }
        VersionCommand::Publish { version_id } => {
            let outcome = publish(conn, ctx, &version_id, &NoopRemotePublisher)?;
            println!(
                "Published {} {}",
                outcome.version.version_label, outcome.version.id
            );
            for archived in &outcome.archived_version_ids {
                println!("Archived {}", archived);
            }
        }
        VersionCommand::Archive { version_id } => match archive(conn, ctx, &version_id)? {
            ArchiveOutcome::Discarded { version_id } => println!("Discarded {}", version_id),
            ArchiveOutcome::Archived(version) => println!("Archived {}", version.id),
        },
        VersionCommand::Rollback { version_id } => {
            let version = rollback(conn, ctx, &version_id)?;
            println!("Created {} {}", version.version_label, version.id);
            println!("  {}", version.description);
        }
        VersionCommand::Diff { from, to } => {
            let diff = compare(conn, ctx, &from, &to)?;
            print!("{}", render_diff_summary(&diff));
        }
        VersionCommand::List { account } => {
            for version in list_versions(conn, &account)? {
                println!("{}", summary_line(&version));
            }
        }
        VersionCommand::Show { version_id } => {
            let version = get_version(conn, &version_id)?;
            println!("{}", summary_line(&version));
            if !version.description.is_empty() {
                println!("description: {}", version.description);
            }
            if let Some(source) = &version.copied_from_version_id {
                println!("copied_from: {}", source);
            }
            if let (Some(at), Some(by)) = (&version.published_at, &version.published_by) {
                println!("published: {} by {}", at.to_rfc3339(), by);
            }
            if let Some(digest) = &version.snapshot_digest {
                println!("snapshot_digest: {}", digest);
            }
            if let TargetTree::Version(tree) = load_tree(conn, &MenuTarget::version(&version.id))? {
                print_tree(&tree);
            }
            if let Some(snapshot) = &version.menu_snapshot {
                println!("{}", snapshot);
            }
        }
    }

    Ok(())
}

fn summary_line(version: &Version) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        version.id,
        version.version_label,
        version.status,
        version.created_at.to_rfc3339()
    )
}
