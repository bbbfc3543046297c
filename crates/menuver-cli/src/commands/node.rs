//! `menuver node ...`

use clap::{Args, Subcommand};
use menuver_core::{MenuKind, MenuTree, NodeDraft, NodePatch, NodeScope};
use menuver_engine::{
    add_node, load_tree, move_node, remove_node, reorder_nodes, set_node_enabled, update_node,
    MenuTarget, TargetTree,
};

use super::{CliResult, Session};

#[derive(Debug, Args)]
pub struct NodeArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(subcommand)]
    pub command: NodeCommand,
}

/// Which tree to edit: an account's live tree or a Draft version
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    /// Live tree of this account
    #[arg(long)]
    pub account: Option<String>,

    /// Tree of this (Draft) version
    #[arg(long = "version-id")]
    pub version_id: Option<String>,
}

impl TargetArgs {
    fn target(&self) -> Result<MenuTarget, Box<dyn std::error::Error>> {
        match (&self.account, &self.version_id) {
            (Some(account), None) => Ok(MenuTarget::live(account)),
            (None, Some(version_id)) => Ok(MenuTarget::version(version_id)),
            _ => Err("specify exactly one of --account or --version-id".into()),
        }
    }
}

#[derive(Debug, Args)]
pub struct ContentArgs {
    #[arg(long)]
    pub key: Option<String>,

    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub appid: Option<String>,

    #[arg(long)]
    pub pagepath: Option<String>,

    #[arg(long)]
    pub media_id: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum NodeCommand {
    /// Add a node (root level unless --parent is given)
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "click", value_parser = parse_kind)]
        kind: MenuKind,

        #[arg(long)]
        parent: Option<String>,

        #[command(flatten)]
        content: ContentArgs,

        /// Create the node disabled
        #[arg(long)]
        disabled: bool,
    },
    /// Change a node's content fields
    Update {
        node_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_parser = parse_kind)]
        kind: Option<MenuKind>,

        #[command(flatten)]
        content: ContentArgs,
    },
    /// Move a node under another parent (root level without --parent)
    Move {
        node_id: String,

        #[arg(long)]
        parent: Option<String>,
    },
    /// Remove a node without children
    Remove { node_id: String },
    Enable { node_id: String },
    Disable { node_id: String },
    /// Set the order of one sibling set
    Reorder {
        #[arg(long)]
        parent: Option<String>,

        #[arg(required = true)]
        node_ids: Vec<String>,
    },
    /// Print the tree
    List,
}

fn parse_kind(s: &str) -> Result<MenuKind, String> {
    MenuKind::parse(s).ok_or_else(|| {
        let known: Vec<&str> = MenuKind::ALL.iter().map(MenuKind::as_str).collect();
        format!("unknown kind '{}' (expected one of: {})", s, known.join(", "))
    })
}

pub fn execute(args: NodeArgs, session: &mut Session) -> CliResult {
    let target = args.target.target()?;
    let Session { conn, ctx } = session;

    match args.command {
        NodeCommand::Add {
            name,
            kind,
            parent,
            content,
            disabled,
        } => {
            let mut draft = NodeDraft::new(name, kind);
            draft.click_key = content.key;
            draft.url = content.url;
            draft.app_id = content.appid;
            draft.page_path = content.pagepath;
            draft.media_id = content.media_id;
            if disabled {
                draft = draft.disabled();
            }
            let id = add_node(conn, ctx, &target, parent.as_deref(), draft)?;
            println!("{}", id);
        }
        NodeCommand::Update {
            node_id,
            name,
            kind,
            content,
        } => {
            let patch = NodePatch {
                name,
                kind,
                click_key: content.key.map(Some),
                url: content.url.map(Some),
                app_id: content.appid.map(Some),
                page_path: content.pagepath.map(Some),
                media_id: content.media_id.map(Some),
            };
            update_node(conn, ctx, &target, &node_id, patch)?;
        }
        NodeCommand::Move { node_id, parent } => {
            move_node(conn, ctx, &target, &node_id, parent.as_deref())?;
        }
        NodeCommand::Remove { node_id } => remove_node(conn, ctx, &target, &node_id)?,
        NodeCommand::Enable { node_id } => set_node_enabled(conn, ctx, &target, &node_id, true)?,
        NodeCommand::Disable { node_id } => {
            set_node_enabled(conn, ctx, &target, &node_id, false)?
        }
        NodeCommand::Reorder { parent, node_ids } => {
            reorder_nodes(conn, ctx, &target, parent.as_deref(), node_ids)?;
        }
        NodeCommand::List => match load_tree(conn, &target)? {
            TargetTree::Live(tree) => print_tree(&tree),
            TargetTree::Version(tree) => print_tree(&tree),
        },
    }

    Ok(())
}

/// One line per node, children indented under their parent
pub(crate) fn print_tree<S: NodeScope>(tree: &MenuTree<S>) {
    for node in tree.walk() {
        let indent = if node.is_root() { "" } else { "  " };
        let status = if node.enabled { "" } else { " (disabled)" };
        println!("{}{} [{}] {}{}", indent, node.name, node.kind, node.id, status);
    }
}
