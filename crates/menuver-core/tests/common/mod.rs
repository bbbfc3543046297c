use menuver_core::{
    copy_from_live, AccountScope, LiveNode, MenuKind, MenuNode, MenuTree, NodeDraft,
    VersionScope,
};

pub const ACCOUNT: &str = "acct-test";

/// Create a new empty live tree for testing
#[allow(dead_code)]
pub fn new_live_tree() -> MenuTree<AccountScope> {
    MenuTree::new()
}

/// Build a live node with a readable id
#[allow(dead_code)]
pub fn live_node(id: &str, draft: NodeDraft) -> LiveNode {
    MenuNode::with_id(id, AccountScope::new(ACCOUNT), draft)
}

/// Add a click node with a readable id, returning the id
#[allow(dead_code)]
pub fn add_click(tree: &mut MenuTree<AccountScope>, parent: Option<&str>, id: &str) -> String {
    tree.add_child(parent, live_node(id, NodeDraft::click(id, id.to_uppercase())))
        .unwrap()
}

/// Live tree of the help-desk scenario:
///
/// ```text
/// Help
///   FAQ (view)
/// Contact (click CONTACT)
/// ```
#[allow(dead_code)]
pub fn help_desk_tree() -> MenuTree<AccountScope> {
    let mut tree = new_live_tree();
    tree.add_child(None, live_node("help", NodeDraft::click("Help", "HELP")))
        .unwrap();
    tree.add_child(
        Some("help"),
        live_node("faq", NodeDraft::view("FAQ", "https://example.com/faq")),
    )
    .unwrap();
    tree.add_child(
        None,
        live_node("contact", NodeDraft::click("Contact", "CONTACT")),
    )
    .unwrap();
    tree
}

/// Snapshot the help-desk tree into a version
#[allow(dead_code)]
pub fn help_desk_version(version_id: &str) -> MenuTree<VersionScope> {
    copy_from_live(&help_desk_tree(), version_id)
}

/// Find a versioned node by name
#[allow(dead_code)]
pub fn by_name<'a>(tree: &'a MenuTree<VersionScope>, name: &str) -> &'a MenuNode<VersionScope> {
    tree.nodes().find(|n| n.name == name).unwrap()
}

/// Draft with every type-specific field filled in
#[allow(dead_code)]
pub fn complete_draft(name: &str, kind: MenuKind) -> NodeDraft {
    NodeDraft::new(name, kind)
        .with_click_key("K")
        .with_url("https://example.com")
        .with_app_id("wx1")
        .with_page_path("pages/index")
        .with_media_id("M1")
}
