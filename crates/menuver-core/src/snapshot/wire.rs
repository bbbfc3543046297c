//! Remote menu document
//!
//! Field order is fixed by declaration order and must not change: stored
//! snapshots are compared byte for byte.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::model::{MenuKind, MenuNode, NodeScope};
use crate::ops::MenuTree;

/// Top-level document: `{"button":[...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMenu {
    pub button: Vec<WireButton>,
}

/// One button; containers carry only `name` and `sub_button`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireButton {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub appid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pagepath: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub media_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub article_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sub_button: Option<Vec<WireButton>>,
}

impl WireButton {
    fn container<S>(node: &MenuNode<S>, sub_button: Vec<WireButton>) -> Self {
        Self {
            kind: None,
            name: node.name.clone(),
            key: None,
            url: None,
            appid: None,
            pagepath: None,
            media_id: None,
            article_id: None,
            sub_button: Some(sub_button),
        }
    }

    fn leaf<S>(node: &MenuNode<S>) -> Self {
        let mut button = Self {
            kind: Some(node.kind.as_str().to_string()),
            name: node.name.clone(),
            key: None,
            url: None,
            appid: None,
            pagepath: None,
            media_id: None,
            article_id: None,
            sub_button: None,
        };

        match node.kind {
            MenuKind::View => button.url = node.url.clone(),
            MenuKind::Miniprogram => {
                button.url = node.url.clone();
                button.appid = node.app_id.clone();
                button.pagepath = node.page_path.clone();
            }
            MenuKind::MediaId => button.media_id = node.media_id.clone(),
            MenuKind::ViewLimited => button.article_id = node.media_id.clone(),
            _ => button.key = node.click_key.clone(),
        }

        button
    }
}

/// Build the remote document from a tree
///
/// Disabled nodes are left out; a disabled root hides its whole subtree.
/// A node with stored children is rendered as a container even when every
/// child is disabled.
pub fn render_wire_menu<S: NodeScope>(tree: &MenuTree<S>) -> WireMenu {
    let index = tree.index();
    let button = index
        .roots()
        .into_iter()
        .filter(|root| root.enabled)
        .map(|root| {
            let children = index.children(&root.id);
            if children.is_empty() {
                WireButton::leaf(root)
            } else {
                let sub_button = children
                    .into_iter()
                    .filter(|child| child.enabled)
                    .map(WireButton::leaf)
                    .collect();
                WireButton::container(root, sub_button)
            }
        })
        .collect();

    WireMenu { button }
}

/// Render a tree to compact JSON
///
/// # Errors
///
/// Returns `Serialization` if JSON encoding fails.
pub fn serialize_menu<S: NodeScope>(tree: &MenuTree<S>) -> Result<String> {
    Ok(serde_json::to_string(&render_wire_menu(tree))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccountScope, NodeDraft};

    fn scope() -> AccountScope {
        AccountScope::new("acct")
    }

    #[test]
    fn test_serialize_fixed_field_order() {
        let mut tree = MenuTree::new();
        tree.add_child(None, MenuNode::with_id("h", scope(), NodeDraft::click("Help", "HELP")))
            .unwrap();
        tree.add_child(None, MenuNode::with_id("m", scope(), NodeDraft::click("More", "MORE")))
            .unwrap();
        tree.add_child(
            Some("m"),
            MenuNode::with_id("s", scope(), NodeDraft::view("Site", "https://x")),
        )
        .unwrap();

        let json = serialize_menu(&tree).unwrap();
        assert_eq!(
            json,
            r#"{"button":[{"type":"click","name":"Help","key":"HELP"},{"name":"More","sub_button":[{"type":"view","name":"Site","url":"https://x"}]}]}"#
        );
    }

    #[test]
    fn test_miniprogram_and_view_limited_fields() {
        let mut tree = MenuTree::new();
        tree.add_child(
            None,
            MenuNode::with_id(
                "mp",
                scope(),
                NodeDraft::new("App", MenuKind::Miniprogram)
                    .with_url("https://fallback")
                    .with_app_id("wx123")
                    .with_page_path("pages/index"),
            ),
        )
        .unwrap();
        tree.add_child(
            None,
            MenuNode::with_id(
                "vl",
                scope(),
                NodeDraft::new("Read", MenuKind::ViewLimited).with_media_id("M1"),
            ),
        )
        .unwrap();

        let json = serialize_menu(&tree).unwrap();
        assert_eq!(
            json,
            r#"{"button":[{"type":"miniprogram","name":"App","url":"https://fallback","appid":"wx123","pagepath":"pages/index"},{"type":"view_limited","name":"Read","article_id":"M1"}]}"#
        );
    }

    #[test]
    fn test_disabled_nodes_are_omitted() {
        let mut tree = MenuTree::new();
        tree.add_child(None, MenuNode::with_id("a", scope(), NodeDraft::click("A", "a")))
            .unwrap();
        tree.add_child(Some("a"), MenuNode::with_id("a1", scope(), NodeDraft::click("A1", "a1")))
            .unwrap();
        tree.add_child(
            Some("a"),
            MenuNode::with_id("a2", scope(), NodeDraft::click("A2", "a2").disabled()),
        )
        .unwrap();
        tree.add_child(
            None,
            MenuNode::with_id("b", scope(), NodeDraft::click("B", "b").disabled()),
        )
        .unwrap();

        let menu = render_wire_menu(&tree);
        assert_eq!(menu.button.len(), 1);
        let subs = menu.button[0].sub_button.as_ref().unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].name, "A1");
    }

    #[test]
    fn test_empty_tree() {
        let tree: MenuTree<AccountScope> = MenuTree::new();
        assert_eq!(serialize_menu(&tree).unwrap(), r#"{"button":[]}"#);
    }
}
