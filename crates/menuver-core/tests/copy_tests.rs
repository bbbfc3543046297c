#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{by_name, help_desk_tree, help_desk_version};
use menuver_core::{compare, copy_from_live, copy_from_version, MenuTree, NodePatch, VersionScope};
use proptest::prelude::*;

#[test]
fn test_copy_from_live_preserves_shape_and_order() {
    let v1 = help_desk_version("v1");

    let roots: Vec<_> = v1.roots().iter().map(|n| n.name.clone()).collect();
    assert_eq!(roots, vec!["Help".to_string(), "Contact".to_string()]);

    let help = by_name(&v1, "Help");
    let children: Vec<_> = v1.children(&help.id).iter().map(|n| n.name.clone()).collect();
    assert_eq!(children, vec!["FAQ".to_string()]);
    assert_eq!(by_name(&v1, "FAQ").scope.lineage_id.as_deref(), Some("faq"));
}

#[test]
fn test_rename_reported_against_live_tree() {
    let live = help_desk_tree();
    let mut v1 = copy_from_live(&live, "v1");
    let faq_id = by_name(&v1, "FAQ").id.clone();
    v1.update_node(&faq_id, NodePatch::rename("FAQ v2")).unwrap();

    let diff = compare(&live, &v1);

    assert!(diff.added.is_empty());
    assert!(diff.removed.is_empty());
    assert_eq!(diff.modified.len(), 1);
    let change = &diff.modified[0];
    assert_eq!(change.lineage_key, "faq");
    assert_eq!(change.changes.len(), 1);
    assert_eq!(change.changes["name"].old, "FAQ");
    assert_eq!(change.changes["name"].new, "FAQ v2");
}

#[test]
fn test_lineage_stable_over_three_generations() {
    let v1 = help_desk_version("v1");
    let v2 = copy_from_version(&v1, "v2");
    let v3 = copy_from_version(&v2, "v3");

    for name in ["Help", "FAQ", "Contact"] {
        let k1 = by_name(&v1, name).lineage_key().to_string();
        assert_eq!(by_name(&v2, name).lineage_key(), k1);
        assert_eq!(by_name(&v3, name).lineage_key(), k1);
    }
    assert!(compare(&v1, &v3).is_empty());
}

#[test]
fn test_added_and_removed_between_versions() {
    let v1 = help_desk_version("v1");
    let mut v2 = copy_from_version(&v1, "v2");

    let faq_id = by_name(&v2, "FAQ").id.clone();
    v2.remove_node(&faq_id).unwrap();
    let new_id = v2
        .add_child(
            None,
            menuver_core::MenuNode::from_draft(
                VersionScope::new("v2"),
                menuver_core::NodeDraft::click("News", "NEWS"),
            ),
        )
        .unwrap();

    let diff = compare(&v1, &v2);
    assert_eq!(diff.removed.len(), 1);
    assert_eq!(diff.removed[0].lineage_key, "faq");
    assert_eq!(diff.added.len(), 1);
    assert_eq!(diff.added[0].lineage_key, new_id);
    assert!(diff.modified.is_empty());
}

fn shape(tree: &MenuTree<VersionScope>) -> Vec<(usize, String, bool)> {
    tree.walk()
        .iter()
        .map(|n| {
            let depth = tree.depth_of(&n.id).unwrap();
            (depth, n.name.clone(), n.enabled)
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_copy_is_isomorphic(
        roots in proptest::collection::vec((any::<bool>(), 0usize..=5), 0..=3)
    ) {
        let mut tree: MenuTree<VersionScope> = MenuTree::new();
        for (r, (enabled, child_count)) in roots.iter().enumerate() {
            let mut draft = menuver_core::NodeDraft::click(format!("r{}", r), "K");
            if !enabled {
                draft = draft.disabled();
            }
            let root_id = tree
                .add_child(None, menuver_core::MenuNode::from_draft(VersionScope::new("src"), draft))
                .unwrap();
            for c in 0..*child_count {
                tree.add_child(
                    Some(&root_id),
                    menuver_core::MenuNode::from_draft(
                        VersionScope::new("src"),
                        menuver_core::NodeDraft::view(format!("r{}c{}", r, c), "https://x"),
                    ),
                )
                .unwrap();
            }
        }

        let copy = copy_from_version(&tree, "dst");

        prop_assert_eq!(copy.len(), tree.len());
        prop_assert_eq!(shape(&copy), shape(&tree));
        prop_assert!(compare(&tree, &copy).is_empty());
    }
}
