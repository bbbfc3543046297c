//! Tree mutation commands against live and version targets.

mod common;

use common::{count_rows, ctx, live, seed_help_desk, setup_db, ACCOUNT};
use menuver_core::errors::ExErrorKind;
use menuver_core::{NodeDraft, NodePatch, RecordingRemotePublisher};
use menuver_engine::{
    add_node, create_version, load_tree, move_node, publish, remove_node, reorder_nodes,
    set_node_enabled, update_node, MenuTarget, TargetTree,
};

fn live_names(conn: &rusqlite::Connection) -> Vec<String> {
    match load_tree(conn, &live()).unwrap() {
        TargetTree::Live(tree) => tree.walk().iter().map(|n| n.name.clone()).collect(),
        TargetTree::Version(_) => panic!("expected live tree"),
    }
}

#[test]
fn test_add_node_persists_in_order() {
    let mut conn = setup_db();
    seed_help_desk(&mut conn);

    assert_eq!(live_names(&conn), vec!["Help", "FAQ", "Contact"]);
    assert_eq!(count_rows(&conn, "menu_nodes"), 3);
}

#[test]
fn test_fourth_root_rejected() {
    let mut conn = setup_db();
    let ctx = ctx();
    for name in ["A", "B", "C"] {
        add_node(&mut conn, &ctx, &live(), None, NodeDraft::click(name, name)).unwrap();
    }

    let err = add_node(&mut conn, &ctx, &live(), None, NodeDraft::click("D", "D")).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::StructureLimit);
    assert_eq!(err.op(), Some("add_node"));
    assert_eq!(count_rows(&conn, "menu_nodes"), 3);
}

#[test]
fn test_sixth_child_rejected() {
    let mut conn = setup_db();
    let ctx = ctx();
    let root = add_node(&mut conn, &ctx, &live(), None, NodeDraft::new("Root", menuver_core::MenuKind::Click)).unwrap();
    for i in 0..5 {
        let name = format!("C{}", i);
        add_node(&mut conn, &ctx, &live(), Some(&root), NodeDraft::click(&name, &name)).unwrap();
    }

    let err = add_node(
        &mut conn,
        &ctx,
        &live(),
        Some(&root),
        NodeDraft::click("C5", "C5"),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::StructureLimit);
    assert_eq!(count_rows(&conn, "menu_nodes"), 6);
}

#[test]
fn test_third_level_rejected() {
    let mut conn = setup_db();
    let ids = seed_help_desk(&mut conn);

    let err = add_node(
        &mut conn,
        &ctx(),
        &live(),
        Some(&ids.faq),
        NodeDraft::click("Deep", "DEEP"),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::StructureLimit);
}

#[test]
fn test_missing_parent_is_not_found() {
    let mut conn = setup_db();
    let err = add_node(
        &mut conn,
        &ctx(),
        &live(),
        Some("no-such-node"),
        NodeDraft::click("X", "X"),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_update_node_changes_fields() {
    let mut conn = setup_db();
    let ids = seed_help_desk(&mut conn);

    update_node(
        &mut conn,
        &ctx(),
        &live(),
        &ids.contact,
        NodePatch::rename("Call us"),
    )
    .unwrap();

    assert_eq!(live_names(&conn), vec!["Help", "FAQ", "Call us"]);
}

#[test]
fn test_empty_patch_rejected() {
    let mut conn = setup_db();
    let ids = seed_help_desk(&mut conn);

    let err = update_node(&mut conn, &ctx(), &live(), &ids.contact, NodePatch::default())
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_remove_node_with_children_rejected() {
    let mut conn = setup_db();
    let ids = seed_help_desk(&mut conn);

    let err = remove_node(&mut conn, &ctx(), &live(), &ids.help).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::HasChildren);

    remove_node(&mut conn, &ctx(), &live(), &ids.faq).unwrap();
    remove_node(&mut conn, &ctx(), &live(), &ids.help).unwrap();
    assert_eq!(live_names(&conn), vec!["Contact"]);
}

#[test]
fn test_move_node_cycle_rejected() {
    let mut conn = setup_db();
    let ids = seed_help_desk(&mut conn);

    let err = move_node(&mut conn, &ctx(), &live(), &ids.help, Some(&ids.faq)).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::CycleDetected);
}

#[test]
fn test_move_node_places_last() {
    let mut conn = setup_db();
    let ids = seed_help_desk(&mut conn);

    move_node(&mut conn, &ctx(), &live(), &ids.contact, Some(&ids.help)).unwrap();

    assert_eq!(live_names(&conn), vec!["Help", "FAQ", "Contact"]);
    match load_tree(&conn, &live()).unwrap() {
        TargetTree::Live(tree) => {
            let children: Vec<&str> = tree
                .children(&ids.help)
                .iter()
                .map(|n| n.id.as_str())
                .collect();
            assert_eq!(children, vec![ids.faq.as_str(), ids.contact.as_str()]);
        }
        TargetTree::Version(_) => panic!("expected live tree"),
    }
}

#[test]
fn test_reorder_roots() {
    let mut conn = setup_db();
    let ids = seed_help_desk(&mut conn);

    reorder_nodes(
        &mut conn,
        &ctx(),
        &live(),
        None,
        vec![ids.contact.clone(), ids.help.clone()],
    )
    .unwrap();

    assert_eq!(live_names(&conn), vec!["Contact", "Help", "FAQ"]);
}

#[test]
fn test_reorder_with_wrong_set_rejected() {
    let mut conn = setup_db();
    let ids = seed_help_desk(&mut conn);

    let err = reorder_nodes(&mut conn, &ctx(), &live(), None, vec![ids.help.clone()])
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_disable_does_not_cascade() {
    let mut conn = setup_db();
    let ids = seed_help_desk(&mut conn);

    set_node_enabled(&mut conn, &ctx(), &live(), &ids.help, false).unwrap();

    match load_tree(&conn, &live()).unwrap() {
        TargetTree::Live(tree) => {
            assert!(!tree.get(&ids.help).unwrap().enabled);
            assert!(tree.get(&ids.faq).unwrap().enabled);
        }
        TargetTree::Version(_) => panic!("expected live tree"),
    }
}

#[test]
fn test_edit_draft_version_leaves_live_alone() {
    let mut conn = setup_db();
    seed_help_desk(&mut conn);
    let version = create_version(&mut conn, &ctx(), ACCOUNT, "edit me", None, None).unwrap();
    let target = MenuTarget::version(&version.id);

    add_node(&mut conn, &ctx(), &target, None, NodeDraft::click("Promo", "PROMO")).unwrap();

    assert_eq!(load_tree(&conn, &target).unwrap().len(), 4);
    assert_eq!(load_tree(&conn, &live()).unwrap().len(), 3);
}

#[test]
fn test_edit_published_version_rejected() {
    let mut conn = setup_db();
    seed_help_desk(&mut conn);
    let version = create_version(&mut conn, &ctx(), ACCOUNT, "release", None, None).unwrap();
    publish(&mut conn, &ctx(), &version.id, &RecordingRemotePublisher::new()).unwrap();

    let err = add_node(
        &mut conn,
        &ctx(),
        &MenuTarget::version(&version.id),
        None,
        NodeDraft::click("Late", "LATE"),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotDraft);
    assert_eq!(err.version_id(), Some(version.id.as_str()));
}

#[test]
fn test_edit_missing_version_not_found() {
    let mut conn = setup_db();
    let err = add_node(
        &mut conn,
        &ctx(),
        &MenuTarget::version("missing"),
        None,
        NodeDraft::click("X", "X"),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
}
