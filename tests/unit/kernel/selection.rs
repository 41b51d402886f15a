use super::*;
use crate::models::NodeType;

fn node(id: &str, kind: NodeType) -> Arc<Node> {
    Arc::new(Node::new(id, id, kind))
}

#[test]
fn a_new_clipboard_entry_replaces_the_old_one() {
    let mut selection = SelectionState::default();
    assert!(selection.set_clipboard(
        ClipboardMode::Cut,
        RootType::Pages,
        node("a", NodeType::Frontend)
    ));
    selection.set_clipboard(ClipboardMode::Copy, RootType::Apis, node("b", NodeType::Backend));

    let entry = selection.clipboard().unwrap();
    assert_eq!(entry.mode, ClipboardMode::Copy);
    assert_eq!(entry.root, RootType::Apis);
    assert_eq!(entry.node.id, "b");
}

#[test]
fn paste_plan_depends_on_mode() {
    let mut selection = SelectionState::default();
    let folder = node("dir", NodeType::Folder);

    selection.set_clipboard(ClipboardMode::Cut, RootType::Pages, node("a", NodeType::Frontend));
    assert_eq!(
        selection.plan_paste(RootType::Pages, &folder),
        Some(PastePlan::Move {
            source: "a".into()
        })
    );

    selection.set_clipboard(ClipboardMode::Copy, RootType::Pages, node("a", NodeType::Frontend));
    assert_eq!(
        selection.plan_paste(RootType::Pages, &folder),
        Some(PastePlan::CopyThenMove {
            source: "a".into()
        })
    );
}

#[test]
fn paste_is_rejected_across_roots_and_onto_leaves() {
    let mut selection = SelectionState::default();
    assert_eq!(
        selection.plan_paste(RootType::Pages, &node("dir", NodeType::Folder)),
        None
    );

    selection.set_clipboard(ClipboardMode::Copy, RootType::Pages, node("a", NodeType::Frontend));
    assert_eq!(
        selection.plan_paste(RootType::Apps, &node("dir", NodeType::Folder)),
        None
    );
    assert_eq!(
        selection.plan_paste(RootType::Pages, &node("leaf", NodeType::Frontend)),
        None
    );
}

#[test]
fn only_a_cut_folder_is_refused_as_its_own_target() {
    let mut selection = SelectionState::default();
    let folder = node("dir", NodeType::Folder);
    selection.set_clipboard(ClipboardMode::Cut, RootType::Pages, folder.clone());
    assert_eq!(selection.plan_paste(RootType::Pages, &folder), None);

    selection.set_clipboard(ClipboardMode::Copy, RootType::Pages, folder.clone());
    assert_eq!(
        selection.plan_paste(RootType::Pages, &folder),
        Some(PastePlan::CopyThenMove {
            source: "dir".into()
        })
    );
}

#[test]
fn paste_respects_what_the_target_can_hold() {
    let mut selection = SelectionState::default();
    let connection = node("c", NodeType::DbConnection);
    let tables = Arc::new(Node::new("g1", "Tables", NodeType::DbGroup));
    let views = Arc::new(Node::new("g2", "Views", NodeType::DbGroup));

    selection.set_clipboard(ClipboardMode::Cut, RootType::Models, node("t", NodeType::DbTable));
    assert_eq!(selection.plan_paste(RootType::Models, &connection), None);
    assert_eq!(selection.plan_paste(RootType::Models, &views), None);
    assert!(selection.plan_paste(RootType::Models, &tables).is_some());

    selection.set_clipboard(ClipboardMode::Copy, RootType::Models, connection.clone());
    assert_eq!(selection.plan_paste(RootType::Models, &connection), None);
}

#[test]
fn pasted_copies_settle_once() {
    let mut selection = SelectionState::default();
    selection.track_pasted_copy(RootType::Pages, "n1".into());
    assert!(!selection.settle_pasted_copy(RootType::Apps, "n1"));
    assert!(selection.settle_pasted_copy(RootType::Pages, "n1"));
    assert!(!selection.settle_pasted_copy(RootType::Pages, "n1"));
}

#[test]
fn deleting_the_clipboard_node_or_its_ancestor_clears_it() {
    let mut selection = SelectionState::default();
    selection.set_clipboard(ClipboardMode::Copy, RootType::Pages, node("a", NodeType::Frontend));

    assert!(!selection.clear_clipboard_if_deleted(RootType::Apps, &["a".into()]));
    assert!(!selection.clear_clipboard_if_deleted(RootType::Pages, &["b".into()]));
    assert!(selection.clear_clipboard_if_deleted(RootType::Pages, &["dir".into(), "a".into()]));
    assert!(selection.clipboard().is_none());
}

#[test]
fn renaming_a_cut_source_clears_the_clipboard_but_copy_survives() {
    let mut selection = SelectionState::default();
    selection.set_clipboard(ClipboardMode::Copy, RootType::Pages, node("a", NodeType::Frontend));
    assert!(!selection.clear_clipboard_if_cut_source_renamed(RootType::Pages, "a"));

    selection.set_clipboard(ClipboardMode::Cut, RootType::Pages, node("a", NodeType::Frontend));
    assert!(selection.clear_clipboard_if_cut_source_renamed(RootType::Pages, "a"));
    assert!(selection.clipboard().is_none());
}

#[test]
fn at_most_one_active_node() {
    let mut selection = SelectionState::default();
    assert!(selection.set_active(Some(ActiveNode {
        root: RootType::Pages,
        id: "a".into()
    })));
    assert!(selection.set_active(Some(ActiveNode {
        root: RootType::Apis,
        id: "b".into()
    })));
    assert!(!selection.is_active(RootType::Pages, "a"));
    assert!(selection.is_active(RootType::Apis, "b"));
    assert!(selection.set_active(None));
    assert!(selection.active().is_none());
}
