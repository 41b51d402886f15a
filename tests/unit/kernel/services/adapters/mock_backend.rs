use std::future::Future;

use super::*;

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn demo() -> MockBackend {
    MockBackend::with_demo_project(Duration::ZERO)
}

fn names(nodes: &[Node]) -> Vec<&str> {
    nodes.iter().map(|n| n.name.as_str()).collect()
}

fn tables_group(backend: &MockBackend) -> Node {
    let models = block_on(backend.fetch_tree(RootType::Models)).unwrap();
    models[0]
        .children
        .iter()
        .flatten()
        .find(|g| g.name == "Tables")
        .map(|g| Node::clone(g))
        .unwrap()
}

#[test]
fn demo_project_seeds_every_root() {
    let backend = demo();
    for root in RootType::ALL {
        assert!(
            !block_on(backend.fetch_tree(root)).unwrap().is_empty(),
            "{root} is empty"
        );
    }
    let pages = block_on(backend.fetch_tree(RootType::Pages)).unwrap();
    assert_eq!(names(&pages), ["home", "theme.css"]);
    assert_eq!(backend.calls(MockOp::FetchTree), RootType::ALL.len() + 1);
}

#[test]
fn fetch_tree_leaves_group_children_to_fetch_children() {
    let backend = demo();
    let tables = tables_group(&backend);
    assert_eq!(tables.children, None);

    let children = block_on(backend.fetch_children(tables.id.clone(), tables.kind)).unwrap();
    assert_eq!(names(&children), ["users", "orders"]);
}

#[test]
fn fetch_children_rejects_non_lazy_nodes_and_unknown_ids() {
    let backend = demo();
    let err = block_on(backend.fetch_children("n1".into(), NodeType::Folder)).unwrap_err();
    assert!(matches!(err, BackendError::InvalidTarget(_)));

    let err = block_on(backend.fetch_children("missing".into(), NodeType::DbGroup)).unwrap_err();
    assert_eq!(err, BackendError::NotFound("missing".into()));
}

#[test]
fn create_assigns_ids_and_parent() {
    let backend = MockBackend::new(Duration::ZERO);
    let folder = block_on(backend.create_node(
        RootType::Pages,
        None,
        NewNode::new("docs", NodeType::Folder),
    ))
    .unwrap();
    let page = block_on(backend.create_node(
        RootType::Pages,
        Some(folder.id.clone()),
        NewNode::new("intro.html", NodeType::Frontend),
    ))
    .unwrap();
    assert_ne!(folder.id, page.id);
    assert_eq!(page.parent_id, Some(folder.id.clone()));

    let snapshot = backend.snapshot(RootType::Pages);
    assert!(models::find_by_id(&snapshot, &page.id).is_some());

    let err = block_on(backend.create_node(
        RootType::Pages,
        Some(page.id.clone()),
        NewNode::new("nested.html", NodeType::Frontend),
    ))
    .unwrap_err();
    assert!(matches!(err, BackendError::InvalidTarget(_)));
}

#[test]
fn created_connections_come_with_six_groups() {
    let backend = MockBackend::new(Duration::ZERO);
    let conn = block_on(backend.create_node(
        RootType::Models,
        None,
        NewNode::new("Replica", NodeType::DbConnection),
    ))
    .unwrap();
    let groups: Vec<&str> = conn
        .children
        .iter()
        .flatten()
        .map(|g| g.name.as_str())
        .collect();
    assert_eq!(
        groups,
        ["Tables", "Views", "Functions", "Procedures", "Triggers", "Queries"]
    );
}

#[test]
fn rename_move_and_delete_apply_to_the_store() {
    let backend = MockBackend::new(Duration::ZERO);
    let dir = backend
        .seed(RootType::Apis, None, Node::new("d", "orders", NodeType::Folder))
        .unwrap();
    backend.seed(RootType::Apis, None, Node::new("f", "list.flow", NodeType::Backend));

    block_on(backend.update_node(
        "f".into(),
        NodeUpdate {
            name: Some("list_all.flow".into()),
        },
    ))
    .unwrap();
    block_on(backend.move_node("f".into(), dir.clone(), RootType::Apis)).unwrap();

    let snapshot = backend.snapshot(RootType::Apis);
    let moved = models::find_by_id(&snapshot, "f").unwrap();
    assert_eq!(moved.name, "list_all.flow");
    assert_eq!(moved.parent_id.as_deref(), Some("d"));

    block_on(backend.delete_node(dir)).unwrap();
    assert!(backend.snapshot(RootType::Apis).is_empty());
    assert_eq!(
        block_on(backend.delete_node("f".into())).unwrap_err(),
        BackendError::NotFound("f".into())
    );
}

#[test]
fn moves_respect_the_node_hierarchy() {
    let backend = MockBackend::new(Duration::ZERO);
    let connect = |name: &str| {
        block_on(backend.create_node(
            RootType::Models,
            None,
            NewNode::new(name, NodeType::DbConnection),
        ))
        .unwrap()
    };
    let group = |conn: &Node, name: &str| -> NodeKey {
        conn.children
            .iter()
            .flatten()
            .find(|g| g.name == name)
            .map(|g| g.id.clone())
            .unwrap()
    };
    let main = connect("MainDB");
    let other = connect("Other");
    let users = block_on(backend.create_node(
        RootType::Models,
        Some(group(&main, "Tables")),
        NewNode::new("users", NodeType::DbTable),
    ))
    .unwrap();

    let rejected = [
        (users.id.clone(), main.id.clone()),
        (other.id.clone(), main.id.clone()),
        (users.id.clone(), group(&main, "Views")),
    ];
    for (dragged, target) in rejected {
        let err = block_on(backend.move_node(dragged, target, RootType::Models)).unwrap_err();
        assert!(matches!(err, BackendError::InvalidTarget(_)));
    }

    let other_tables = group(&other, "Tables");
    block_on(backend.move_node(users.id.clone(), other_tables.clone(), RootType::Models)).unwrap();

    let snapshot = backend.snapshot(RootType::Models);
    let main = models::find_by_id(&snapshot, &main.id).unwrap();
    assert_eq!(main.children.as_ref().unwrap().len(), 6);
    let moved = models::find_by_id(&snapshot, &users.id).unwrap();
    assert_eq!(moved.parent_id.as_ref(), Some(&other_tables));
}

#[test]
fn copies_are_deep_and_named_after_the_source() {
    let backend = MockBackend::new(Duration::ZERO);
    let dir = Node::new("d", "orders", NodeType::Folder)
        .with_children(vec![Node::new("f", "create.flow", NodeType::Backend)]);
    backend.seed(RootType::Apis, None, dir);

    let copy = block_on(backend.copy_node("d".into())).unwrap();
    assert_eq!(copy.name, "orders_copy");
    assert_ne!(copy.id, "d");
    let child = &copy.children.as_ref().unwrap()[0];
    assert_ne!(child.id, "f");
    assert_eq!(child.parent_id.as_ref(), Some(&copy.id));

    let again = block_on(backend.copy_node("f".into())).unwrap();
    assert_eq!(again.name, "create_copy.flow");
    assert_eq!(again.parent_id.as_deref(), Some("d"));
    assert_eq!(backend.snapshot(RootType::Apis).len(), 2);
}

#[test]
fn groups_cannot_be_copied() {
    let backend = demo();
    let tables = tables_group(&backend);
    let err = block_on(backend.copy_node(tables.id)).unwrap_err();
    assert!(matches!(err, BackendError::InvalidTarget(_)));
}

#[test]
fn injected_failures_apply_per_operation() {
    let backend = demo();
    backend.fail_on(MockOp::FetchTree, "offline");

    let err = block_on(backend.fetch_tree(RootType::Pages)).unwrap_err();
    assert_eq!(err, BackendError::Unavailable("offline".into()));
    assert!(block_on(backend.create_node(
        RootType::Pages,
        None,
        NewNode::new("x.html", NodeType::Frontend),
    ))
    .is_ok());

    backend.clear_failures();
    assert!(block_on(backend.fetch_tree(RootType::Pages)).is_ok());
    assert_eq!(backend.calls(MockOp::FetchTree), 2);
}
