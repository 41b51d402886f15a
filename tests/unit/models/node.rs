use super::*;

fn ids() -> impl FnMut() -> NodeKey {
    let mut next = 0u32;
    move || {
        next += 1;
        format_compact!("id{next}")
    }
}

#[test]
fn containers_are_exactly_the_four_structural_types() {
    let containers = [
        NodeType::Folder,
        NodeType::DbGroup,
        NodeType::DbConnection,
        NodeType::ExternalSys,
    ];
    for kind in containers {
        assert!(kind.is_container(), "{kind} should be a container");
    }
    for kind in [
        NodeType::Frontend,
        NodeType::Backend,
        NodeType::DbTable,
        NodeType::ExternalApi,
        NodeType::File,
        NodeType::Settings,
        NodeType::GitRepo,
    ] {
        assert!(!kind.is_container(), "{kind} should be a leaf");
    }
    assert!(NodeType::DbGroup.is_lazy());
    assert!(!NodeType::Folder.is_lazy());
}

#[test]
fn node_type_uses_wire_names() {
    assert_eq!(serde_json::to_string(&NodeType::DbGroup).unwrap(), "\"dbGroup\"");
    assert_eq!(serde_json::to_string(&NodeType::GitRepo).unwrap(), "\"git_repo\"");
    assert_eq!(serde_json::to_string(&RootType::External).unwrap(), "\"external\"");

    let kind: NodeType = serde_json::from_str("\"externalSys\"").unwrap();
    assert_eq!(kind, NodeType::ExternalSys);
}

#[test]
fn node_deserializes_from_backend_json() {
    let json = r#"{
        "id": "f1",
        "name": "home",
        "type": "folder",
        "children": [{"id": "p1", "name": "index.html", "type": "frontend", "parentId": "f1"}],
        "lastModified": "2024-01-01"
    }"#;
    let node: Node = serde_json::from_str(json).unwrap();
    assert_eq!(node.kind, NodeType::Folder);
    assert!(!node.is_open);
    assert_eq!(node.load_state, LoadState::Unloaded);
    assert_eq!(node.last_modified.as_deref(), Some("2024-01-01"));
    let child = &node.children.as_ref().unwrap()[0];
    assert_eq!(child.parent_id.as_deref(), Some("f1"));
    assert!(child.children.is_none());
}

#[test]
fn open_flag_is_not_serialized() {
    let mut node = Node::new("a", "a", NodeType::Folder);
    node.is_open = true;
    let json = serde_json::to_string(&node).unwrap();
    assert!(!json.contains("isOpen"));
}

#[test]
fn connection_is_built_with_all_six_groups_in_order() {
    let conn = Node::connection("MainDB", ids());
    assert_eq!(conn.kind, NodeType::DbConnection);
    let groups = conn.children.as_ref().unwrap();
    let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(
        names,
        ["Tables", "Views", "Functions", "Procedures", "Triggers", "Queries"]
    );
    for group in groups {
        assert_eq!(group.kind, NodeType::DbGroup);
        assert_eq!(group.parent_id.as_deref(), Some(conn.id.as_str()));
        assert!(group.children.is_none());
        assert!(group.needs_fetch());
    }
}

#[test]
fn db_group_kind_resolves_by_name_only_for_groups() {
    let group = Node::new("g", "Views", NodeType::DbGroup);
    assert_eq!(group.db_group_kind(), Some(DbGroupKind::Views));
    assert_eq!(DbGroupKind::Views.leaf_type(), NodeType::DbView);

    let folder = Node::new("f", "Views", NodeType::Folder);
    assert_eq!(folder.db_group_kind(), None);
}

#[test]
fn needs_fetch_only_for_closed_empty_lazy_groups() {
    let mut group = Node::new("g", "Tables", NodeType::DbGroup);
    assert!(group.needs_fetch());

    group.load_state = LoadState::Loading;
    assert!(!group.needs_fetch());

    group.load_state = LoadState::Failed;
    assert!(group.needs_fetch());

    group.children = Some(vec![Arc::new(Node::new("t", "users", NodeType::DbTable))]);
    assert!(!group.needs_fetch());
}

#[test]
fn accepts_child_follows_the_hierarchy() {
    let folder = Node::new("f", "dir", NodeType::Folder);
    let tables = Node::new("g", "Tables", NodeType::DbGroup);
    let conn = Node::new("c", "MainDB", NodeType::DbConnection);
    let system = Node::new("s", "Payments", NodeType::ExternalSys);
    let page = Node::new("p", "a.html", NodeType::Frontend);
    let table = Node::new("t", "users", NodeType::DbTable);
    let view = Node::new("v", "active", NodeType::DbView);
    let api = Node::new("a", "charge", NodeType::ExternalApi);

    assert!(folder.accepts_child(&page));
    assert!(folder.accepts_child(&folder));
    assert!(!folder.accepts_child(&conn));
    assert!(!folder.accepts_child(&tables));
    assert!(tables.accepts_child(&table));
    assert!(!tables.accepts_child(&view));
    assert!(!conn.accepts_child(&tables));
    assert!(!conn.accepts_child(&table));
    assert!(system.accepts_child(&api));
    assert!(!system.accepts_child(&page));
    assert!(!page.accepts_child(&page));
}

#[test]
fn normalize_create_forces_system_containers_at_top_level() {
    let new_node = normalize_create(RootType::Models, None, NewNode::new("db", NodeType::Folder));
    assert_eq!(new_node.kind, NodeType::DbConnection);

    let new_node = normalize_create(RootType::External, None, NewNode::new("pay", NodeType::File));
    assert_eq!(new_node.kind, NodeType::ExternalSys);

    let new_node = normalize_create(
        RootType::Models,
        Some("group"),
        NewNode::new("users", NodeType::DbTable),
    );
    assert_eq!(new_node.kind, NodeType::DbTable);

    let new_node = normalize_create(RootType::Pages, None, NewNode::new("x", NodeType::Folder));
    assert_eq!(new_node.kind, NodeType::Folder);
}

#[test]
fn copy_name_keeps_extension() {
    assert_eq!(copy_name("page.html"), "page_copy.html");
    assert_eq!(copy_name("archive.tar.gz"), "archive.tar_copy.gz");
    assert_eq!(copy_name("README"), "README_copy");
    assert_eq!(copy_name(".env"), ".env_copy");
}

#[test]
fn icon_resolution_prefers_type_then_extension() {
    let table = Node::new("t", "users.sql", NodeType::DbTable);
    assert_eq!(icon_family(&table), IconKind::Table);

    let page = Node::new("p", "index.html", NodeType::Frontend);
    assert_eq!(icon_family(&page), IconKind::Html);

    let styled = Node::new("s", "theme.CSS", NodeType::File);
    assert_eq!(icon_family(&styled), IconKind::Style);

    let plain = Node::new("b", "checkout", NodeType::Backend);
    assert_eq!(icon_family(&plain), IconKind::Flow);
}

#[test]
fn folder_icon_ignores_extension_and_tracks_open_state() {
    let mut folder = Node::new("f", "assets.json", NodeType::Folder);
    assert_eq!(icon_family(&folder), IconKind::Folder);
    folder.is_open = true;
    assert_eq!(icon_family(&folder), IconKind::FolderOpen);
}

#[test]
fn root_metadata() {
    assert_eq!(RootType::ALL.len(), 5);
    for (i, root) in RootType::ALL.into_iter().enumerate() {
        assert_eq!(root.index(), i);
    }
    assert!(RootType::Apis.supports_git());
    assert!(!RootType::Models.supports_git());
    assert_eq!(RootType::Apis.default_leaf(), NodeType::Backend);
}
