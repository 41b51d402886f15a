//! Data models: project nodes and forest algorithms.

pub mod forest;
pub mod node;

pub use forest::{
    contains, descendant_ids, filter_forest, find_by_id, first_leaf, flatten_rows, insert_child,
    is_ancestor, merge_ui_state, move_destination, move_node, remove_by_id, update_by_id, Forest,
    TreeRow,
};
pub use node::{
    copy_name, icon_family, normalize_create, DbGroupKind, FileType, IconKind, LoadState,
    NewNode, Node, NodeKey, NodeType, NodeUpdate, RootType,
};
