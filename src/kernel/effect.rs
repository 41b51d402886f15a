use crate::models::{NewNode, NodeKey, NodeType, NodeUpdate, RootType};

/// Backend work requested by a reducer. Executed by the async runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchTree {
        root: RootType,
        request: u64,
    },
    FetchChildren {
        root: RootType,
        id: NodeKey,
        kind: NodeType,
    },
    CreateNode {
        root: RootType,
        parent: Option<NodeKey>,
        new_node: NewNode,
        open: bool,
    },
    UpdateNode {
        root: RootType,
        id: NodeKey,
        update: NodeUpdate,
    },
    DeleteNode {
        root: RootType,
        id: NodeKey,
    },
    MoveNode {
        root: RootType,
        dragged: NodeKey,
        target: NodeKey,
        from_cut: bool,
    },
    CopyNode {
        root: RootType,
        source: NodeKey,
        paste_target: Option<NodeKey>,
    },
}

impl Effect {
    pub fn root(&self) -> RootType {
        match self {
            Effect::FetchTree { root, .. }
            | Effect::FetchChildren { root, .. }
            | Effect::CreateNode { root, .. }
            | Effect::UpdateNode { root, .. }
            | Effect::DeleteNode { root, .. }
            | Effect::MoveNode { root, .. }
            | Effect::CopyNode { root, .. } => *root,
        }
    }
}
