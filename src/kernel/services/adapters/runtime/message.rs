use crate::kernel::services::ports::BackendResult;
use crate::models::{Node, NodeKey, NodeUpdate, RootType};

/// Result of one backend call, tagged with everything needed to apply it.
#[derive(Debug)]
pub enum AppMessage {
    TreeLoaded {
        root: RootType,
        request: u64,
        result: BackendResult<Vec<Node>>,
    },
    ChildrenLoaded {
        root: RootType,
        id: NodeKey,
        result: BackendResult<Vec<Node>>,
    },
    NodeCreated {
        root: RootType,
        parent: Option<NodeKey>,
        open: bool,
        result: BackendResult<Node>,
    },
    NodeUpdated {
        root: RootType,
        id: NodeKey,
        update: NodeUpdate,
        result: BackendResult<()>,
    },
    NodeDeleted {
        root: RootType,
        id: NodeKey,
        result: BackendResult<()>,
    },
    NodeMoved {
        root: RootType,
        dragged: NodeKey,
        target: NodeKey,
        from_cut: bool,
        result: BackendResult<()>,
    },
    NodeCopied {
        root: RootType,
        source: NodeKey,
        paste_target: Option<NodeKey>,
        result: BackendResult<Node>,
    },
}
