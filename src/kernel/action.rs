use compact_str::CompactString;
use std::time::Instant;

use crate::models::{NewNode, Node, NodeKey, NodeType, RootType};

use super::tabs::TabId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOp {
    Create,
    Rename,
    Delete,
    Move,
    Copy,
}

impl MutationOp {
    pub fn as_str(self) -> &'static str {
        match self {
            MutationOp::Create => "create",
            MutationOp::Rename => "rename",
            MutationOp::Delete => "delete",
            MutationOp::Move => "move",
            MutationOp::Copy => "copy",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    Tick {
        now: Instant,
    },
    RefreshAll,
    RefreshRoot {
        root: RootType,
    },
    RefreshChildren {
        root: RootType,
        id: NodeKey,
    },

    ExplorerClick {
        root: RootType,
        id: NodeKey,
    },
    ExplorerToggleExpand {
        root: RootType,
        id: NodeKey,
    },
    ExplorerToggleSection {
        root: RootType,
    },
    ExplorerSetFilter {
        query: String,
    },
    ExplorerContextMenuOpen {
        root: RootType,
        target: Option<NodeKey>,
        x: u16,
        y: u16,
    },
    ExplorerContextMenuMoveSelection {
        delta: isize,
    },
    ExplorerContextMenuConfirm,
    ExplorerContextMenuClick {
        index: usize,
    },
    ExplorerContextMenuClose,
    /// A drop of a serialized drag payload onto `target`.
    ExplorerDrop {
        root: RootType,
        target: NodeKey,
        payload: String,
    },

    BeginCreate {
        root: RootType,
        parent: Option<NodeKey>,
        kind: NodeType,
    },
    BeginRename {
        root: RootType,
        id: NodeKey,
    },
    BeginDelete {
        root: RootType,
        id: NodeKey,
    },
    InputDialogSetValue {
        value: String,
    },
    InputDialogSubmit,
    InputDialogCancel,
    ConfirmDialogAccept,
    ConfirmDialogCancel,

    CreateNode {
        root: RootType,
        parent: Option<NodeKey>,
        new_node: NewNode,
        open: bool,
    },
    MoveNode {
        root: RootType,
        payload_root: RootType,
        dragged: NodeKey,
        target: NodeKey,
    },
    DuplicateNode {
        root: RootType,
        id: NodeKey,
    },
    CutNode {
        root: RootType,
        id: NodeKey,
    },
    CopyNode {
        root: RootType,
        id: NodeKey,
    },
    PasteNode {
        root: RootType,
        target: NodeKey,
    },

    OpenNode {
        root: RootType,
        id: NodeKey,
    },
    OpenSettings,
    OpenGit {
        root: RootType,
    },
    ActivateTab {
        tab: TabId,
    },
    CloseTab {
        tab: TabId,
    },
    CloseOtherTabs {
        tab: TabId,
    },
    CloseAllTabs,
    CloseTabsRight {
        tab: TabId,
    },
    CloseTabsLeft {
        tab: TabId,
    },
    ReorderTabs {
        dragged: TabId,
        target: TabId,
    },

    SetSidebarWidth {
        width: u16,
    },
    SetBottomPanelHeight {
        height: u16,
    },
    ToggleBottomPanel,
    /// Lines from the log feed, shown in the bottom panel.
    AppendLog {
        lines: Vec<String>,
    },
    DismissNotification {
        id: u64,
    },

    TreeLoaded {
        root: RootType,
        request: u64,
        nodes: Vec<Node>,
    },
    TreeLoadFailed {
        root: RootType,
        request: u64,
        error: String,
    },
    ChildrenLoaded {
        root: RootType,
        id: NodeKey,
        children: Vec<Node>,
    },
    ChildrenLoadFailed {
        root: RootType,
        id: NodeKey,
        error: String,
    },
    NodeCreated {
        root: RootType,
        parent: Option<NodeKey>,
        node: Node,
        open: bool,
    },
    NodeRenamed {
        root: RootType,
        id: NodeKey,
        name: CompactString,
    },
    NodeDeleted {
        root: RootType,
        id: NodeKey,
    },
    NodeMoved {
        root: RootType,
        dragged: NodeKey,
        target: NodeKey,
        from_cut: bool,
    },
    NodeCopied {
        root: RootType,
        source: NodeKey,
        node: Node,
        paste_target: Option<NodeKey>,
    },
    MutationFailed {
        root: RootType,
        op: MutationOp,
        /// Node the call acted on: the parent for a create, the dragged node
        /// for a move, the source for a copy.
        subject: Option<NodeKey>,
        error: String,
    },
}
