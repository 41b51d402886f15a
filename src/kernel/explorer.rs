//! Explorer view model: sections, filtering, context menus and drag payloads.

use serde::{Deserialize, Serialize};

use crate::models::{self, DbGroupKind, Node, NodeKey, NodeType, RootType, TreeRow};

use super::selection::ClipboardEntry;
use super::tree::{RootLoad, TreeStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorerMenuAction {
    Open,
    NewFile,
    NewFolder,
    NewConnection,
    NewExternalSystem,
    NewApi,
    NewDbObject(DbGroupKind),
    Rename,
    Delete,
    Cut,
    Copy,
    Duplicate,
    Paste,
    ToggleExpand,
    Refresh,
    OpenGit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenuEntry {
    pub label: &'static str,
    pub action: ExplorerMenuAction,
    pub enabled: bool,
}

impl ContextMenuEntry {
    fn action(label: &'static str, action: ExplorerMenuAction) -> Self {
        Self {
            label,
            action,
            enabled: true,
        }
    }

    fn toggled(label: &'static str, action: ExplorerMenuAction, enabled: bool) -> Self {
        Self {
            label,
            action,
            enabled,
        }
    }
}

fn new_object_label(kind: DbGroupKind) -> &'static str {
    match kind {
        DbGroupKind::Tables => "New Table",
        DbGroupKind::Views => "New View",
        DbGroupKind::Functions => "New Function",
        DbGroupKind::Procedures => "New Procedure",
        DbGroupKind::Triggers => "New Trigger",
        DbGroupKind::Queries => "New Query",
    }
}

/// Menu for a right-click on `target` (or on the section background when `None`).
pub fn context_menu_entries(
    target: Option<&Node>,
    root: RootType,
    clipboard: Option<&ClipboardEntry>,
) -> Vec<ContextMenuEntry> {
    use ExplorerMenuAction as A;

    let can_paste = |node: &Node| {
        clipboard.is_some_and(|entry| entry.root == root && node.accepts_child(&entry.node))
    };

    let mut items = Vec::new();
    match target {
        None => match root {
            RootType::Models => items.push(ContextMenuEntry::action("New Connection", A::NewConnection)),
            RootType::External => {
                items.push(ContextMenuEntry::action("New External System", A::NewExternalSystem))
            }
            RootType::Pages | RootType::Apps | RootType::Apis => {
                items.push(ContextMenuEntry::action("New File", A::NewFile));
                items.push(ContextMenuEntry::action("New Folder", A::NewFolder));
            }
        },
        Some(node) => match node.kind {
            NodeType::Folder => {
                items.push(ContextMenuEntry::action("New File", A::NewFile));
                items.push(ContextMenuEntry::action("New Folder", A::NewFolder));
                items.push(ContextMenuEntry::action("Rename", A::Rename));
                items.push(ContextMenuEntry::action("Delete", A::Delete));
                items.push(ContextMenuEntry::action("Cut", A::Cut));
                items.push(ContextMenuEntry::action("Copy", A::Copy));
                items.push(ContextMenuEntry::action("Duplicate", A::Duplicate));
                items.push(ContextMenuEntry::toggled("Paste", A::Paste, can_paste(node)));
                if node.has_children() {
                    let label = if node.is_open { "Collapse" } else { "Expand" };
                    items.push(ContextMenuEntry::action(label, A::ToggleExpand));
                }
            }
            NodeType::DbConnection => {
                items.push(ContextMenuEntry::action("Open", A::Open));
                items.push(ContextMenuEntry::action("Rename", A::Rename));
                items.push(ContextMenuEntry::action("Delete", A::Delete));
                items.push(ContextMenuEntry::action("Refresh", A::Refresh));
            }
            NodeType::DbGroup => {
                if let Some(kind) = node.db_group_kind() {
                    items.push(ContextMenuEntry::action(
                        new_object_label(kind),
                        A::NewDbObject(kind),
                    ));
                }
                items.push(ContextMenuEntry::action("Refresh", A::Refresh));
            }
            NodeType::ExternalSys => {
                items.push(ContextMenuEntry::action("Open", A::Open));
                items.push(ContextMenuEntry::action("New API", A::NewApi));
                items.push(ContextMenuEntry::action("Rename", A::Rename));
                items.push(ContextMenuEntry::action("Delete", A::Delete));
            }
            _ => {
                items.push(ContextMenuEntry::action("Open", A::Open));
                items.push(ContextMenuEntry::action("Rename", A::Rename));
                items.push(ContextMenuEntry::action("Delete", A::Delete));
                items.push(ContextMenuEntry::action("Cut", A::Cut));
                items.push(ContextMenuEntry::action("Copy", A::Copy));
                items.push(ContextMenuEntry::action("Duplicate", A::Duplicate));
                items.push(ContextMenuEntry::toggled("Paste", A::Paste, can_paste(node)));
            }
        },
    }

    let is_db_node = target.is_some_and(|n| {
        matches!(n.kind, NodeType::DbConnection | NodeType::DbGroup | NodeType::ExternalSys)
    });
    if root.supports_git() && !is_db_node {
        items.push(ContextMenuEntry::action("Git Repository", A::OpenGit));
    }
    if target.is_none() {
        items.push(ContextMenuEntry::action("Refresh", A::Refresh));
    }
    items
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContextMenuState {
    pub visible: bool,
    pub anchor: (u16, u16),
    pub root: Option<RootType>,
    pub target: Option<NodeKey>,
    pub selected: usize,
    pub items: Vec<ContextMenuEntry>,
}

/// Serialized drag data, tagged with the root it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub id: NodeKey,
    pub root_type: RootType,
}

impl DragPayload {
    pub fn new(root: RootType, id: impl Into<NodeKey>) -> Self {
        Self {
            id: id.into(),
            root_type: root,
        }
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn decode(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring malformed drag payload");
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerSection {
    pub root: RootType,
    pub title: &'static str,
    pub collapsed: bool,
    pub load: RootLoad,
    pub rows: Vec<TreeRow>,
}

#[derive(Debug, Clone, Default)]
pub struct ExplorerState {
    collapsed: [bool; 5],
    pub filter: String,
    pub context_menu: ContextMenuState,
}

impl ExplorerState {
    pub fn is_section_collapsed(&self, root: RootType) -> bool {
        self.collapsed[root.index()]
    }

    pub fn toggle_section(&mut self, root: RootType) -> bool {
        let slot = &mut self.collapsed[root.index()];
        *slot = !*slot;
        true
    }

    pub fn set_filter(&mut self, query: &str) -> bool {
        if self.filter == query {
            return false;
        }
        self.filter = query.to_string();
        true
    }

    pub fn sections(&self, tree: &TreeStore) -> Vec<ExplorerSection> {
        RootType::ALL
            .into_iter()
            .map(|root| {
                let collapsed = self.is_section_collapsed(root);
                let rows = if collapsed {
                    Vec::new()
                } else {
                    let visible = models::filter_forest(tree.nodes(root), &self.filter);
                    models::flatten_rows(&visible)
                };
                ExplorerSection {
                    root,
                    title: root.title(),
                    collapsed,
                    load: tree.root(root).load,
                    rows,
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/explorer.rs"]
mod tests;
