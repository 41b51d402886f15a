use crate::kernel::explorer::{context_menu_entries, DragPayload, ExplorerMenuAction};
use crate::kernel::Action;
use crate::models::{NodeKey, NodeType, RootType};

use super::DispatchResult;

impl super::Store {
    pub(super) fn reduce_explorer_action(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::ExplorerClick { root, id } => {
                let Some(node) = self.state.tree.find_by_id(root, &id) else {
                    return DispatchResult::state(false);
                };
                if node.is_container() {
                    let (state_changed, effects) = self.state.tree.toggle_expand(root, &id);
                    DispatchResult::with_effects(state_changed, effects)
                } else {
                    let node = node.clone();
                    DispatchResult::state(self.state.tabs.open(&node, root))
                }
            }
            Action::ExplorerToggleExpand { root, id } => {
                let (state_changed, effects) = self.state.tree.toggle_expand(root, &id);
                DispatchResult::with_effects(state_changed, effects)
            }
            Action::ExplorerToggleSection { root } => {
                DispatchResult::state(self.state.explorer.toggle_section(root))
            }
            Action::ExplorerSetFilter { query } => {
                DispatchResult::state(self.state.explorer.set_filter(&query))
            }
            Action::ExplorerContextMenuOpen { root, target, x, y } => {
                if self.state.ui.modal_open() {
                    return DispatchResult::state(false);
                }
                let node = match target.as_deref() {
                    Some(id) => match self.state.tree.find_by_id(root, id) {
                        Some(node) => Some(node.clone()),
                        None => return DispatchResult::state(false),
                    },
                    None => None,
                };
                let items =
                    context_menu_entries(node.as_deref(), root, self.state.selection.clipboard());

                let menu = &mut self.state.explorer.context_menu;
                menu.visible = true;
                menu.anchor = (x, y);
                menu.root = Some(root);
                menu.target = target;
                menu.selected = 0;
                menu.items = items;
                DispatchResult::state(true)
            }
            Action::ExplorerContextMenuMoveSelection { delta } => {
                let menu = &mut self.state.explorer.context_menu;
                if !menu.visible || menu.items.is_empty() {
                    return DispatchResult::state(false);
                }
                let len = menu.items.len() as isize;
                let next = (menu.selected as isize + delta).rem_euclid(len) as usize;
                let prev = menu.selected;
                menu.selected = next;
                DispatchResult::state(prev != next)
            }
            Action::ExplorerContextMenuConfirm => {
                let index = self.state.explorer.context_menu.selected;
                self.confirm_context_menu(index)
            }
            Action::ExplorerContextMenuClick { index } => self.confirm_context_menu(index),
            Action::ExplorerContextMenuClose => {
                let was_visible = self.state.explorer.context_menu.visible;
                self.state.explorer.context_menu = Default::default();
                DispatchResult::state(was_visible)
            }
            Action::ExplorerDrop {
                root,
                target,
                payload,
            } => {
                let Some(payload) = DragPayload::decode(&payload) else {
                    return DispatchResult::state(false);
                };
                self.reduce_mutation_action(Action::MoveNode {
                    root,
                    payload_root: payload.root_type,
                    dragged: payload.id,
                    target,
                })
            }
            _ => DispatchResult::state(false),
        }
    }

    fn confirm_context_menu(&mut self, index: usize) -> DispatchResult {
        let menu = &self.state.explorer.context_menu;
        if !menu.visible {
            return DispatchResult::state(false);
        }
        let Some(entry) = menu.items.get(index) else {
            return DispatchResult::state(false);
        };
        if !entry.enabled {
            return DispatchResult::state(false);
        }
        let Some(root) = menu.root else {
            return DispatchResult::state(false);
        };
        let action = entry.action;
        let target = menu.target.clone();
        self.state.explorer.context_menu = Default::default();

        tracing::debug!(root = %root, ?action, target = ?target, "context menu action");
        let mut result = match menu_intent(action, root, target) {
            Some(intent) => self.dispatch_intent(intent),
            None => DispatchResult::state(false),
        };
        result.state_changed = true;
        result
    }

    fn dispatch_intent(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::RefreshRoot { root } => {
                DispatchResult::with_effects(true, vec![self.state.tree.request_refresh(root)])
            }
            Action::RefreshChildren { root, id } => self.refresh_node(root, &id),
            Action::ExplorerToggleExpand { .. } => self.reduce_explorer_action(action),
            action @ (Action::OpenNode { .. } | Action::OpenGit { .. }) => {
                self.reduce_tabs_action(action)
            }
            action @ (Action::BeginCreate { .. }
            | Action::BeginRename { .. }
            | Action::BeginDelete { .. }) => self.reduce_dialog_action(action),
            action => self.reduce_mutation_action(action),
        }
    }

    /// Refresh on a lazy group reloads it; on a connection it also reloads every
    /// group that was already fetched.
    fn refresh_node(&mut self, root: RootType, id: &str) -> DispatchResult {
        let Some(node) = self.state.tree.find_by_id(root, id) else {
            return DispatchResult::state(false);
        };
        if node.kind.is_lazy() {
            let (state_changed, effects) = self.state.tree.reload_children(root, id);
            return DispatchResult::with_effects(state_changed, effects);
        }

        let fetched_groups: Vec<NodeKey> = node
            .children
            .iter()
            .flatten()
            .filter(|child| child.kind.is_lazy() && child.children.is_some())
            .map(|child| child.id.clone())
            .collect();
        let mut effects = vec![self.state.tree.request_refresh(root)];
        for group in fetched_groups {
            let (_, reload) = self.state.tree.reload_children(root, &group);
            effects.extend(reload);
        }
        DispatchResult::with_effects(true, effects)
    }
}

fn menu_intent(action: ExplorerMenuAction, root: RootType, target: Option<NodeKey>) -> Option<Action> {
    use ExplorerMenuAction as A;

    let intent = match (action, target) {
        (A::Open, Some(id)) => Action::OpenNode { root, id },
        (A::NewFile, parent) => Action::BeginCreate {
            root,
            parent,
            kind: root.default_leaf(),
        },
        (A::NewFolder, parent) => Action::BeginCreate {
            root,
            parent,
            kind: NodeType::Folder,
        },
        (A::NewConnection, _) => Action::BeginCreate {
            root,
            parent: None,
            kind: NodeType::DbConnection,
        },
        (A::NewExternalSystem, _) => Action::BeginCreate {
            root,
            parent: None,
            kind: NodeType::ExternalSys,
        },
        (A::NewApi, Some(id)) => Action::BeginCreate {
            root,
            parent: Some(id),
            kind: NodeType::ExternalApi,
        },
        (A::NewDbObject(kind), Some(id)) => Action::BeginCreate {
            root,
            parent: Some(id),
            kind: kind.leaf_type(),
        },
        (A::Rename, Some(id)) => Action::BeginRename { root, id },
        (A::Delete, Some(id)) => Action::BeginDelete { root, id },
        (A::Cut, Some(id)) => Action::CutNode { root, id },
        (A::Copy, Some(id)) => Action::CopyNode { root, id },
        (A::Duplicate, Some(id)) => Action::DuplicateNode { root, id },
        (A::Paste, Some(target)) => Action::PasteNode { root, target },
        (A::ToggleExpand, Some(id)) => Action::ExplorerToggleExpand { root, id },
        (A::Refresh, Some(id)) => Action::RefreshChildren { root, id },
        (A::Refresh, None) => Action::RefreshRoot { root },
        (A::OpenGit, _) => Action::OpenGit { root },
        _ => return None,
    };
    Some(intent)
}
