use crate::models::{self, RootType};

use super::selection::ActiveNode;
use super::state::NotificationLevel;
use super::{Action, AppState, Effect};

mod dialogs;
mod explorer;
mod mutations;
mod tabs;

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn state(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }

    fn with_effects(state_changed: bool, effects: Vec<Effect>) -> Self {
        Self {
            effects,
            state_changed,
        }
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        let mut result = match action {
            Action::Tick { now } => DispatchResult::state(self.state.ui.notifications.tick(now)),
            Action::RefreshAll => {
                let effects = RootType::ALL
                    .into_iter()
                    .map(|root| self.state.tree.request_refresh(root))
                    .collect();
                DispatchResult::with_effects(true, effects)
            }
            Action::RefreshRoot { root } => {
                DispatchResult::with_effects(true, vec![self.state.tree.request_refresh(root)])
            }
            Action::RefreshChildren { root, id } => {
                let (state_changed, effects) = self.state.tree.reload_children(root, &id);
                DispatchResult::with_effects(state_changed, effects)
            }
            Action::SetSidebarWidth { width } => {
                DispatchResult::state(self.state.ui.layout.set_sidebar_width(width))
            }
            Action::SetBottomPanelHeight { height } => {
                DispatchResult::state(self.state.ui.layout.set_bottom_panel_height(height))
            }
            Action::ToggleBottomPanel => {
                DispatchResult::state(self.state.ui.layout.toggle_bottom_panel())
            }
            Action::AppendLog { lines } => {
                DispatchResult::state(self.state.ui.layout.bottom_panel.append_log(lines))
            }
            Action::DismissNotification { id } => {
                DispatchResult::state(self.state.ui.notifications.dismiss(id))
            }

            action @ (Action::ExplorerClick { .. }
            | Action::ExplorerToggleExpand { .. }
            | Action::ExplorerToggleSection { .. }
            | Action::ExplorerSetFilter { .. }
            | Action::ExplorerContextMenuOpen { .. }
            | Action::ExplorerContextMenuMoveSelection { .. }
            | Action::ExplorerContextMenuConfirm
            | Action::ExplorerContextMenuClick { .. }
            | Action::ExplorerContextMenuClose
            | Action::ExplorerDrop { .. }) => self.reduce_explorer_action(action),

            action @ (Action::BeginCreate { .. }
            | Action::BeginRename { .. }
            | Action::BeginDelete { .. }
            | Action::InputDialogSetValue { .. }
            | Action::InputDialogSubmit
            | Action::InputDialogCancel
            | Action::ConfirmDialogAccept
            | Action::ConfirmDialogCancel) => self.reduce_dialog_action(action),

            action @ (Action::OpenNode { .. }
            | Action::OpenSettings
            | Action::OpenGit { .. }
            | Action::ActivateTab { .. }
            | Action::CloseTab { .. }
            | Action::CloseOtherTabs { .. }
            | Action::CloseAllTabs
            | Action::CloseTabsRight { .. }
            | Action::CloseTabsLeft { .. }
            | Action::ReorderTabs { .. }) => self.reduce_tabs_action(action),

            action => self.reduce_mutation_action(action),
        };

        result.state_changed |= self.sync_active_node();
        result
    }

    /// The active explorer node mirrors the active tab when it points at a tree node.
    fn sync_active_node(&mut self) -> bool {
        let next = self.state.tabs.active_tab().and_then(|tab| {
            let root = tab.root_type?;
            self.state
                .tree
                .find_by_id(root, &tab.file_id)
                .map(|_| ActiveNode {
                    root,
                    id: tab.file_id.clone(),
                })
        });
        self.state.selection.set_active(next)
    }

    fn notify_error(&mut self, message: String) {
        tracing::warn!(message = %message, "operation failed");
        self.state
            .ui
            .notifications
            .push(NotificationLevel::Error, message);
    }

    /// Opens the first leaf of the pages root the first time it loads.
    fn maybe_open_initial_page(&mut self) -> bool {
        if self.state.initial_open_done {
            return false;
        }
        self.state.initial_open_done = true;
        if !self.state.tabs.is_empty() {
            return true;
        }
        let first = models::first_leaf(self.state.tree.nodes(RootType::Pages)).cloned();
        match first {
            Some(node) => {
                tracing::info!(id = %node.id, name = %node.name, "opening first page");
                self.state.tabs.open(&node, RootType::Pages);
                true
            }
            None => true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
