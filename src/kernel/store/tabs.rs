use crate::kernel::Action;

use super::DispatchResult;

impl super::Store {
    pub(super) fn reduce_tabs_action(&mut self, action: Action) -> DispatchResult {
        let tabs = &mut self.state.tabs;
        let state_changed = match action {
            Action::OpenNode { root, id } => {
                let Some(node) = self.state.tree.find_by_id(root, &id).cloned() else {
                    return DispatchResult::state(false);
                };
                if node.kind.is_system_container() {
                    tabs.open_system(&node, root)
                } else {
                    tabs.open(&node, root)
                }
            }
            Action::OpenSettings => tabs.open_settings(),
            Action::OpenGit { root } => tabs.open_git(root),
            Action::ActivateTab { tab } => tabs.activate(tab),
            Action::CloseTab { tab } => tabs.close(tab),
            Action::CloseOtherTabs { tab } => tabs.close_others(tab),
            Action::CloseAllTabs => tabs.close_all(),
            Action::CloseTabsRight { tab } => tabs.close_right(tab),
            Action::CloseTabsLeft { tab } => tabs.close_left(tab),
            Action::ReorderTabs { dragged, target } => tabs.reorder(dragged, target),
            _ => false,
        };
        DispatchResult::state(state_changed)
    }
}
