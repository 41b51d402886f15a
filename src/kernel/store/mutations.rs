use std::sync::Arc;

use crate::kernel::selection::{ClipboardMode, PastePlan};
use crate::kernel::{Action, Effect, MutationOp};
use crate::models::{normalize_create, LoadState, Node, NodeKey, RootType};

use super::DispatchResult;

impl super::Store {
    pub(super) fn reduce_mutation_action(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::CreateNode {
                root,
                parent,
                new_node,
                open,
            } => {
                if let Some(parent) = parent.as_deref() {
                    let is_container = self
                        .state
                        .tree
                        .find_by_id(root, parent)
                        .is_some_and(|n| n.is_container());
                    if !is_container {
                        return DispatchResult::state(false);
                    }
                }
                let new_node = normalize_create(root, parent.as_deref(), new_node);
                DispatchResult::with_effects(
                    false,
                    vec![Effect::CreateNode {
                        root,
                        parent,
                        new_node,
                        open,
                    }],
                )
            }
            Action::MoveNode {
                root,
                payload_root,
                dragged,
                target,
            } => match self.state.tree.plan_move(root, payload_root, &dragged, &target) {
                Ok(()) => DispatchResult::with_effects(
                    false,
                    vec![Effect::MoveNode {
                        root,
                        dragged,
                        target,
                        from_cut: false,
                    }],
                ),
                Err(reason) => {
                    tracing::debug!(
                        root = %root,
                        dragged = %dragged,
                        target = %target,
                        ?reason,
                        "move rejected"
                    );
                    DispatchResult::state(false)
                }
            },
            Action::DuplicateNode { root, id } => {
                let Some(node) = self.state.tree.find_by_id(root, &id) else {
                    return DispatchResult::state(false);
                };
                if node.kind.is_lazy() {
                    return DispatchResult::state(false);
                }
                DispatchResult::with_effects(
                    false,
                    vec![Effect::CopyNode {
                        root,
                        source: id,
                        paste_target: None,
                    }],
                )
            }
            Action::CutNode { root, id } => self.put_on_clipboard(ClipboardMode::Cut, root, &id),
            Action::CopyNode { root, id } => self.put_on_clipboard(ClipboardMode::Copy, root, &id),
            Action::PasteNode { root, target } => self.paste(root, target),

            Action::TreeLoaded {
                root,
                request,
                nodes,
            } => {
                let applied = self.state.tree.apply_tree_loaded(root, request, nodes);
                let mut state_changed = applied;
                if applied && root == RootType::Pages {
                    state_changed |= self.maybe_open_initial_page();
                }
                DispatchResult::state(state_changed)
            }
            Action::TreeLoadFailed {
                root,
                request,
                error,
            } => {
                let state_changed = self.state.tree.apply_tree_failed(root, request);
                if state_changed {
                    self.notify_error(format!("Failed to load {}: {error}", root.title()));
                }
                DispatchResult::state(state_changed)
            }
            Action::ChildrenLoaded { root, id, children } => {
                DispatchResult::state(self.state.tree.apply_children_loaded(root, &id, children))
            }
            Action::ChildrenLoadFailed { root, id, error } => {
                let state_changed = self.state.tree.apply_children_failed(root, &id);
                if state_changed {
                    self.notify_error(format!("Failed to load children: {error}"));
                }
                DispatchResult::state(state_changed)
            }
            action @ Action::NodeCreated { .. } => {
                let mut state_changed = self.settle_dialogs(&action);
                let Action::NodeCreated {
                    root,
                    parent,
                    node,
                    open,
                } = action
                else {
                    return DispatchResult::state(state_changed);
                };
                let mut effects = Vec::new();
                if parent
                    .as_deref()
                    .is_some_and(|p| self.state.tree.find_by_id(root, p).is_none())
                {
                    tracing::debug!(root = %root, id = %node.id, "created under a vanished parent");
                } else {
                    let (changed, reload) = self.apply_created(root, parent.as_deref(), &node);
                    state_changed |= changed;
                    effects.extend(reload);
                    if open && !node.is_container() {
                        state_changed |= self.state.tabs.open(&node, root);
                    }
                }
                effects.push(self.state.tree.request_refresh(root));
                DispatchResult::with_effects(state_changed, effects)
            }
            action @ Action::NodeRenamed { .. } => {
                let mut state_changed = self.settle_dialogs(&action);
                let Action::NodeRenamed { root, id, name } = action else {
                    return DispatchResult::state(state_changed);
                };
                if self.state.tree.apply_renamed(root, &id, &name) {
                    state_changed = true;
                    self.state.tabs.rename_file(&id, &name);
                    self.state
                        .selection
                        .clear_clipboard_if_cut_source_renamed(root, &id);
                } else {
                    tracing::debug!(root = %root, id = %id, "rename result for a missing node");
                }
                DispatchResult::with_effects(
                    state_changed,
                    vec![self.state.tree.request_refresh(root)],
                )
            }
            action @ Action::NodeDeleted { .. } => {
                self.settle_dialogs(&action);
                let Action::NodeDeleted { root, id } = action else {
                    return DispatchResult::state(true);
                };
                let mut removed = self.state.tree.apply_deleted(root, &id);
                if removed.is_empty() {
                    removed.push(id);
                }
                self.state.tabs.close_file_ids(&removed);
                self.state.selection.clear_clipboard_if_deleted(root, &removed);
                tracing::info!(root = %root, removed = removed.len(), "node deleted");
                DispatchResult::with_effects(true, vec![self.state.tree.request_refresh(root)])
            }
            Action::NodeMoved {
                root,
                dragged,
                target,
                from_cut,
            } => {
                let mut state_changed = self.state.tree.apply_moved(root, &dragged, &target);
                self.state.selection.settle_pasted_copy(root, &dragged);
                if from_cut {
                    state_changed |= self.state.selection.clear_clipboard();
                }
                let mut effects = Vec::new();
                let target_unfetched = self
                    .state
                    .tree
                    .find_by_id(root, &target)
                    .is_some_and(|t| t.kind.is_lazy() && t.load_state != LoadState::Loaded);
                if target_unfetched {
                    let (changed, reload) = self.state.tree.reload_children(root, &target);
                    state_changed |= changed;
                    effects.extend(reload);
                }
                effects.push(self.state.tree.request_refresh(root));
                DispatchResult::with_effects(state_changed, effects)
            }
            Action::NodeCopied {
                root,
                source,
                node,
                paste_target,
            } => {
                let copy_id = node.id.clone();
                let state_changed = self.state.tree.apply_copied(root, node);
                tracing::debug!(root = %root, source = %source, copy = %copy_id, "node copied");
                let effect = match paste_target {
                    Some(target) if self.state.tree.find_by_id(root, &target).is_some() => {
                        self.state.selection.track_pasted_copy(root, copy_id.clone());
                        Effect::MoveNode {
                            root,
                            dragged: copy_id,
                            target,
                            from_cut: false,
                        }
                    }
                    Some(target) => {
                        tracing::debug!(root = %root, target = %target, "paste target vanished");
                        Effect::DeleteNode { root, id: copy_id }
                    }
                    None => self.state.tree.request_refresh(root),
                };
                DispatchResult::with_effects(state_changed, vec![effect])
            }
            Action::MutationFailed {
                root,
                op,
                subject,
                error,
            } => {
                self.fail_dialogs(root, op, &error);
                self.notify_error(format!("Failed to {} node: {error}", op.as_str()));
                let mut effects = Vec::new();
                if let Some(copy) = subject.filter(|id| {
                    op == MutationOp::Move && self.state.selection.settle_pasted_copy(root, id)
                }) {
                    tracing::debug!(root = %root, copy = %copy, "removing unplaced paste copy");
                    effects.push(Effect::DeleteNode { root, id: copy });
                }
                effects.push(self.state.tree.request_refresh(root));
                DispatchResult::with_effects(true, effects)
            }
            _ => DispatchResult::state(false),
        }
    }

    /// Inserts a created node. Unfetched lazy groups are reloaded instead, so the
    /// group never shows a partial child list.
    fn apply_created(
        &mut self,
        root: RootType,
        parent: Option<&str>,
        node: &Node,
    ) -> (bool, Vec<Effect>) {
        let lazy_unloaded = parent
            .and_then(|p| self.state.tree.find_by_id(root, p))
            .is_some_and(|p| p.kind.is_lazy() && p.load_state != LoadState::Loaded);
        if let (true, Some(parent)) = (lazy_unloaded, parent) {
            return self.state.tree.reload_children(root, parent);
        }
        let changed = self.state.tree.apply_created(root, parent, node.clone());
        if let Some(parent) = parent {
            self.state.tree.set_open(root, parent, true);
        }
        (changed, Vec::new())
    }

    fn put_on_clipboard(&mut self, mode: ClipboardMode, root: RootType, id: &str) -> DispatchResult {
        let Some(node) = self.state.tree.find_by_id(root, id) else {
            return DispatchResult::state(false);
        };
        if node.kind.is_lazy() {
            return DispatchResult::state(false);
        }
        let node = Arc::clone(node);
        DispatchResult::state(self.state.selection.set_clipboard(mode, root, node))
    }

    fn paste(&mut self, root: RootType, target: NodeKey) -> DispatchResult {
        let Some(target_node) = self.state.tree.find_by_id(root, &target) else {
            return DispatchResult::state(false);
        };
        let Some(plan) = self.state.selection.plan_paste(root, target_node) else {
            tracing::debug!(root = %root, target = %target, "paste ignored");
            return DispatchResult::state(false);
        };
        let effect = match plan {
            PastePlan::Move { source } => {
                if let Err(reason) = self.state.tree.plan_move(root, root, &source, &target) {
                    tracing::debug!(root = %root, source = %source, ?reason, "cut paste rejected");
                    return DispatchResult::state(false);
                }
                Effect::MoveNode {
                    root,
                    dragged: source,
                    target,
                    from_cut: true,
                }
            }
            PastePlan::CopyThenMove { source } => {
                let Some(source_node) = self.state.tree.find_by_id(root, &source) else {
                    return DispatchResult::state(false);
                };
                if let Err(reason) = self.state.tree.check_placement(root, source_node, &target) {
                    tracing::debug!(root = %root, source = %source, ?reason, "copy paste rejected");
                    return DispatchResult::state(false);
                }
                Effect::CopyNode {
                    root,
                    source,
                    paste_target: Some(target),
                }
            }
        };
        DispatchResult::with_effects(false, vec![effect])
    }
}
