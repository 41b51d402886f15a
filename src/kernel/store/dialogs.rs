use crate::kernel::state::{InputDialogKind, PendingAction};
use crate::kernel::{Action, Effect, MutationOp};
use crate::models::{self, normalize_create, NewNode, NodeType, RootType};

use super::DispatchResult;

fn create_title(kind: NodeType) -> &'static str {
    match kind {
        NodeType::Folder => "New Folder",
        NodeType::DbConnection => "New Connection",
        NodeType::ExternalSys => "New External System",
        NodeType::ExternalApi => "New API",
        NodeType::DbTable => "New Table",
        NodeType::DbView => "New View",
        NodeType::DbFunc => "New Function",
        NodeType::DbProc => "New Procedure",
        NodeType::DbTrigger => "New Trigger",
        NodeType::DbQuery => "New Query",
        _ => "New File",
    }
}

fn validate_name(value: &str) -> Result<&str, &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Name required");
    }
    if value.contains('/') || value.contains('\\') || value == "." || value == ".." {
        return Err("Invalid name");
    }
    Ok(value)
}

impl super::Store {
    pub(super) fn reduce_dialog_action(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::BeginCreate { root, parent, kind } => {
                if self.state.ui.modal_open() {
                    return DispatchResult::state(false);
                }
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
                let dialog = &mut self.state.ui.input_dialog;
                dialog.reset();
                dialog.visible = true;
                dialog.title = create_title(kind).to_string();
                dialog.kind = Some(InputDialogKind::Create { root, parent, kind });
                DispatchResult::state(true)
            }
            Action::BeginRename { root, id } => {
                if self.state.ui.modal_open() {
                    return DispatchResult::state(false);
                }
                let Some(node) = self.state.tree.find_by_id(root, &id) else {
                    return DispatchResult::state(false);
                };
                if node.kind.is_lazy() {
                    return DispatchResult::state(false);
                }
                let name = node.name.to_string();
                let dialog = &mut self.state.ui.input_dialog;
                dialog.reset();
                dialog.visible = true;
                dialog.title = "Rename".to_string();
                dialog.value = name;
                dialog.kind = Some(InputDialogKind::Rename { root, id });
                DispatchResult::state(true)
            }
            Action::BeginDelete { root, id } => {
                if self.state.ui.modal_open() {
                    return DispatchResult::state(false);
                }
                let Some(node) = self.state.tree.find_by_id(root, &id) else {
                    return DispatchResult::state(false);
                };
                if node.kind.is_lazy() {
                    return DispatchResult::state(false);
                }
                let message = format!("Delete \"{}\"?", node.name);
                let dialog = &mut self.state.ui.confirm_dialog;
                dialog.reset();
                dialog.visible = true;
                dialog.message = message;
                dialog.on_confirm = Some(PendingAction::Delete { root, id });
                DispatchResult::state(true)
            }
            Action::InputDialogSetValue { value } => {
                let dialog = &mut self.state.ui.input_dialog;
                if !dialog.visible || dialog.pending {
                    return DispatchResult::state(false);
                }
                let changed = dialog.value != value || dialog.error.is_some();
                dialog.value = value;
                dialog.error = None;
                DispatchResult::state(changed)
            }
            Action::InputDialogSubmit => self.submit_input_dialog(),
            Action::InputDialogCancel => {
                let dialog = &mut self.state.ui.input_dialog;
                if !dialog.visible {
                    return DispatchResult::state(false);
                }
                dialog.reset();
                DispatchResult::state(true)
            }
            Action::ConfirmDialogAccept => {
                let dialog = &mut self.state.ui.confirm_dialog;
                if !dialog.visible || dialog.pending {
                    return DispatchResult::state(false);
                }
                let Some(PendingAction::Delete { root, id }) = dialog.on_confirm.clone() else {
                    dialog.reset();
                    return DispatchResult::state(true);
                };
                dialog.pending = true;
                dialog.error = None;
                tracing::info!(root = %root, id = %id, "delete requested");
                DispatchResult::with_effects(true, vec![Effect::DeleteNode { root, id }])
            }
            Action::ConfirmDialogCancel => {
                let dialog = &mut self.state.ui.confirm_dialog;
                if !dialog.visible {
                    return DispatchResult::state(false);
                }
                dialog.reset();
                DispatchResult::state(true)
            }
            _ => DispatchResult::state(false),
        }
    }

    fn submit_input_dialog(&mut self) -> DispatchResult {
        let dialog = &self.state.ui.input_dialog;
        if !dialog.visible || dialog.pending {
            return DispatchResult::state(false);
        }
        let Some(kind) = dialog.kind.clone() else {
            self.state.ui.input_dialog.reset();
            return DispatchResult::state(true);
        };
        let name = match validate_name(&dialog.value) {
            Ok(name) => name.to_string(),
            Err(error) => {
                let dialog = &mut self.state.ui.input_dialog;
                let prev = dialog.error.replace(error.to_string());
                return DispatchResult::state(prev.as_deref() != Some(error));
            }
        };

        let effect = match kind {
            InputDialogKind::Create { root, parent, kind } => {
                if let Some(error) = self.sibling_conflict(root, parent.as_deref(), &name, None) {
                    self.state.ui.input_dialog.error = Some(error);
                    return DispatchResult::state(true);
                }
                let new_node = normalize_create(root, parent.as_deref(), NewNode::new(name, kind));
                tracing::info!(root = %root, parent = ?parent, kind = %new_node.kind, "create requested");
                Effect::CreateNode {
                    root,
                    parent,
                    new_node,
                    open: true,
                }
            }
            InputDialogKind::Rename { root, id } => {
                let Some(node) = self.state.tree.find_by_id(root, &id) else {
                    self.state.ui.input_dialog.reset();
                    return DispatchResult::state(true);
                };
                if node.name == name {
                    self.state.ui.input_dialog.reset();
                    return DispatchResult::state(true);
                }
                let parent = node.parent_id.clone();
                if let Some(error) = self.sibling_conflict(root, parent.as_deref(), &name, Some(&id))
                {
                    self.state.ui.input_dialog.error = Some(error);
                    return DispatchResult::state(true);
                }
                tracing::info!(root = %root, id = %id, "rename requested");
                Effect::UpdateNode {
                    root,
                    id,
                    update: models::NodeUpdate {
                        name: Some(name.into()),
                    },
                }
            }
        };

        let dialog = &mut self.state.ui.input_dialog;
        dialog.pending = true;
        dialog.error = None;
        DispatchResult::with_effects(true, vec![effect])
    }

    /// Siblings may not share a name.
    fn sibling_conflict(
        &self,
        root: RootType,
        parent: Option<&str>,
        name: &str,
        except: Option<&str>,
    ) -> Option<String> {
        let tree = &self.state.tree;
        let siblings = match parent {
            Some(parent) => tree.find_by_id(root, parent)?.children.clone().unwrap_or_default(),
            None => tree.nodes(root).to_vec(),
        };
        siblings
            .iter()
            .any(|n| n.name == name && except.map_or(true, |id| n.id != id))
            .then(|| format!("\"{name}\" already exists"))
    }

    /// Closes the dialog that was waiting for this mutation.
    pub(super) fn settle_dialogs(&mut self, action: &Action) -> bool {
        let input = &mut self.state.ui.input_dialog;
        let input_done = input.pending
            && match (&input.kind, action) {
                (
                    Some(InputDialogKind::Create { root, parent, .. }),
                    Action::NodeCreated {
                        root: r,
                        parent: p,
                        ..
                    },
                ) => root == r && parent == p,
                (
                    Some(InputDialogKind::Rename { root, id }),
                    Action::NodeRenamed { root: r, id: i, .. },
                ) => root == r && id == i,
                _ => false,
            };
        if input_done {
            input.reset();
        }

        let confirm = &mut self.state.ui.confirm_dialog;
        let confirm_done = confirm.pending
            && match (&confirm.on_confirm, action) {
                (
                    Some(PendingAction::Delete { root, id }),
                    Action::NodeDeleted { root: r, id: i },
                ) => root == r && id == i,
                _ => false,
            };
        if confirm_done {
            confirm.reset();
        }
        input_done || confirm_done
    }

    /// A failed mutation leaves its dialog open with the error.
    pub(super) fn fail_dialogs(&mut self, root: RootType, op: MutationOp, error: &str) -> bool {
        let input = &mut self.state.ui.input_dialog;
        let input_hit = input.pending
            && match (&input.kind, op) {
                (Some(InputDialogKind::Create { root: r, .. }), MutationOp::Create)
                | (Some(InputDialogKind::Rename { root: r, .. }), MutationOp::Rename) => *r == root,
                _ => false,
            };
        if input_hit {
            input.pending = false;
            input.error = Some(error.to_string());
        }

        let confirm = &mut self.state.ui.confirm_dialog;
        let confirm_hit = confirm.pending
            && op == MutationOp::Delete
            && matches!(
                &confirm.on_confirm,
                Some(PendingAction::Delete { root: r, .. }) if *r == root
            );
        if confirm_hit {
            confirm.pending = false;
            confirm.error = Some(error.to_string());
        }
        input_hit || confirm_hit
    }
}
