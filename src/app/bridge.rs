//! Turns backend results into kernel actions.

use crate::kernel::services::adapters::AppMessage;
use crate::kernel::services::ports::BackendError;
use crate::kernel::{Action, MutationOp};
use crate::models::{NodeKey, RootType};

pub fn message_to_action(msg: AppMessage) -> Action {
    match msg {
        AppMessage::TreeLoaded {
            root,
            request,
            result,
        } => match result {
            Ok(nodes) => Action::TreeLoaded {
                root,
                request,
                nodes,
            },
            Err(e) => {
                tracing::warn!(root = %root, request, error = %e, "fetch_tree failed");
                Action::TreeLoadFailed {
                    root,
                    request,
                    error: e.to_string(),
                }
            }
        },
        AppMessage::ChildrenLoaded { root, id, result } => match result {
            Ok(children) => Action::ChildrenLoaded { root, id, children },
            Err(e) => {
                tracing::warn!(root = %root, id = %id, error = %e, "fetch_children failed");
                Action::ChildrenLoadFailed {
                    root,
                    id,
                    error: e.to_string(),
                }
            }
        },
        AppMessage::NodeCreated {
            root,
            parent,
            open,
            result,
        } => match result {
            Ok(node) => Action::NodeCreated {
                root,
                parent,
                node,
                open,
            },
            Err(e) => failed(root, MutationOp::Create, parent, &e),
        },
        AppMessage::NodeUpdated {
            root,
            id,
            update,
            result,
        } => match (result, update.name) {
            (Ok(()), Some(name)) => Action::NodeRenamed { root, id, name },
            (Ok(()), None) => Action::RefreshRoot { root },
            (Err(e), _) => failed(root, MutationOp::Rename, Some(id), &e),
        },
        AppMessage::NodeDeleted { root, id, result } => match result {
            Ok(()) => Action::NodeDeleted { root, id },
            Err(e) => failed(root, MutationOp::Delete, Some(id), &e),
        },
        AppMessage::NodeMoved {
            root,
            dragged,
            target,
            from_cut,
            result,
        } => match result {
            Ok(()) => Action::NodeMoved {
                root,
                dragged,
                target,
                from_cut,
            },
            Err(e) => failed(root, MutationOp::Move, Some(dragged), &e),
        },
        AppMessage::NodeCopied {
            root,
            source,
            paste_target,
            result,
        } => match result {
            Ok(node) => Action::NodeCopied {
                root,
                source,
                node,
                paste_target,
            },
            Err(e) => failed(root, MutationOp::Copy, Some(source), &e),
        },
    }
}

fn failed(
    root: RootType,
    op: MutationOp,
    subject: Option<NodeKey>,
    error: &BackendError,
) -> Action {
    tracing::warn!(root = %root, op = op.as_str(), ?subject, error = %error, "mutation failed");
    Action::MutationFailed {
        root,
        op,
        subject,
        error: error.to_string(),
    }
}
