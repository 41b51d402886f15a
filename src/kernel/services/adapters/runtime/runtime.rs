use super::message::AppMessage;
use crate::kernel::services::ports::{AsyncExecutor, BoxFuture, ProjectBackend};
use crate::kernel::Effect;
use std::io;
use std::sync::mpsc::Sender;
use std::sync::Arc;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
    backend: Arc<dyn ProjectBackend>,
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>, backend: Arc<dyn ProjectBackend>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self {
            runtime,
            tx,
            backend,
        })
    }

    /// Runs `effect` against the backend. Exactly one message is sent back per effect,
    /// unless the receiving side is already gone.
    pub fn execute(&self, effect: Effect) {
        let tx = self.tx.clone();
        let backend = Arc::clone(&self.backend);
        tracing::debug!(?effect, "executing effect");

        let task: BoxFuture = match effect {
            Effect::FetchTree { root, request } => Box::pin(async move {
                let result = backend.fetch_tree(root).await;
                let _ = tx.send(AppMessage::TreeLoaded {
                    root,
                    request,
                    result,
                });
            }),
            Effect::FetchChildren { root, id, kind } => Box::pin(async move {
                let result = backend.fetch_children(id.clone(), kind).await;
                let _ = tx.send(AppMessage::ChildrenLoaded { root, id, result });
            }),
            Effect::CreateNode {
                root,
                parent,
                new_node,
                open,
            } => Box::pin(async move {
                let result = backend.create_node(root, parent.clone(), new_node).await;
                let _ = tx.send(AppMessage::NodeCreated {
                    root,
                    parent,
                    open,
                    result,
                });
            }),
            Effect::UpdateNode { root, id, update } => Box::pin(async move {
                let result = backend.update_node(id.clone(), update.clone()).await;
                let _ = tx.send(AppMessage::NodeUpdated {
                    root,
                    id,
                    update,
                    result,
                });
            }),
            Effect::DeleteNode { root, id } => Box::pin(async move {
                let result = backend.delete_node(id.clone()).await;
                let _ = tx.send(AppMessage::NodeDeleted { root, id, result });
            }),
            Effect::MoveNode {
                root,
                dragged,
                target,
                from_cut,
            } => Box::pin(async move {
                let result = backend
                    .move_node(dragged.clone(), target.clone(), root)
                    .await;
                let _ = tx.send(AppMessage::NodeMoved {
                    root,
                    dragged,
                    target,
                    from_cut,
                    result,
                });
            }),
            Effect::CopyNode {
                root,
                source,
                paste_target,
            } => Box::pin(async move {
                let result = backend.copy_node(source.clone()).await;
                let _ = tx.send(AppMessage::NodeCopied {
                    root,
                    source,
                    paste_target,
                    result,
                });
            }),
        };

        self.spawn(task);
    }
}

impl AsyncExecutor for AsyncRuntime {
    fn spawn(&self, task: BoxFuture) {
        self.runtime.spawn(task);
    }
}
