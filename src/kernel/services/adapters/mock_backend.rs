//! In-memory project backend with artificial latency.

use compact_str::format_compact;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::kernel::services::ports::{BackendError, BackendFuture, BackendResult, ProjectBackend};
use crate::models::{self, copy_name, DbGroupKind, Forest, NewNode, Node, NodeKey, NodeType,
    NodeUpdate, RootType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    FetchTree,
    FetchChildren,
    Create,
    Update,
    Delete,
    Move,
    Copy,
}

#[derive(Default)]
struct MockStore {
    roots: FxHashMap<RootType, Forest>,
    failing: FxHashMap<MockOp, String>,
    calls: FxHashMap<MockOp, usize>,
}

pub struct MockBackend {
    store: Mutex<MockStore>,
    latency: Duration,
    next_id: AtomicU64,
}

impl MockBackend {
    pub fn new(latency: Duration) -> Self {
        Self {
            store: Mutex::new(MockStore::default()),
            latency,
            next_id: AtomicU64::new(1),
        }
    }

    /// A backend pre-populated with a small project in every root.
    pub fn with_demo_project(latency: Duration) -> Self {
        let backend = Self::new(latency);
        backend.seed_demo_project();
        backend
    }

    fn lock(&self) -> MutexGuard<'_, MockStore> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn next_id(&self) -> NodeKey {
        format_compact!("n{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Makes every call of `op` fail until [`MockBackend::clear_failures`].
    pub fn fail_on(&self, op: MockOp, reason: impl Into<String>) {
        self.lock().failing.insert(op, reason.into());
    }

    pub fn clear_failures(&self) {
        self.lock().failing.clear();
    }

    pub fn calls(&self, op: MockOp) -> usize {
        self.lock().calls.get(&op).copied().unwrap_or(0)
    }

    /// Inserts a node directly, bypassing latency and failure injection.
    pub fn seed(&self, root: RootType, parent: Option<&str>, node: Node) -> Option<NodeKey> {
        let id = node.id.clone();
        let mut store = self.lock();
        let forest = store.roots.entry(root).or_default();
        let next = models::insert_child(forest, parent, node)?;
        *forest = next;
        Some(id)
    }

    pub fn snapshot(&self, root: RootType) -> Forest {
        self.lock().roots.get(&root).cloned().unwrap_or_default()
    }

    fn seed_demo_project(&self) {
        let leaf = |name: &str, kind: NodeType| Node::new(self.next_id(), name, kind);

        let home = leaf("home", NodeType::Folder).with_children(vec![
            leaf("index.html", NodeType::Frontend),
            leaf("about.html", NodeType::Frontend),
        ]);
        self.seed(RootType::Pages, None, home);
        self.seed(RootType::Pages, None, leaf("theme.css", NodeType::File));

        let mobile = leaf("mobile", NodeType::Folder)
            .with_children(vec![leaf("login.page", NodeType::Frontend)]);
        self.seed(RootType::Apps, None, mobile);

        let orders = leaf("orders", NodeType::Folder).with_children(vec![
            leaf("create_order.flow", NodeType::Backend),
            leaf("list_orders.flow", NodeType::Backend),
        ]);
        self.seed(RootType::Apis, None, orders);

        let conn = Node::connection("MainDB", || self.next_id());
        let tables = conn
            .children
            .iter()
            .flatten()
            .find(|g| g.db_group_kind() == Some(DbGroupKind::Tables))
            .map(|g| g.id.clone());
        self.seed(RootType::Models, None, conn);
        if let Some(tables) = tables {
            self.seed(RootType::Models, Some(&tables), leaf("users", NodeType::DbTable));
            self.seed(RootType::Models, Some(&tables), leaf("orders", NodeType::DbTable));
        }

        let payments = leaf("Payments", NodeType::ExternalSys)
            .with_children(vec![leaf("charge", NodeType::ExternalApi)]);
        self.seed(RootType::External, None, payments);
    }

    async fn enter(&self, op: MockOp) -> BackendResult<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let mut store = self.lock();
        *store.calls.entry(op).or_default() += 1;
        match store.failing.get(&op) {
            Some(reason) => Err(BackendError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn locate(store: &MockStore, id: &str) -> Option<(RootType, Arc<Node>)> {
        store.roots.iter().find_map(|(root, forest)| {
            models::find_by_id(forest, id).map(|node| (*root, Arc::clone(node)))
        })
    }

    fn fresh_copy(&self, node: &Node, parent: Option<NodeKey>) -> Node {
        let id = self.next_id();
        let mut copy = Node::clone(node);
        copy.id = id.clone();
        copy.parent_id = parent;
        copy.is_open = false;
        copy.children = node.children.as_ref().map(|children| {
            children
                .iter()
                .map(|child| Arc::new(self.fresh_copy(child, Some(id.clone()))))
                .collect()
        });
        copy
    }
}

/// Lazy groups are served through `fetch_children`, never inline.
fn strip_lazy(node: &Node) -> Node {
    let mut out = Node::clone(node);
    out.is_open = false;
    if out.kind.is_lazy() {
        out.children = None;
    } else if let Some(children) = &node.children {
        out.children = Some(children.iter().map(|c| Arc::new(strip_lazy(c))).collect());
    }
    out
}

impl ProjectBackend for MockBackend {
    fn fetch_tree(&self, root: RootType) -> BackendFuture<'_, Vec<Node>> {
        Box::pin(async move {
            self.enter(MockOp::FetchTree).await?;
            let store = self.lock();
            Ok(store
                .roots
                .get(&root)
                .map(|forest| forest.iter().map(|n| strip_lazy(n)).collect())
                .unwrap_or_default())
        })
    }

    fn fetch_children(&self, id: NodeKey, kind: NodeType) -> BackendFuture<'_, Vec<Node>> {
        Box::pin(async move {
            self.enter(MockOp::FetchChildren).await?;
            if !kind.is_lazy() {
                return Err(BackendError::InvalidTarget(format!(
                    "{kind} nodes have no lazy children"
                )));
            }
            let store = self.lock();
            let (_, node) = Self::locate(&store, &id).ok_or(BackendError::NotFound(id))?;
            Ok(node
                .children
                .iter()
                .flatten()
                .map(|c| Node::clone(c))
                .collect())
        })
    }

    fn create_node(
        &self,
        root: RootType,
        parent: Option<NodeKey>,
        new_node: NewNode,
    ) -> BackendFuture<'_, Node> {
        Box::pin(async move {
            self.enter(MockOp::Create).await?;
            let node = match new_node.kind {
                NodeType::DbConnection => Node::connection(new_node.name, || self.next_id()),
                kind => Node::new(self.next_id(), new_node.name, kind),
            };

            let mut store = self.lock();
            let forest = store.roots.entry(root).or_default();
            if let Some(parent) = parent.as_deref() {
                if models::find_by_id(forest, parent).is_none() {
                    return Err(BackendError::NotFound(parent.into()));
                }
            }
            let next = models::insert_child(forest, parent.as_deref(), node.clone())
                .ok_or_else(|| BackendError::InvalidTarget("parent is not a container".into()))?;
            *forest = next;
            Ok(node.with_parent(parent))
        })
    }

    fn update_node(&self, id: NodeKey, update: NodeUpdate) -> BackendFuture<'_, ()> {
        Box::pin(async move {
            self.enter(MockOp::Update).await?;
            let mut store = self.lock();
            let (root, _) = Self::locate(&store, &id).ok_or_else(|| BackendError::NotFound(id.clone()))?;
            if let (Some(forest), Some(name)) = (store.roots.get_mut(&root), update.name) {
                *forest = models::update_by_id(forest, &id, |n| {
                    let mut next = n.clone();
                    next.name = name;
                    next
                });
            }
            Ok(())
        })
    }

    fn delete_node(&self, id: NodeKey) -> BackendFuture<'_, ()> {
        Box::pin(async move {
            self.enter(MockOp::Delete).await?;
            let mut store = self.lock();
            let (root, _) = Self::locate(&store, &id).ok_or_else(|| BackendError::NotFound(id.clone()))?;
            if let Some(forest) = store.roots.get_mut(&root) {
                if let Some((next, _)) = models::remove_by_id(forest, &id) {
                    *forest = next;
                }
            }
            Ok(())
        })
    }

    fn move_node(
        &self,
        dragged: NodeKey,
        target: NodeKey,
        root: RootType,
    ) -> BackendFuture<'_, ()> {
        Box::pin(async move {
            self.enter(MockOp::Move).await?;
            let mut store = self.lock();
            let forest = store
                .roots
                .get_mut(&root)
                .ok_or_else(|| BackendError::NotFound(dragged.clone()))?;
            let moved = models::find_by_id(forest, &dragged)
                .ok_or_else(|| BackendError::NotFound(dragged.clone()))?;
            let destination = models::move_destination(forest, &target)
                .ok_or_else(|| BackendError::NotFound(target.clone()))?;
            if destination.is_some_and(|parent| !parent.accepts_child(moved)) {
                return Err(BackendError::InvalidTarget(format!(
                    "{} cannot be placed under {target}",
                    moved.kind
                )));
            }
            let next = models::move_node(forest, &dragged, &target).ok_or_else(|| {
                BackendError::InvalidTarget(format!("cannot move {dragged} onto {target}"))
            })?;
            *forest = next;
            Ok(())
        })
    }

    fn copy_node(&self, id: NodeKey) -> BackendFuture<'_, Node> {
        Box::pin(async move {
            self.enter(MockOp::Copy).await?;
            let mut store = self.lock();
            let (root, source) =
                Self::locate(&store, &id).ok_or_else(|| BackendError::NotFound(id.clone()))?;
            if source.kind.is_lazy() {
                return Err(BackendError::InvalidTarget("groups cannot be copied".into()));
            }
            let mut copy = self.fresh_copy(&source, source.parent_id.clone());
            copy.name = copy_name(&source.name);

            let forest = store.roots.entry(root).or_default();
            let next = models::insert_child(forest, source.parent_id.as_deref(), copy.clone())
                .ok_or_else(|| BackendError::InvalidTarget("copy has no valid parent".into()))?;
            *forest = next;
            Ok(copy)
        })
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/mock_backend.rs"]
mod tests;
