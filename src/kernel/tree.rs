//! Per-root project forests.

use std::sync::Arc;

use crate::models::{self, Forest, LoadState, Node, NodeKey, NodeType, RootType};

use super::effect::Effect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootLoad {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct RootState {
    pub nodes: Forest,
    pub load: RootLoad,
    requested: u64,
    applied: u64,
}

impl RootState {
    pub fn last_request(&self) -> u64 {
        self.requested
    }

    pub fn last_applied(&self) -> u64 {
        self.applied
    }
}

/// Why a move was refused. Refusals are silent at the UI level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    CrossRoot,
    SameNode,
    UnknownNode,
    IntoOwnSubtree,
    FixedNode,
    /// Connections and external systems only live at the top level.
    TopLevelOnly,
    /// A connection holds exactly its six groups.
    IntoConnection,
    /// The destination does not hold nodes of the dragged type.
    IncompatibleTarget,
}

#[derive(Debug, Default)]
pub struct TreeStore {
    roots: [RootState; 5],
}

impl TreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self, root: RootType) -> &RootState {
        &self.roots[root.index()]
    }

    fn root_mut(&mut self, root: RootType) -> &mut RootState {
        &mut self.roots[root.index()]
    }

    pub fn nodes(&self, root: RootType) -> &[Arc<Node>] {
        &self.root(root).nodes
    }

    pub fn find_by_id(&self, root: RootType, id: &str) -> Option<&Arc<Node>> {
        models::find_by_id(self.nodes(root), id)
    }

    /// Replaces the target node with `updater(node)`. Returns false when `id` is unknown.
    pub fn update_by_id<F>(&mut self, root: RootType, id: &str, updater: F) -> bool
    where
        F: FnOnce(&Node) -> Node,
    {
        let state = self.root_mut(root);
        if !models::contains(&state.nodes, id) {
            return false;
        }
        state.nodes = models::update_by_id(&state.nodes, id, updater);
        true
    }

    pub fn toggle_expand(&mut self, root: RootType, id: &str) -> (bool, Vec<Effect>) {
        let Some(node) = self.find_by_id(root, id) else {
            return (false, Vec::new());
        };
        if !node.is_container() {
            return (false, Vec::new());
        }

        if node.needs_fetch() {
            let kind = node.kind;
            self.update_by_id(root, id, |n| {
                let mut next = n.clone();
                next.is_open = true;
                next.load_state = LoadState::Loading;
                next
            });
            tracing::debug!(root = %root, id, "lazy group expanded, fetching children");
            return (
                true,
                vec![Effect::FetchChildren {
                    root,
                    id: NodeKey::from(id),
                    kind,
                }],
            );
        }

        let changed = self.update_by_id(root, id, |n| {
            let mut next = n.clone();
            next.is_open = !n.is_open;
            next
        });
        (changed, Vec::new())
    }

    pub fn set_open(&mut self, root: RootType, id: &str, open: bool) -> bool {
        let current = self.find_by_id(root, id).map(|n| n.is_open);
        match current {
            Some(is_open) if is_open != open => self.update_by_id(root, id, |n| {
                let mut next = n.clone();
                next.is_open = open;
                next
            }),
            _ => false,
        }
    }

    pub fn apply_children_loaded(&mut self, root: RootType, id: &str, children: Vec<Node>) -> bool {
        let parent = NodeKey::from(id);
        self.update_by_id(root, id, |n| {
            let mut next = n.clone();
            next.children = Some(
                children
                    .into_iter()
                    .map(|c| Arc::new(c.with_parent(Some(parent.clone()))))
                    .collect(),
            );
            next.load_state = LoadState::Loaded;
            next
        })
    }

    pub fn apply_children_failed(&mut self, root: RootType, id: &str) -> bool {
        self.update_by_id(root, id, |n| {
            let mut next = n.clone();
            next.children = Some(Vec::new());
            next.load_state = LoadState::Failed;
            next
        })
    }

    /// Forces a re-fetch of a lazy group's children.
    pub fn reload_children(&mut self, root: RootType, id: &str) -> (bool, Vec<Effect>) {
        let Some(node) = self.find_by_id(root, id) else {
            return (false, Vec::new());
        };
        if !node.kind.is_lazy() || node.load_state == LoadState::Loading {
            return (false, Vec::new());
        }
        let kind = node.kind;
        self.update_by_id(root, id, |n| {
            let mut next = n.clone();
            next.is_open = true;
            next.load_state = LoadState::Loading;
            next
        });
        (
            true,
            vec![Effect::FetchChildren {
                root,
                id: NodeKey::from(id),
                kind,
            }],
        )
    }

    pub fn request_refresh(&mut self, root: RootType) -> Effect {
        let state = self.root_mut(root);
        state.requested = state.requested.saturating_add(1);
        if state.load != RootLoad::Loaded {
            state.load = RootLoad::Loading;
        }
        Effect::FetchTree {
            root,
            request: state.requested,
        }
    }

    /// Applies a full-root fetch unless a newer one has already landed.
    pub fn apply_tree_loaded(&mut self, root: RootType, request: u64, nodes: Vec<Node>) -> bool {
        let state = self.root_mut(root);
        if request < state.applied {
            tracing::debug!(
                root = %root,
                request,
                applied = state.applied,
                "stale tree result dropped"
            );
            return false;
        }
        let incoming = nodes.into_iter().map(Arc::new).collect();
        state.nodes = models::merge_ui_state(&state.nodes, incoming);
        state.applied = request;
        state.load = RootLoad::Loaded;
        true
    }

    pub fn apply_tree_failed(&mut self, root: RootType, request: u64) -> bool {
        let state = self.root_mut(root);
        if request < state.applied {
            return false;
        }
        state.load = RootLoad::Failed;
        true
    }

    pub fn plan_move(
        &self,
        root: RootType,
        payload_root: RootType,
        dragged: &str,
        target: &str,
    ) -> Result<(), MoveRejection> {
        if payload_root != root {
            return Err(MoveRejection::CrossRoot);
        }
        if dragged == target {
            return Err(MoveRejection::SameNode);
        }
        let nodes = self.nodes(root);
        let Some(node) = models::find_by_id(nodes, dragged) else {
            return Err(MoveRejection::UnknownNode);
        };
        if !models::contains(nodes, target) {
            return Err(MoveRejection::UnknownNode);
        }
        if node.kind.is_lazy() {
            return Err(MoveRejection::FixedNode);
        }
        if models::is_ancestor(nodes, dragged, target) {
            return Err(MoveRejection::IntoOwnSubtree);
        }
        self.check_placement(root, node, target)
    }

    /// Hierarchy rules for putting `node` (or a copy of it) where `target` points.
    pub fn check_placement(
        &self,
        root: RootType,
        node: &Node,
        target: &str,
    ) -> Result<(), MoveRejection> {
        let Some(destination) = models::move_destination(self.nodes(root), target) else {
            return Err(MoveRejection::UnknownNode);
        };
        let Some(parent) = destination else {
            return Ok(());
        };
        if node.kind.is_system_container() {
            return Err(MoveRejection::TopLevelOnly);
        }
        if parent.kind == NodeType::DbConnection {
            return Err(MoveRejection::IntoConnection);
        }
        if !parent.accepts_child(node) {
            return Err(MoveRejection::IncompatibleTarget);
        }
        Ok(())
    }

    pub fn apply_created(&mut self, root: RootType, parent: Option<&str>, node: Node) -> bool {
        let state = self.root_mut(root);
        if models::contains(&state.nodes, &node.id) {
            return false;
        }
        match models::insert_child(&state.nodes, parent, node) {
            Some(next) => {
                state.nodes = next;
                true
            }
            None => false,
        }
    }

    /// A duplicate lands next to its source.
    pub fn apply_copied(&mut self, root: RootType, node: Node) -> bool {
        let parent = node.parent_id.clone();
        self.apply_created(root, parent.as_deref(), node)
    }

    pub fn apply_renamed(&mut self, root: RootType, id: &str, name: &str) -> bool {
        self.update_by_id(root, id, |n| {
            let mut next = n.clone();
            next.name = name.into();
            next
        })
    }

    /// Removes the node and returns every id that went with it.
    pub fn apply_deleted(&mut self, root: RootType, id: &str) -> Vec<NodeKey> {
        let state = self.root_mut(root);
        match models::remove_by_id(&state.nodes, id) {
            Some((next, removed)) => {
                state.nodes = next;
                models::descendant_ids(&removed)
            }
            None => Vec::new(),
        }
    }

    pub fn apply_moved(&mut self, root: RootType, dragged: &str, target: &str) -> bool {
        let state = self.root_mut(root);
        match models::move_node(&state.nodes, dragged, target) {
            Some(next) => {
                state.nodes = next;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/tree.rs"]
mod tests;
