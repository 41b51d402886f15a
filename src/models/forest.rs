//! Persistent forest operations.
//!
//! A forest is a `Vec<Arc<Node>>`. Updates copy only the path from a root to the
//! touched node; every other subtree keeps its `Arc`, so views can compare by pointer.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::node::{icon_family, IconKind, LoadState, Node, NodeKey, NodeType};

pub type Forest = Vec<Arc<Node>>;

pub fn find_by_id<'a>(forest: &'a [Arc<Node>], id: &str) -> Option<&'a Arc<Node>> {
    for node in forest {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = node.children.as_deref().and_then(|c| find_by_id(c, id)) {
            return Some(found);
        }
    }
    None
}

pub fn contains(forest: &[Arc<Node>], id: &str) -> bool {
    find_by_id(forest, id).is_some()
}

/// Returns a new forest where the node `id` is replaced by `updater(node)`.
pub fn update_by_id<F>(forest: &[Arc<Node>], id: &str, updater: F) -> Forest
where
    F: FnOnce(&Node) -> Node,
{
    let mut updater = Some(updater);
    update_inner(forest, id, &mut updater).unwrap_or_else(|| forest.to_vec())
}

fn update_inner<F>(forest: &[Arc<Node>], id: &str, updater: &mut Option<F>) -> Option<Forest>
where
    F: FnOnce(&Node) -> Node,
{
    for (index, node) in forest.iter().enumerate() {
        let replaced = if node.id == id {
            let f = updater.take()?;
            Some(Arc::new(f(node)))
        } else {
            node.children
                .as_deref()
                .and_then(|children| update_inner(children, id, updater))
                .map(|children| {
                    let mut next = Node::clone(node);
                    next.children = Some(children);
                    Arc::new(next)
                })
        };

        if let Some(replaced) = replaced {
            let mut next = forest.to_vec();
            next[index] = replaced;
            return Some(next);
        }
    }
    None
}

/// Removes `id` (and its subtree). Returns the new forest and the removed node.
pub fn remove_by_id(forest: &[Arc<Node>], id: &str) -> Option<(Forest, Arc<Node>)> {
    if let Some(index) = forest.iter().position(|n| n.id == id) {
        let mut next = forest.to_vec();
        let removed = next.remove(index);
        return Some((next, removed));
    }

    for (index, node) in forest.iter().enumerate() {
        let Some(children) = node.children.as_deref() else {
            continue;
        };
        if let Some((children, removed)) = remove_by_id(children, id) {
            let mut parent = Node::clone(node);
            parent.children = Some(children);
            let mut next = forest.to_vec();
            next[index] = Arc::new(parent);
            return Some((next, removed));
        }
    }
    None
}

/// Appends `child` to `parent`'s children, or to the top level when `parent` is `None`.
pub fn insert_child(forest: &[Arc<Node>], parent: Option<&str>, child: Node) -> Option<Forest> {
    let Some(parent_id) = parent else {
        let mut next = forest.to_vec();
        next.push(Arc::new(child.with_parent(None)));
        return Some(next);
    };

    let target = find_by_id(forest, parent_id)?;
    if !target.is_container() {
        return None;
    }

    let child = Arc::new(child.with_parent(Some(target.id.clone())));
    Some(update_by_id(forest, parent_id, move |node| {
        let mut next = node.clone();
        next.children.get_or_insert_with(Vec::new).push(child);
        next
    }))
}

/// Moves `id` under `target`. Containers receive the node; dropping onto a leaf
/// places it next to the leaf.
pub fn move_node(forest: &[Arc<Node>], id: &str, target: &str) -> Option<Forest> {
    if id == target || is_ancestor(forest, id, target) {
        return None;
    }
    let destination = move_destination(forest, target)?.map(|parent| parent.id.clone());

    let (without, moved) = remove_by_id(forest, id)?;
    insert_child(&without, destination.as_deref(), Node::clone(&moved))
}

/// Parent a node dropped on `target` would land under: the target itself when
/// it is a container, otherwise the target's parent. `Some(None)` is top level.
pub fn move_destination<'a>(
    forest: &'a [Arc<Node>],
    target: &str,
) -> Option<Option<&'a Arc<Node>>> {
    let target_node = find_by_id(forest, target)?;
    if target_node.is_container() {
        return Some(Some(target_node));
    }
    match target_node.parent_id.as_deref() {
        Some(parent) => find_by_id(forest, parent).map(Some),
        None => Some(None),
    }
}

/// True when `id` lies strictly inside the subtree of `ancestor`.
pub fn is_ancestor(forest: &[Arc<Node>], ancestor: &str, id: &str) -> bool {
    find_by_id(forest, ancestor)
        .and_then(|node| node.children.as_deref())
        .is_some_and(|children| contains(children, id))
}

pub fn descendant_ids(node: &Node) -> Vec<NodeKey> {
    let mut out = vec![node.id.clone()];
    let mut stack: Vec<&Arc<Node>> = node.children.iter().flatten().collect();
    while let Some(next) = stack.pop() {
        out.push(next.id.clone());
        stack.extend(next.children.iter().flatten());
    }
    out
}

/// First non-container node in depth-first order.
pub fn first_leaf(forest: &[Arc<Node>]) -> Option<&Arc<Node>> {
    for node in forest {
        if !node.is_container() {
            return Some(node);
        }
        if let Some(found) = node.children.as_deref().and_then(first_leaf) {
            return Some(found);
        }
    }
    None
}

/// Keeps nodes whose name contains `query` (case-insensitive) and the folders leading to them.
pub fn filter_forest(forest: &[Arc<Node>], query: &str) -> Forest {
    let query = query.trim();
    if query.is_empty() {
        return forest.to_vec();
    }
    filter_inner(forest, &query.to_lowercase())
}

fn filter_inner(forest: &[Arc<Node>], needle: &str) -> Forest {
    let mut out = Vec::new();
    for node in forest {
        if node.name.to_lowercase().contains(needle) {
            out.push(Arc::clone(node));
            continue;
        }
        let Some(children) = node.children.as_deref() else {
            continue;
        };
        let kept = filter_inner(children, needle);
        if kept.is_empty() {
            continue;
        }
        let mut next = Node::clone(node);
        next.children = Some(kept);
        next.is_open = true;
        out.push(Arc::new(next));
    }
    out
}

/// Carries ephemeral state from `previous` onto a freshly fetched forest.
pub fn merge_ui_state(previous: &[Arc<Node>], incoming: Vec<Arc<Node>>) -> Forest {
    if previous.is_empty() {
        return incoming;
    }
    let mut index: FxHashMap<&str, &Arc<Node>> = FxHashMap::default();
    let mut stack: Vec<&Arc<Node>> = previous.iter().collect();
    while let Some(node) = stack.pop() {
        index.insert(node.id.as_str(), node);
        stack.extend(node.children.iter().flatten());
    }
    merge_inner(&index, incoming)
}

fn merge_inner(index: &FxHashMap<&str, &Arc<Node>>, incoming: Vec<Arc<Node>>) -> Forest {
    incoming
        .into_iter()
        .map(|node| {
            let old = index.get(node.id.as_str()).copied();
            let mut next = Arc::unwrap_or_clone(node);
            if let Some(old) = old {
                next.is_open = old.is_open;
                if next.kind.is_lazy() && next.children.is_none() {
                    next.children = old.children.clone();
                    next.load_state = old.load_state;
                }
            }
            if let Some(children) = next.children.take() {
                next.children = Some(merge_inner(index, children));
            }
            Arc::new(next)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub id: NodeKey,
    pub depth: u16,
    pub name: compact_str::CompactString,
    pub kind: NodeType,
    pub icon: IconKind,
    pub is_container: bool,
    pub is_open: bool,
    pub load_state: LoadState,
}

pub fn flatten_rows(forest: &[Arc<Node>]) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    let mut stack: Vec<(&Arc<Node>, u16)> = forest.iter().rev().map(|n| (n, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        rows.push(TreeRow {
            id: node.id.clone(),
            depth,
            name: node.name.clone(),
            kind: node.kind,
            icon: icon_family(node),
            is_container: node.is_container(),
            is_open: node.is_open,
            load_state: node.load_state,
        });
        if node.is_open {
            if let Some(children) = node.children.as_deref() {
                stack.extend(children.iter().rev().map(|c| (c, depth + 1)));
            }
        }
    }

    rows
}

#[cfg(test)]
#[path = "../../tests/unit/models/forest.rs"]
mod tests;
