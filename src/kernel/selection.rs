use std::sync::Arc;

use crate::models::{Node, NodeKey, RootType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardMode {
    Cut,
    Copy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardEntry {
    pub mode: ClipboardMode,
    pub root: RootType,
    pub node: Arc<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveNode {
    pub root: RootType,
    pub id: NodeKey,
}

/// What a paste onto a given target resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PastePlan {
    Move { source: NodeKey },
    CopyThenMove { source: NodeKey },
}

#[derive(Debug, Default)]
pub struct SelectionState {
    active: Option<ActiveNode>,
    clipboard: Option<ClipboardEntry>,
    /// Duplicates made by a copy-paste that are still waiting for their move.
    pasted_copies: Vec<(RootType, NodeKey)>,
}

impl SelectionState {
    pub fn active(&self) -> Option<&ActiveNode> {
        self.active.as_ref()
    }

    pub fn is_active(&self, root: RootType, id: &str) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.root == root && a.id == id)
    }

    pub fn set_active(&mut self, next: Option<ActiveNode>) -> bool {
        if self.active == next {
            return false;
        }
        self.active = next;
        true
    }

    pub fn clipboard(&self) -> Option<&ClipboardEntry> {
        self.clipboard.as_ref()
    }

    /// Replaces any previous entry.
    pub fn set_clipboard(&mut self, mode: ClipboardMode, root: RootType, node: Arc<Node>) -> bool {
        let next = Some(ClipboardEntry { mode, root, node });
        if self.clipboard == next {
            return false;
        }
        self.clipboard = next;
        true
    }

    pub fn clear_clipboard(&mut self) -> bool {
        self.clipboard.take().is_some()
    }

    /// Only same-root entries can be pasted, and only into containers that
    /// accept the entry's type. A cut node cannot be pasted into itself.
    pub fn plan_paste(&self, root: RootType, target: &Node) -> Option<PastePlan> {
        let entry = self.clipboard.as_ref()?;
        if entry.root != root || !target.accepts_child(&entry.node) {
            return None;
        }
        if entry.mode == ClipboardMode::Cut && entry.node.id == target.id {
            return None;
        }
        let source = entry.node.id.clone();
        Some(match entry.mode {
            ClipboardMode::Cut => PastePlan::Move { source },
            ClipboardMode::Copy => PastePlan::CopyThenMove { source },
        })
    }

    pub fn clear_clipboard_if_deleted(&mut self, root: RootType, removed: &[NodeKey]) -> bool {
        let should_clear = self
            .clipboard
            .as_ref()
            .is_some_and(|entry| entry.root == root && removed.contains(&entry.node.id));
        if should_clear {
            self.clipboard = None;
        }
        should_clear
    }

    pub fn clear_clipboard_if_cut_source_renamed(&mut self, root: RootType, id: &str) -> bool {
        let should_clear = self.clipboard.as_ref().is_some_and(|entry| {
            entry.mode == ClipboardMode::Cut && entry.root == root && entry.node.id == id
        });
        if should_clear {
            self.clipboard = None;
        }
        should_clear
    }

    pub fn track_pasted_copy(&mut self, root: RootType, id: NodeKey) {
        self.pasted_copies.push((root, id));
    }

    /// Forgets a pending copy-paste duplicate. Returns whether `id` was one.
    pub fn settle_pasted_copy(&mut self, root: RootType, id: &str) -> bool {
        let before = self.pasted_copies.len();
        self.pasted_copies
            .retain(|(copy_root, copy)| !(*copy_root == root && copy.as_str() == id));
        self.pasted_copies.len() != before
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/selection.rs"]
mod tests;
