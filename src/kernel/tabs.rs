//! Open documents and the active-tab pointer.

use compact_str::{format_compact, CompactString};

use crate::models::{FileType, Node, NodeKey, NodeType, RootType};

pub const SETTINGS_FILE_ID: &str = "project_settings";

pub fn git_file_id(root: RootType) -> NodeKey {
    format_compact!("git_{}", root.as_str())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(u64);

impl TabId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub id: TabId,
    pub file_id: NodeKey,
    pub title: CompactString,
    pub kind: FileType,
    pub root_type: Option<RootType>,
}

#[derive(Debug)]
pub struct TabsState {
    tabs: Vec<Tab>,
    active: Option<TabId>,
    next_tab_id: u64,
}

impl Default for TabsState {
    fn default() -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
            next_tab_id: 1,
        }
    }
}

impl TabsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.active
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        let active = self.active?;
        self.tabs.iter().find(|t| t.id == active)
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn find_by_file(&self, file_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.file_id == file_id)
    }

    fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    fn alloc_tab_id(&mut self) -> TabId {
        let id = TabId::new(self.next_tab_id);
        self.next_tab_id = self.next_tab_id.saturating_add(1);
        id
    }

    /// Opens a document tab for a leaf node. Containers are ignored.
    pub fn open(&mut self, node: &Node, root: RootType) -> bool {
        if node.is_container() {
            return false;
        }
        self.open_document(node.id.clone(), node.name.clone(), node.kind, Some(root))
    }

    /// Opens the properties editor of a connection or an external system.
    pub fn open_system(&mut self, node: &Node, root: RootType) -> bool {
        if !node.kind.is_system_container() {
            return false;
        }
        self.open_document(node.id.clone(), node.name.clone(), node.kind, Some(root))
    }

    pub fn open_settings(&mut self) -> bool {
        self.open_document(
            SETTINGS_FILE_ID.into(),
            "Project Settings".into(),
            NodeType::Settings,
            None,
        )
    }

    pub fn open_git(&mut self, root: RootType) -> bool {
        self.open_document(
            git_file_id(root),
            format_compact!("Git: {}", root.title()),
            NodeType::GitRepo,
            Some(root),
        )
    }

    fn open_document(
        &mut self,
        file_id: NodeKey,
        title: CompactString,
        kind: FileType,
        root_type: Option<RootType>,
    ) -> bool {
        if let Some(existing) = self.find_by_file(&file_id).map(|t| t.id) {
            return self.activate(existing);
        }

        let id = self.alloc_tab_id();
        self.tabs.push(Tab {
            id,
            file_id,
            title,
            kind,
            root_type,
        });
        self.active = Some(id);
        true
    }

    pub fn activate(&mut self, id: TabId) -> bool {
        if self.active == Some(id) || self.index_of(id).is_none() {
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Closing the active tab activates whichever tab is now last.
    pub fn close(&mut self, id: TabId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.tabs.remove(index);
        if self.active == Some(id) {
            self.active = self.tabs.last().map(|t| t.id);
        }
        true
    }

    pub fn close_others(&mut self, pivot: TabId) -> bool {
        if self.index_of(pivot).is_none() {
            return false;
        }
        self.retain_with_pivot(pivot, |_, tab| tab.id == pivot)
    }

    pub fn close_all(&mut self) -> bool {
        if self.tabs.is_empty() {
            return false;
        }
        self.tabs.clear();
        self.active = None;
        true
    }

    /// Closes every tab to the right of `pivot`; the pivot stays.
    pub fn close_right(&mut self, pivot: TabId) -> bool {
        let Some(index) = self.index_of(pivot) else {
            return false;
        };
        self.retain_with_pivot(pivot, |i, _| i <= index)
    }

    /// Closes every tab to the left of `pivot`; the pivot stays.
    pub fn close_left(&mut self, pivot: TabId) -> bool {
        let Some(index) = self.index_of(pivot) else {
            return false;
        };
        self.retain_with_pivot(pivot, |i, _| i >= index)
    }

    fn retain_with_pivot(&mut self, pivot: TabId, keep: impl Fn(usize, &Tab) -> bool) -> bool {
        let before = self.tabs.len();
        let kept: Vec<Tab> = std::mem::take(&mut self.tabs)
            .into_iter()
            .enumerate()
            .filter(|(i, tab)| keep(*i, tab))
            .map(|(_, tab)| tab)
            .collect();
        self.tabs = kept;

        let active_removed = self
            .active
            .is_some_and(|active| self.index_of(active).is_none());
        if active_removed {
            self.active = Some(pivot);
        }
        self.tabs.len() != before
    }

    /// Closes every tab whose `file_id` is in `file_ids`.
    pub fn close_file_ids(&mut self, file_ids: &[NodeKey]) -> bool {
        let doomed: Vec<TabId> = self
            .tabs
            .iter()
            .filter(|t| file_ids.contains(&t.file_id))
            .map(|t| t.id)
            .collect();
        let mut changed = false;
        for id in doomed {
            changed |= self.close(id);
        }
        changed
    }

    pub fn rename_file(&mut self, file_id: &str, title: &str) -> bool {
        let mut changed = false;
        for tab in self.tabs.iter_mut().filter(|t| t.file_id == file_id) {
            if tab.title != title {
                tab.title = title.into();
                changed = true;
            }
        }
        changed
    }

    /// Moves `dragged` into the slot currently held by `target`.
    pub fn reorder(&mut self, dragged: TabId, target: TabId) -> bool {
        if dragged == target {
            return false;
        }
        let (Some(from), Some(to)) = (self.index_of(dragged), self.index_of(target)) else {
            return false;
        };
        let tab = self.tabs.remove(from);
        self.tabs.insert(to, tab);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/tabs.rs"]
mod tests;
