use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::kernel::services::ports::{LayoutSettings, Settings};
use crate::models::{NodeKey, NodeType, RootType};

use super::explorer::ExplorerState;
use super::selection::SelectionState;
use super::tabs::TabsState;
use super::tree::TreeStore;

/// Log lines kept by the bottom panel; older ones are dropped first.
pub const LOG_PANEL_CAPACITY: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BottomPanelState {
    pub visible: bool,
    pub height: u16,
    pub log: VecDeque<String>,
}

impl BottomPanelState {
    pub fn append_log(&mut self, lines: Vec<String>) -> bool {
        if lines.is_empty() {
            return false;
        }
        self.log.extend(lines);
        let overflow = self.log.len().saturating_sub(LOG_PANEL_CAPACITY);
        self.log.drain(..overflow);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutState {
    pub sidebar_width: u16,
    pub bottom_panel: BottomPanelState,
    bounds: LayoutSettings,
}

impl LayoutState {
    pub fn new(settings: &LayoutSettings) -> Self {
        let settings = settings.clone().normalized();
        Self {
            sidebar_width: settings
                .sidebar_width
                .clamp(settings.sidebar_min_width, settings.sidebar_max_width),
            bottom_panel: BottomPanelState {
                visible: settings.bottom_panel_visible,
                height: settings
                    .bottom_panel_height
                    .clamp(settings.bottom_panel_min_height, settings.bottom_panel_max_height),
                log: VecDeque::new(),
            },
            bounds: settings,
        }
    }

    pub fn set_sidebar_width(&mut self, width: u16) -> bool {
        let width = width.clamp(self.bounds.sidebar_min_width, self.bounds.sidebar_max_width);
        let prev = self.sidebar_width;
        self.sidebar_width = width;
        prev != width
    }

    pub fn set_bottom_panel_height(&mut self, height: u16) -> bool {
        let height = height.clamp(
            self.bounds.bottom_panel_min_height,
            self.bounds.bottom_panel_max_height,
        );
        let prev = self.bottom_panel.height;
        self.bottom_panel.height = height;
        prev != height
    }

    pub fn toggle_bottom_panel(&mut self) -> bool {
        self.bottom_panel.visible = !self.bottom_panel.visible;
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputDialogKind {
    Create {
        root: RootType,
        parent: Option<NodeKey>,
        kind: NodeType,
    },
    Rename {
        root: RootType,
        id: NodeKey,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputDialogState {
    pub visible: bool,
    pub title: String,
    pub value: String,
    pub error: Option<String>,
    pub kind: Option<InputDialogKind>,
    /// Submitted and waiting for the backend.
    pub pending: bool,
}

impl InputDialogState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Delete { root: RootType, id: NodeKey },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmDialogState {
    pub visible: bool,
    pub message: String,
    pub on_confirm: Option<PendingAction>,
    pub pending: bool,
    pub error: Option<String>,
}

impl ConfirmDialogState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
    pub shown_at: Option<Instant>,
}

#[derive(Debug, Clone)]
pub struct NotificationsState {
    pub items: Vec<Notification>,
    ttl: Duration,
    next_id: u64,
}

impl NotificationsState {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            ttl,
            next_id: 1,
        }
    }

    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.items.push(Notification {
            id,
            level,
            message: message.into(),
            shown_at: None,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Stamps new toasts with `now` and drops the ones older than the ttl.
    pub fn tick(&mut self, now: Instant) -> bool {
        let ttl = self.ttl;
        for item in &mut self.items {
            if item.shown_at.is_none() {
                item.shown_at = Some(now);
            }
        }
        let before = self.items.len();
        self.items.retain(|n| {
            n.shown_at
                .map_or(true, |shown| now.saturating_duration_since(shown) < ttl)
        });
        self.items.len() != before
    }
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub layout: LayoutState,
    pub input_dialog: InputDialogState,
    pub confirm_dialog: ConfirmDialogState,
    pub notifications: NotificationsState,
}

impl UiState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            layout: LayoutState::new(&settings.layout),
            input_dialog: InputDialogState::default(),
            confirm_dialog: ConfirmDialogState::default(),
            notifications: NotificationsState::new(Duration::from_millis(
                settings.notifications.ttl_ms,
            )),
        }
    }

    pub fn modal_open(&self) -> bool {
        self.input_dialog.visible || self.confirm_dialog.visible
    }
}

#[derive(Debug)]
pub struct AppState {
    pub tree: TreeStore,
    pub tabs: TabsState,
    pub selection: SelectionState,
    pub explorer: ExplorerState,
    pub ui: UiState,
    /// Set once the first pages-root load has been handled.
    pub initial_open_done: bool,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            tree: TreeStore::new(),
            tabs: TabsState::new(),
            selection: SelectionState::default(),
            explorer: ExplorerState::default(),
            ui: UiState::new(settings),
            initial_open_done: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
