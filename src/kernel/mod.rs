//! Headless workspace core (state/action/effect).

pub mod action;
pub mod dispatcher;
pub mod effect;
pub mod explorer;
pub mod selection;
pub mod services;
pub mod state;
pub mod store;
pub mod tabs;
pub mod tree;

pub use action::{Action, MutationOp};
pub use dispatcher::{dispatch as dispatch_editor, EditorKind, EditorMount, EditorProps};
pub use effect::Effect;
pub use explorer::{
    context_menu_entries, ContextMenuEntry, ContextMenuState, DragPayload, ExplorerMenuAction,
    ExplorerSection, ExplorerState,
};
pub use selection::{ActiveNode, ClipboardEntry, ClipboardMode, PastePlan, SelectionState};
pub use state::{
    AppState, ConfirmDialogState, InputDialogKind, InputDialogState, LayoutState, Notification,
    NotificationLevel, PendingAction, UiState,
};
pub use store::{DispatchResult, Store};
pub use tabs::{Tab, TabId, TabsState};
pub use tree::{MoveRejection, RootLoad, RootState, TreeStore};
