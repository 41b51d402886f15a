//! Service ports: traits + data contracts.

pub mod backend;
pub mod runtime;
pub mod settings;

pub use backend::{BackendError, BackendFuture, ProjectBackend, Result as BackendResult};
pub use runtime::{AsyncExecutor, BoxFuture};
pub use settings::{BackendSettings, LayoutSettings, NotificationSettings, Settings};
