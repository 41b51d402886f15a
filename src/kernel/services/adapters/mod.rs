//! Service adapters: runtime, backend and OS specific implementations.

pub mod mock_backend;
pub mod paths;
pub mod runtime;
pub mod settings;

pub use mock_backend::{MockBackend, MockOp};
pub use paths::{ensure_log_dir, get_app_data_dir, get_log_dir};
pub use runtime::{AppMessage, AsyncRuntime};
pub use settings::{
    ensure_settings_file, ensure_settings_file_at, get_settings_path, load_settings,
    load_settings_from, SettingsError, SETTINGS_PATH_ENV,
};
