//! Application layer: the workspace shell.

mod bridge;
mod workspace;

pub use bridge::message_to_action;
pub use workspace::Workspace;
