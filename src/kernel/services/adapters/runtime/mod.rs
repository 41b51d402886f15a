//! Async runtime adapter: executes backend effects and sends messages back to the shell.

mod message;
mod runtime;

pub use message::AppMessage;
pub use runtime::AsyncRuntime;
