//! Handler implementations

pub mod async_handler;
pub mod console;
pub mod file;
pub mod json;
pub mod terminate;

pub use async_handler::{AsyncHandler, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT};
pub use console::{ConsoleHandler, ConsoleTarget};
pub use file::FileHandler;
pub use json::JsonHandler;
pub use terminate::TerminatingHandler;

// Re-export the trait next to its implementations
pub use crate::core::Handler;

/// Report a handler failure on stderr; handlers have no error channel
pub(crate) fn report_error(handler: &str, err: impl std::fmt::Display) {
    eprintln!("[XLOG ERROR] Handler '{}' failed: {}", handler, err);
}
