//! Accumulate a message piecewise and log it once

use crate::core::render;
use crate::core::{Context, Logger, Value};
use crate::global::default_logger;
use std::sync::Arc;

/// Appended after every buffered value
pub const BUFFER_SEPARATOR: &str = " ";

/// Text assembled over several steps, logged at INFO on [`flush`](Self::flush)
///
/// # Example
///
/// ```
/// use rust_xlog::{values, Context, MessageBuffer};
///
/// let mut buffer = MessageBuffer::new(values!["batch", 7]);
/// buffer.appendf("took %dms", values![12]);
/// assert_eq!(buffer.as_string(), "batch 7 took 12ms");
/// buffer.flush(&Context::background());
/// ```
#[derive(Debug, Default)]
pub struct MessageBuffer {
    logger: Option<Arc<Logger>>,
    buffer: String,
}

impl MessageBuffer {
    /// A buffer that flushes to the default logger current at flush time
    pub fn new(args: Vec<Value>) -> Self {
        let mut buffer = Self::default();
        buffer.append(args);
        buffer
    }

    /// A buffer that flushes to `logger`
    pub fn with_logger(logger: Arc<Logger>, args: Vec<Value>) -> Self {
        let mut buffer = Self::new(args);
        buffer.logger = Some(logger);
        buffer
    }

    /// Render each value and append it followed by [`BUFFER_SEPARATOR`]
    pub fn append(&mut self, args: Vec<Value>) {
        for arg in &args {
            self.buffer.push_str(&arg.to_string());
            self.buffer.push_str(BUFFER_SEPARATOR);
        }
    }

    /// Expand a printf-style template and append the result as one value
    pub fn appendf(&mut self, format: &str, args: Vec<Value>) {
        let text = render::sprintf(format, &args);
        self.append(vec![Value::String(text)]);
    }

    /// Buffered text without trailing separators
    pub fn as_string(&self) -> String {
        self.buffer.trim_end_matches(BUFFER_SEPARATOR).to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Log the buffered text at INFO
    ///
    /// The buffer keeps its content.
    pub fn flush(&self, ctx: &Context) {
        let logger = match self.logger {
            Some(ref logger) => Arc::clone(logger),
            None => default_logger(),
        };
        logger.info(ctx, vec![Value::String(self.as_string())]);
    }
}
