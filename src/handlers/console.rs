//! Console handler implementation

use super::report_error;
use crate::core::{Context, Handler, Level, OutputFormat, Params, TimestampFormat};
use chrono::Utc;
use std::io::{self, Write};

#[cfg(feature = "console")]
use colored::Colorize;

/// Where a [`ConsoleHandler`] writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
    /// ERROR and above to stderr, everything else to stdout
    Split,
}

pub struct ConsoleHandler {
    target: ConsoleTarget,
    min_level: Level,
    use_colors: bool,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl ConsoleHandler {
    /// Split console output at the default level
    pub fn new() -> Self {
        Self::with_target(ConsoleTarget::Split)
    }

    pub fn stdout() -> Self {
        Self::with_target(ConsoleTarget::Stdout)
    }

    pub fn stderr() -> Self {
        Self::with_target(ConsoleTarget::Stderr)
    }

    pub fn with_target(target: ConsoleTarget) -> Self {
        Self {
            target,
            min_level: Level::default(),
            use_colors: cfg!(feature = "console"),
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        }
    }

    /// Drop records below `level`
    #[must_use]
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Toggle level colours; has no effect without the `console` feature
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the output format for this handler
    ///
    /// # Example
    ///
    /// ```
    /// use rust_xlog::{ConsoleHandler, OutputFormat};
    ///
    /// let handler = ConsoleHandler::stdout().with_output_format(OutputFormat::Logfmt);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    fn uses_stderr(&self, level: Level) -> bool {
        match self.target {
            ConsoleTarget::Stdout => false,
            ConsoleTarget::Stderr => true,
            ConsoleTarget::Split => level >= Level::Error,
        }
    }

    fn render(&self, params: &Params) -> String {
        let line = self
            .output_format
            .format(params, &self.timestamp_format, &Utc::now());
        self.colorize(line, params.level)
    }

    #[cfg(feature = "console")]
    fn colorize(&self, line: String, level: Level) -> String {
        if self.use_colors && self.output_format == OutputFormat::Text {
            line.color(level.color_code()).to_string()
        } else {
            line
        }
    }

    #[cfg(not(feature = "console"))]
    fn colorize(&self, line: String, _level: Level) -> String {
        line
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn log(&self, _ctx: &Context, params: &Params) {
        if params.level < self.min_level {
            return;
        }

        let line = self.render(params);
        let result = if self.uses_stderr(params.level) {
            writeln!(io::stderr().lock(), "{}", line)
        } else {
            writeln!(io::stdout().lock(), "{}", line)
        };
        if let Err(e) = result {
            report_error(self.name(), e);
        }
    }

    fn flush(&self) {
        // Split output can touch both streams
        if let Err(e) = io::stdout().flush().and_then(|_| io::stderr().flush()) {
            report_error(self.name(), e);
        }
    }

    fn name(&self) -> &str {
        "console"
    }
}
