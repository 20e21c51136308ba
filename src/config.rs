//! Configuration document for the default logger
//!
//! ```
//! use rust_xlog::LogConfig;
//!
//! let config = LogConfig::from_json_str(r#"{"level": "debug", "stderr_level": "error"}"#).unwrap();
//! let logger = config.build_logger().unwrap();
//! assert_eq!(logger.handler_count(), 2);
//! ```

use crate::core::{Level, Logger, LoggerError, OutputFormat, Result, TimestampFormat};
use crate::global;
use crate::handlers::{ConsoleHandler, FileHandler};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Wiring for a logger built by [`init_default`]
///
/// Level names are matched case-insensitively. Empty strings mean "not set".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file; records go to stdout instead when unset
    #[serde(alias = "log_path", skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Threshold for the file, and for stdout when no `stdout_level` is given
    #[serde(alias = "log_level")]
    pub level: String,

    /// Output format of the file handler
    #[serde(alias = "log_format")]
    pub format: OutputFormat,

    /// Output format of the console handlers
    pub std_format: OutputFormat,

    /// Adds a stdout handler at this threshold
    pub stdout_level: String,

    /// Adds a stderr handler at this threshold
    pub stderr_level: String,

    /// Record the call site of each record
    pub caller: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: None,
            level: String::new(),
            format: OutputFormat::Json,
            std_format: OutputFormat::Text,
            stdout_level: String::new(),
            stderr_level: String::new(),
            caller: true,
        }
    }
}

impl LogConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation("read log configuration", path.display().to_string(), e)
        })?;
        Self::from_json_str(&json)
    }

    fn file_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }

    /// Threshold for the file handler; unknown names fall back to INFO
    pub fn effective_level(&self) -> Level {
        if self.level.is_empty() {
            return Level::Info;
        }
        self.level.parse().unwrap_or_else(|_| {
            eprintln!(
                "[XLOG WARNING] Unknown log level '{}', using INFO",
                self.level
            );
            Level::Info
        })
    }

    /// Build the logger this configuration describes, without installing it
    ///
    /// Handlers are added stderr first, then stdout, then the file. An
    /// unknown console level is an error.
    pub fn build_logger(&self) -> Result<Logger> {
        let level = self.effective_level();
        let mut builder = Logger::builder().caller(self.caller).caller_skip(1);

        if !self.stderr_level.is_empty() {
            let stderr_level = parse_console_level("stderr_level", &self.stderr_level)?;
            builder = builder.handler(
                ConsoleHandler::stderr()
                    .with_min_level(stderr_level)
                    .with_output_format(self.std_format.clone()),
            );
        }

        if !self.stdout_level.is_empty() {
            let stdout_level = parse_console_level("stdout_level", &self.stdout_level)?;
            builder = builder.handler(
                ConsoleHandler::stdout()
                    .with_min_level(stdout_level)
                    .with_output_format(self.std_format.clone()),
            );
        } else if self.file_path().is_none() {
            builder = builder.handler(
                ConsoleHandler::stdout()
                    .with_min_level(level)
                    .with_output_format(self.std_format.clone()),
            );
        }

        if let Some(path) = self.file_path() {
            builder = builder.handler(
                FileHandler::new(path)?
                    .with_min_level(level)
                    .with_output_format(self.format.clone())
                    .with_timestamp_format(TimestampFormat::Iso8601),
            );
        }

        Ok(builder.build())
    }
}

fn parse_console_level(component: &str, name: &str) -> Result<Level> {
    name.parse::<Level>()
        .map_err(|_| LoggerError::config(component, format!("unknown level '{}'", name)))
}

/// Build a logger from `config` and install it as the process default
pub fn init_default(config: &LogConfig) -> Result<()> {
    let logger = config.build_logger()?;
    global::init(logger);
    Ok(())
}
