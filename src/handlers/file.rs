//! File handler implementation

use super::report_error;
use crate::core::{Context, Handler, Level, LoggerError, OutputFormat, Params, Result, TimestampFormat};
use chrono::Utc;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends rendered records to a file
pub struct FileHandler {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
    min_level: Level,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl FileHandler {
    /// Open `path` for appending, creating it if needed
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::io_operation("open log file", path.display().to_string(), e))?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
            min_level: Level::default(),
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        })
    }

    #[must_use]
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Set the output format for this handler
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rust_xlog::{FileHandler, OutputFormat};
    ///
    /// let handler = FileHandler::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_output_format(OutputFormat::Json);
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

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")
    }
}

impl Handler for FileHandler {
    fn log(&self, _ctx: &Context, params: &Params) {
        if params.level < self.min_level {
            return;
        }

        let line = self
            .output_format
            .format(params, &self.timestamp_format, &Utc::now());
        if let Err(e) = self.write_line(&line) {
            report_error(self.name(), format!("{}: {}", self.path.display(), e));
        }
    }

    fn flush(&self) {
        if let Err(e) = self.writer.lock().flush() {
            report_error(self.name(), format!("{}: {}", self.path.display(), e));
        }
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileHandler {
    fn drop(&mut self) {
        // Ensure all buffered data reaches the file
        self.flush();
    }
}
