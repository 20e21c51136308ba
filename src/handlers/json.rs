//! JSON handler for structured logging
//!
//! Writes each record as a single-line JSON object (JSONL), keys `t`, `l`,
//! `c`, `msg`, then the record's field pairs. Compatible with log aggregation
//! tools like ELK, Loki, etc.

use super::report_error;
use crate::core::{Context, Handler, Level, OutputFormat, Params, TimestampFormat};
use chrono::Utc;
use parking_lot::Mutex;
use std::io::Write;

pub struct JsonHandler<W: Write + Send> {
    writer: Mutex<W>,
    min_level: Level,
    timestamp_format: TimestampFormat,
}

impl<W: Write + Send> JsonHandler<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            min_level: Level::default(),
            timestamp_format: TimestampFormat::Iso8601,
        }
    }

    #[must_use]
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// `UnixMillis` renders `t` as a number, every other format as a string
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Handler for JsonHandler<W> {
    fn log(&self, _ctx: &Context, params: &Params) {
        if params.level < self.min_level {
            return;
        }

        let line = OutputFormat::Json.format(params, &self.timestamp_format, &Utc::now());
        if let Err(e) = writeln!(self.writer.lock(), "{}", line) {
            report_error(self.name(), e);
        }
    }

    fn flush(&self) {
        if let Err(e) = self.writer.lock().flush() {
            report_error(self.name(), e);
        }
    }

    fn name(&self) -> &str {
        "json"
    }
}
