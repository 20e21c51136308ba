//! Output format configuration for handlers
//!
//! Provides different renderings of a finished record:
//! - Text: Human-readable format (default)
//! - Json: Compact machine-readable JSON, one object per line
//! - Logfmt: Key-value format compatible with log aggregation tools

use super::params::Params;
use super::timestamp::TimestampFormat;
use super::value::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix for a field whose key collides with a key the format emits itself
const FIELD_KEY_PREFIX: &str = "fields.";

const JSON_RESERVED_KEYS: [&str; 4] = ["t", "l", "c", "msg"];
const LOGFMT_RESERVED_KEYS: [&str; 4] = ["t", "level", "caller", "msg"];

fn field_key(key: String, reserved: &[&str]) -> String {
    if reserved.contains(&key.as_str()) {
        format!("{}{}", FIELD_KEY_PREFIX, key)
    } else {
        key
    }
}

/// Output format for records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `10:30:45.123 main.rs:12 >INFO - Request processed user=alice`
    #[default]
    Text,

    /// Compact JSON format
    ///
    /// Example: `{"t":"...","l":"I","c":"main.rs:12","msg":"Request processed","user":"alice"}`
    Json,

    /// Logfmt format (key=value pairs)
    ///
    /// Example: `t=10:30:45.123 level=INFO msg="Request processed" user=alice`
    Logfmt,
}

impl OutputFormat {
    /// Render a record according to this output format
    pub fn format(
        &self,
        params: &Params,
        timestamp_format: &TimestampFormat,
        at: &DateTime<Utc>,
    ) -> String {
        match self {
            OutputFormat::Text => self.format_text(params, timestamp_format, at),
            OutputFormat::Json => self.format_json(params, timestamp_format, at),
            OutputFormat::Logfmt => self.format_logfmt(params, timestamp_format, at),
        }
    }

    /// Format as human-readable text
    fn format_text(
        &self,
        params: &Params,
        timestamp_format: &TimestampFormat,
        at: &DateTime<Utc>,
    ) -> String {
        let mut out = timestamp_format.format(at);
        if let Some(ref caller) = params.caller {
            out.push(' ');
            out.push_str(&caller.short());
        }
        out.push_str(&format!(" >{:.5} - {}", params.level.to_str(), params.message()));

        for (key, value) in params.field_pairs() {
            out.push_str(&format!(" {}={}", key, value));
        }

        out
    }

    /// Format as one JSON object, keys in emission order
    fn format_json(
        &self,
        params: &Params,
        timestamp_format: &TimestampFormat,
        at: &DateTime<Utc>,
    ) -> String {
        let mut entries: Vec<(String, serde_json::Value)> = Vec::with_capacity(4 + params.fields.len() / 2);

        let timestamp = if timestamp_format.is_numeric() {
            serde_json::Value::from(at.timestamp_millis())
        } else {
            serde_json::Value::from(timestamp_format.format(at))
        };
        entries.push(("t".to_string(), timestamp));
        entries.push(("l".to_string(), serde_json::Value::from(params.level.short_code())));
        if let Some(ref caller) = params.caller {
            entries.push(("c".to_string(), serde_json::Value::from(caller.short())));
        }
        entries.push(("msg".to_string(), serde_json::Value::from(params.message())));

        for (key, value) in params.field_pairs() {
            entries.push((field_key(key, &JSON_RESERVED_KEYS), value.to_json_value()));
        }

        let body: Vec<String> = entries
            .iter()
            .map(|(key, value)| format!("{}:{}", serde_json::Value::from(key.as_str()), value))
            .collect();
        format!("{{{}}}", body.join(","))
    }

    /// Format as logfmt (key=value pairs)
    fn format_logfmt(
        &self,
        params: &Params,
        timestamp_format: &TimestampFormat,
        at: &DateTime<Utc>,
    ) -> String {
        let mut parts = vec![
            format!("t={}", self.escape_logfmt_value(&timestamp_format.format(at))),
            format!("level={}", params.level.to_str()),
        ];

        if let Some(ref caller) = params.caller {
            parts.push(format!("caller={}", self.escape_logfmt_value(&caller.short())));
        }

        // Message is always quoted
        parts.push(format!("msg={}", self.quote_logfmt_value(&params.message())));

        for (key, value) in params.field_pairs() {
            let formatted_value = match value {
                Value::String(s) => self.escape_logfmt_value(s),
                other => other.to_string(),
            };
            let key = field_key(self.escape_logfmt_key(&key), &LOGFMT_RESERVED_KEYS);
            parts.push(format!("{}={}", key, formatted_value));
        }

        parts.join(" ")
    }

    /// Escape a logfmt key (remove spaces and special chars)
    fn escape_logfmt_key(&self, key: &str) -> String {
        key.chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '!')
            .collect()
    }

    /// Escape a logfmt value (quote if contains spaces)
    fn escape_logfmt_value(&self, value: &str) -> String {
        if value.is_empty() || value.contains(' ') || value.contains('"') || value.contains('=') {
            self.quote_logfmt_value(value)
        } else {
            value.to_string()
        }
    }

    /// Quote a logfmt value
    fn quote_logfmt_value(&self, value: &str) -> String {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
