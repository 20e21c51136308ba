//! Timestamp formatting utilities
//!
//! Records carry no time of their own; handlers stamp them when they emit.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options for handler output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// Local wall-clock time with milliseconds: `10:30:45.123`
    #[default]
    TimeOfDay,

    /// ISO 8601 with milliseconds and offset: `2025-01-08T10:30:45.123+0000`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_xlog::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>`, rendering wall-clock variants in local time
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        let local = datetime.with_timezone(&Local);
        match self {
            TimestampFormat::TimeOfDay => local.format("%H:%M:%S%.3f").to_string(),
            TimestampFormat::Iso8601 => local.format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string(),
            TimestampFormat::Rfc3339 => local.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => local.format(format_str).to_string(),
        }
    }

    /// Check if this is a numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::UnixMillis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123)
    }

    #[test]
    fn test_time_of_day_shape() {
        let result = TimestampFormat::TimeOfDay.format(&fixed_datetime());
        assert_eq!(result.len(), "10:30:45.123".len());
        assert!(result.ends_with(":45.123"));
    }

    #[test]
    fn test_iso8601_has_offset() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert!(result.contains('T'));
        assert!(result.contains(".123"));
        assert!(result.ends_with(|c: char| c.is_ascii_digit()));
    }

    #[test]
    fn test_unix_millis_format() {
        let result = TimestampFormat::UnixMillis.format(&fixed_datetime());
        assert_eq!(result, "1736332245123");
        assert!(TimestampFormat::UnixMillis.is_numeric());
        assert!(!TimestampFormat::Iso8601.is_numeric());
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025");
    }
}
