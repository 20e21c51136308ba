//! Severity level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Ordered severity of a record.
///
/// The ordinals start at -1 so that the zero value of a record is `Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "UPPERCASE")]
#[repr(i8)]
pub enum Level {
    Debug = -1,
    #[default]
    Info = 0,
    Warning = 1,
    Error = 2,
    Panic = 3,
    Fatal = 4,
}

impl Level {
    /// Every level, lowest first.
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Panic,
        Level::Fatal,
    ];

    #[inline]
    pub const fn as_i8(self) -> i8 {
        self as i8
    }

    pub const fn from_i8(ordinal: i8) -> Option<Self> {
        match ordinal {
            -1 => Some(Level::Debug),
            0 => Some(Level::Info),
            1 => Some(Level::Warning),
            2 => Some(Level::Error),
            3 => Some(Level::Panic),
            4 => Some(Level::Fatal),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
        }
    }

    /// Display name for a raw ordinal; undefined ordinals render as `UNKNOWN(<n>)`.
    pub fn name_of(ordinal: i8) -> Cow<'static, str> {
        match Self::from_i8(ordinal) {
            Some(level) => Cow::Borrowed(level.to_str()),
            None => Cow::Owned(format!("UNKNOWN({})", ordinal)),
        }
    }

    /// Single-letter code used by the compact JSON encoding.
    pub fn short_code(&self) -> &'static str {
        match self {
            Level::Debug => "D",
            Level::Info => "I",
            Level::Warning => "W",
            Level::Error => "E",
            Level::Panic => "P",
            Level::Fatal => "F",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Debug => Blue,
            Level::Info => Green,
            Level::Warning => Yellow,
            Level::Error => Red,
            Level::Panic => Magenta,
            Level::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARNING" | "WARN" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "PANIC" => Ok(Level::Panic),
            "FATAL" => Ok(Level::Fatal),
            _ => Err(LoggerError::parse_level(s)),
        }
    }
}

impl TryFrom<i8> for Level {
    type Error = LoggerError;

    fn try_from(ordinal: i8) -> Result<Self, LoggerError> {
        Self::from_i8(ordinal).ok_or(LoggerError::InvalidLevel { ordinal })
    }
}

impl From<Level> for i8 {
    fn from(level: Level) -> Self {
        level.as_i8()
    }
}
