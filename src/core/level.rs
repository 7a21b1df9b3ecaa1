//! Syslog severity levels
//!
//! Levels follow RFC 5424: `Emergency` (0) is the most severe and `Debug` (7)
//! the least. A record is emitted when its level is numerically less than or
//! equal to the logger's threshold.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Level {
    /// System is unusable
    Emergency = 0,
    /// Action must be taken immediately
    Alert = 1,
    /// Critical conditions
    Critical = 2,
    /// Error conditions
    Error = 3,
    /// Warning conditions
    Warning = 4,
    /// Normal but significant condition
    Notice = 5,
    /// Informational messages
    #[default]
    Informational = 6,
    /// Debug-level messages
    Debug = 7,
}

impl Level {
    /// Every level, most severe first
    pub const ALL: [Level; 8] = [
        Level::Emergency,
        Level::Alert,
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Notice,
        Level::Informational,
        Level::Debug,
    ];

    /// Name written into log lines and the `level` JSON field
    pub fn name(&self) -> &'static str {
        match self {
            Level::Emergency => "EMERG",
            Level::Alert => "ALERT",
            Level::Critical => "CRIT",
            Level::Error => "ERR",
            Level::Warning => "WARNING",
            Level::Notice => "NOTICE",
            Level::Informational => "INFO",
            Level::Debug => "DEBUG",
        }
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether a record at `self` passes a logger whose threshold is `threshold`
    #[inline]
    pub fn is_enabled(self, threshold: Level) -> bool {
        self <= threshold
    }

    /// Convert a raw value, falling back to `Informational` when out of range
    #[inline]
    pub const fn from_u8_or_default(value: u8) -> Level {
        match value {
            0 => Level::Emergency,
            1 => Level::Alert,
            2 => Level::Critical,
            3 => Level::Error,
            4 => Level::Warning,
            5 => Level::Notice,
            7 => Level::Debug,
            _ => Level::Informational,
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = LoggerError;

    fn try_from(value: u8) -> Result<Self, LoggerError> {
        if value > Level::Debug as u8 {
            return Err(LoggerError::invalid_level(value));
        }
        Ok(Level::from_u8_or_default(value))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level as u8
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    /// Accepts the short name (`ERR`), the long name (`error`) or the numeric value
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u8>() {
            return Level::try_from(n);
        }
        match trimmed.to_uppercase().as_str() {
            "EMERG" | "EMERGENCY" => Ok(Level::Emergency),
            "ALERT" => Ok(Level::Alert),
            "CRIT" | "CRITICAL" => Ok(Level::Critical),
            "ERR" | "ERROR" => Ok(Level::Error),
            "WARNING" | "WARN" => Ok(Level::Warning),
            "NOTICE" => Ok(Level::Notice),
            "INFO" | "INFORMATIONAL" => Ok(Level::Informational),
            "DEBUG" => Ok(Level::Debug),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}
