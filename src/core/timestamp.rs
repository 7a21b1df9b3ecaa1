//! Timestamp rendering for log lines
//!
//! All formats render in UTC. The default matches the JavaScript ISO date
//! string (`2025-01-08T10:30:45.123Z`) so existing log consumers keep parsing.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const ISO8601_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Timestamp format used for the first placeholder of the line template and
/// for the `timestamp` field in JSON-log mode
///
/// # Examples
///
/// ```
/// use rust_kvlog::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Iso8601.format(&at), "2025-01-08T10:30:45.000Z");
/// assert_eq!(TimestampFormat::custom("%Y/%m/%d").format(&at), "2025/01/08");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 with offset: `2025-01-08T10:30:45.123+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Any strftime-compatible pattern
    Custom(String),
}

impl TimestampFormat {
    /// Build a custom strftime format
    pub fn custom(pattern: impl Into<String>) -> Self {
        TimestampFormat::Custom(pattern.into())
    }

    /// Reject custom patterns chrono cannot render, such as `%Q` or a trailing `%`
    pub fn validate(&self) -> Result<()> {
        let TimestampFormat::Custom(pattern) = self else {
            return Ok(());
        };
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::config(
                "TimestampFormat",
                format!("invalid strftime pattern '{}'", pattern),
            ));
        }
        Ok(())
    }

    /// Render `datetime`; a custom pattern that fails to render falls back to ISO 8601
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format(ISO8601_PATTERN).to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(pattern) => {
                let mut out = String::new();
                if write!(out, "{}", datetime.format(pattern)).is_err() {
                    out.clear();
                    out.push_str(&datetime.format(ISO8601_PATTERN).to_string());
                }
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_iso8601_micros_format() {
        let result = TimestampFormat::Iso8601Micros.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123456Z");
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert!(result.starts_with("2025-01-08T10:30:45"));
        assert!(result.ends_with("+00:00"));
    }

    #[test]
    fn test_unix_millis_format() {
        let result = TimestampFormat::UnixMillis.format(&fixed_datetime());
        assert_eq!(result, "1736332245123");
    }

    #[test]
    fn test_custom_format() {
        let result = TimestampFormat::custom("%d/%b/%Y:%H:%M:%S +0000").format(&fixed_datetime());
        assert_eq!(result, "08/Jan/2025:10:30:45 +0000");
    }

    #[test]
    fn test_validate_custom_patterns() {
        assert!(TimestampFormat::custom("%Y-%m-%d %H:%M").validate().is_ok());
        assert!(TimestampFormat::Iso8601.validate().is_ok());

        for pattern in ["%Q", "%Y-%"] {
            let err = TimestampFormat::custom(pattern).validate().unwrap_err();
            assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        }
    }

    #[test]
    fn test_invalid_custom_pattern_falls_back() {
        for pattern in ["%Q", "%Y-%"] {
            let result = TimestampFormat::custom(pattern).format(&fixed_datetime());
            assert_eq!(result, "2025-01-08T10:30:45.123Z");
        }
    }

    #[test]
    fn test_deserialization() {
        let format: TimestampFormat = serde_json::from_str("\"Iso8601\"").expect("deserialize");
        assert_eq!(format, TimestampFormat::Iso8601);

        let format: TimestampFormat =
            serde_json::from_str(r#"{"Custom":"%Y-%m-%d"}"#).expect("deserialize Custom");
        assert_eq!(format, TimestampFormat::custom("%Y-%m-%d"));
    }
}
