//! Logger configuration
//!
//! `Options` is an immutable snapshot handed to the logger at construction.
//! Every field has a default, so partial JSON configuration is accepted.

use super::error::Result;
use super::level::Level;
use super::serializer::DEFAULT_LOG_FORMAT;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// Configuration for a [`Logger`](crate::Logger)
///
/// # Examples
///
/// ```
/// use rust_kvlog::{Level, Options};
///
/// let options = Options::new()
///     .with_json(true)
///     .with_file_line(true)
///     .with_level(Level::Debug);
///
/// let parsed = Options::from_json_str(r#"{"enable_json": true, "level": "Debug"}"#).unwrap();
/// assert!(parsed.enable_json);
/// assert_eq!(parsed.level, Level::Debug);
/// assert_eq!(parsed.log_format, "[%s] %s %s");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Build structured records and encode them as JSON
    pub enable_json: bool,
    /// Add the caller's `file:line` under `file`
    pub enable_file_line: bool,
    /// Add the calling thread's id under `thread_id`
    pub enable_thread_id: bool,
    /// Write each line as a single JSON object that also carries
    /// `timestamp` and `level`, instead of filling `log_format`
    pub json_log: bool,
    /// Timestamp rendering
    pub time_format: TimestampFormat,
    /// Plain-text line template, see [`LineFormat`](crate::LineFormat)
    pub log_format: String,
    /// Initial level threshold
    pub level: Level,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            enable_json: false,
            enable_file_line: false,
            enable_thread_id: false,
            json_log: false,
            time_format: TimestampFormat::default(),
            log_format: DEFAULT_LOG_FORMAT.to_string(),
            level: Level::default(),
        }
    }
}

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_json(mut self, enable: bool) -> Self {
        self.enable_json = enable;
        self
    }

    #[must_use]
    pub fn with_file_line(mut self, enable: bool) -> Self {
        self.enable_file_line = enable;
        self
    }

    #[must_use]
    pub fn with_thread_id(mut self, enable: bool) -> Self {
        self.enable_thread_id = enable;
        self
    }

    #[must_use]
    pub fn with_json_log(mut self, enable: bool) -> Self {
        self.json_log = enable;
        self
    }

    #[must_use]
    pub fn with_time_format(mut self, format: TimestampFormat) -> Self {
        self.time_format = format;
        self
    }

    #[must_use]
    pub fn with_log_format(mut self, template: impl Into<String>) -> Self {
        self.log_format = template.into();
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Whether calls produce records rather than plain text
    #[inline]
    pub fn structured(&self) -> bool {
        self.enable_json || self.json_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoggerError;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert!(!options.enable_json);
        assert!(!options.enable_file_line);
        assert!(!options.enable_thread_id);
        assert!(!options.json_log);
        assert_eq!(options.time_format, TimestampFormat::Iso8601);
        assert_eq!(options.log_format, "[%s] %s %s");
        assert_eq!(options.level, Level::Informational);
    }

    #[test]
    fn test_builder_pattern() {
        let options = Options::new()
            .with_json(true)
            .with_file_line(true)
            .with_thread_id(true)
            .with_time_format(TimestampFormat::custom("xxx"))
            .with_log_format("yyy")
            .with_level(Level::Error);

        assert!(options.enable_json);
        assert!(options.enable_file_line);
        assert!(options.enable_thread_id);
        assert_eq!(options.time_format, TimestampFormat::custom("xxx"));
        assert_eq!(options.log_format, "yyy");
        assert_eq!(options.level, Level::Error);
    }

    #[test]
    fn test_structured() {
        assert!(!Options::new().structured());
        assert!(Options::new().with_json(true).structured());
        assert!(Options::new().with_json_log(true).structured());
    }

    #[test]
    fn test_partial_json() {
        let options = Options::from_json_str(r#"{"json_log": true}"#).unwrap();
        assert!(options.json_log);
        assert_eq!(options.level, Level::Informational);
    }

    #[test]
    fn test_invalid_json() {
        let err = Options::from_json_str(r#"{"level": "Verbose"}"#).unwrap_err();
        assert!(matches!(err, LoggerError::Json(_)));
    }
}
