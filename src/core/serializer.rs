//! Record encoding and line templates
//!
//! JSON encoding never fails the log call: a value that cannot be encoded
//! (a non-finite float, for instance) is replaced by a
//! `{"json-marshal-error": "..."}` object carrying the encoder's message.

use super::error::{LoggerError, Result};
use super::level::Level;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Key of the substitute object written when encoding fails
pub const MARSHAL_ERROR_KEY: &str = "json-marshal-error";

/// Default plain-text template: `[timestamp] LEVEL message`
pub const DEFAULT_LOG_FORMAT: &str = "[%s] %s %s";

/// Encode a value as compact JSON
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Substitute object for a failed encode
pub fn marshal_error(err: &LoggerError) -> String {
    let text = match err {
        LoggerError::Json(inner) => inner.to_string(),
        other => other.to_string(),
    };
    let mut map = serde_json::Map::new();
    map.insert(MARSHAL_ERROR_KEY.to_string(), serde_json::Value::String(text));
    serde_json::Value::Object(map).to_string()
}

/// Encode a value, substituting the marshal-error object on failure
///
/// The flag is `false` when the substitute was used.
pub fn encode_or_fallback<T: Serialize + ?Sized>(value: &T) -> (String, bool) {
    match encode(value) {
        Ok(json) => (json, true),
        Err(err) => (marshal_error(&err), false),
    }
}

/// Strip exactly one trailing newline
#[inline]
pub fn trim_newline(message: &str) -> &str {
    message.strip_suffix('\n').unwrap_or(message)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Timestamp,
    Level,
    Message,
}

/// Parsed plain-text line template
///
/// Placeholders (`%s` or `%v`) are filled in order with the timestamp, the
/// level name and the message; `%%` is a literal percent sign. A template
/// with fewer than three placeholders drops the remaining values.
///
/// ```
/// use rust_kvlog::{Level, LineFormat};
///
/// let format: LineFormat = "%s | %s | %s".parse().unwrap();
/// assert_eq!(format.render("t0", Level::Notice, "up"), "t0 | NOTICE | up");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormat {
    template: String,
    segments: Vec<Segment>,
}

impl LineFormat {
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut placeholders = 0usize;
        let mut chars = template.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            match chars.next() {
                Some('%') => literal.push('%'),
                Some('s') | Some('v') => {
                    let segment = match placeholders {
                        0 => Segment::Timestamp,
                        1 => Segment::Level,
                        2 => Segment::Message,
                        _ => {
                            return Err(LoggerError::config(
                                "LineFormat",
                                format!("'{}' has more than three placeholders", template),
                            ))
                        }
                    };
                    placeholders += 1;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                Some(verb) => {
                    return Err(LoggerError::config(
                        "LineFormat",
                        format!("unsupported verb %{} in '{}'", verb, template),
                    ))
                }
                None => {
                    return Err(LoggerError::config(
                        "LineFormat",
                        format!("dangling '%' at the end of '{}'", template),
                    ))
                }
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render one line without the trailing newline
    pub fn render(&self, timestamp: &str, level: Level, message: &str) -> String {
        let mut line = String::with_capacity(timestamp.len() + message.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::Timestamp => line.push_str(timestamp),
                Segment::Level => line.push_str(level.name()),
                Segment::Message => line.push_str(message),
            }
        }
        line
    }
}

impl Default for LineFormat {
    fn default() -> Self {
        Self {
            template: DEFAULT_LOG_FORMAT.to_string(),
            segments: vec![
                Segment::Literal("[".to_string()),
                Segment::Timestamp,
                Segment::Literal("] ".to_string()),
                Segment::Level,
                Segment::Literal(" ".to_string()),
                Segment::Message,
            ],
        }
    }
}

impl FromStr for LineFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        LineFormat::parse(s)
    }
}

impl fmt::Display for LineFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}
