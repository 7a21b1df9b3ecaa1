//! Argument normalization
//!
//! Every log call hands the logger an [`Args`] value. With JSON output
//! disabled the arguments are flattened into one line of text; otherwise
//! they become a [`Record`] following these rules, first match wins:
//!
//! 1. no arguments: `{"message": null}`
//! 2. a single mapping: its entries, copied as-is
//! 3. an even number of arguments whose even positions are all strings:
//!    `key, value, key, value, ...`
//! 4. anything else: `message1, message2, ...` in argument order
//!
//! A non-string key anywhere in rule 3 sends the whole list to rule 4.
//! Error values become their message strings under rules 3 and 4.

use super::value::{FieldValue, Record};

/// Key used for formatted messages and for an empty argument list
pub const MESSAGE_KEY: &str = "message";

/// Key that carries the error in [`Args::ErrorWithContext`]
pub const ERROR_KEY: &str = "error";

/// Shape of the arguments given to a log call
#[derive(Debug, Clone, PartialEq)]
pub enum Args {
    /// Untyped argument list, classified when the record is built
    List(Vec<FieldValue>),
    /// A single value
    Value(FieldValue),
    /// A ready-made mapping
    Mapping(Record),
    /// Explicit key/value pairs
    Pairs(Vec<(String, FieldValue)>),
    /// Text produced by a formatted log method
    Message(String),
    /// An error plus extra context, logged under `error`
    ErrorWithContext {
        error: FieldValue,
        context: Vec<FieldValue>,
    },
}

/// Normalized form of a log call
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Record(Record),
}

impl Args {
    /// Normalize into text (`structured == false`) or a record
    pub fn build(self, structured: bool) -> Payload {
        if structured {
            Payload::Record(self.into_record())
        } else {
            Payload::Text(self.into_text())
        }
    }

    /// Flatten into one line of text
    pub fn into_text(self) -> String {
        match self {
            Args::Message(text) => text,
            Args::Value(value) => value.to_string(),
            Args::Mapping(record) => FieldValue::Map(record).to_string(),
            Args::List(values) => join_plain(&values),
            Args::Pairs(pairs) => {
                let values: Vec<FieldValue> = pairs
                    .into_iter()
                    .flat_map(|(k, v)| [FieldValue::String(k), v])
                    .collect();
                join_plain(&values)
            }
            Args::ErrorWithContext { error, context } => {
                join_plain(&error_list(error, context))
            }
        }
    }

    /// Normalize into a record
    pub fn into_record(self) -> Record {
        match self {
            Args::Message(text) => Record::new().with_field(MESSAGE_KEY, text),
            Args::Value(value) => record_from_list(vec![value]),
            Args::Mapping(record) => record,
            Args::List(values) => record_from_list(values),
            Args::Pairs(pairs) => pairs
                .into_iter()
                .map(|(k, v)| (k, v.flatten_error()))
                .collect(),
            Args::ErrorWithContext { error, context } => {
                record_from_list(error_list(error, context))
            }
        }
    }
}

fn error_list(error: FieldValue, context: Vec<FieldValue>) -> Vec<FieldValue> {
    let mut values = Vec::with_capacity(context.len() + 2);
    values.push(FieldValue::from(ERROR_KEY));
    values.push(error);
    values.extend(context);
    values
}

fn record_from_list(mut values: Vec<FieldValue>) -> Record {
    match values.len() {
        0 => return Record::new().with_field(MESSAGE_KEY, FieldValue::Null),
        1 if matches!(values[0], FieldValue::Map(_)) => {
            if let Some(FieldValue::Map(record)) = values.pop() {
                return record;
            }
        }
        _ => {}
    }

    let all_keys_are_strings = values.iter().step_by(2).all(FieldValue::is_string);
    if values.len() % 2 == 0 && all_keys_are_strings {
        let mut record = Record::new();
        let mut iter = values.into_iter();
        while let (Some(FieldValue::String(key)), Some(value)) = (iter.next(), iter.next()) {
            record.insert(key, value.flatten_error());
        }
        return record;
    }

    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| (format!("{}{}", MESSAGE_KEY, i + 1), value.flatten_error()))
        .collect()
}

/// Join values the way a print without separators would
///
/// A space goes between two neighbours only when neither is a string.
fn join_plain(values: &[FieldValue]) -> String {
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 && !value.is_string() && !values[i - 1].is_string() {
            out.push(' ');
        }
        out.push_str(&value.to_string());
    }
    out
}

impl From<Vec<FieldValue>> for Args {
    fn from(values: Vec<FieldValue>) -> Self {
        Args::List(values)
    }
}

impl From<FieldValue> for Args {
    fn from(value: FieldValue) -> Self {
        Args::Value(value)
    }
}

impl From<Record> for Args {
    fn from(record: Record) -> Self {
        Args::Mapping(record)
    }
}

impl From<&str> for Args {
    fn from(text: &str) -> Self {
        Args::Value(FieldValue::from(text))
    }
}

impl From<String> for Args {
    fn from(text: String) -> Self {
        Args::Value(FieldValue::String(text))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> From<Vec<(K, V)>> for Args {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Args::Pairs(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<FieldValue>, const N: usize> From<[(K, V); N]> for Args {
    fn from(pairs: [(K, V); N]) -> Self {
        Args::Pairs(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
