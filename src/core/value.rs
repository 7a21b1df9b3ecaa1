//! Values and records for structured logging
//!
//! This module provides:
//! - `FieldValue`: one typed value inside a record or an argument list
//! - `Record`: the key-sorted map a log call is normalized into

use super::nil::ErrorLike;
use super::serializer;
use chrono::{DateTime, Utc};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::collections::{btree_map, BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Array(Vec<FieldValue>),
    Map(Record),
    /// Message of an error-like value; flattened to a string when a record is built
    Error(String),
}

impl FieldValue {
    /// Capture the message of an error-like value
    ///
    /// Values that classify as nil (see [`crate::is_nil`]) become `Null`.
    pub fn error<E: ErrorLike + ?Sized>(err: &E) -> Self {
        match err.failure_message() {
            Some(message) => FieldValue::Error(message),
            None => FieldValue::Null,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, FieldValue::String(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Replace an `Error` by its message string, leaving other values untouched
    #[must_use]
    pub fn flatten_error(self) -> Self {
        match self {
            FieldValue::Error(message) => FieldValue::String(message),
            other => other,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("<nil>"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::UInt(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::String(s) | FieldValue::Error(s) => f.write_str(s),
            FieldValue::Array(_) | FieldValue::Map(_) => {
                f.write_str(&serializer::encode_or_fallback(self).0)
            }
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::UInt(u) => serializer.serialize_u64(*u),
            FieldValue::Float(fl) if fl.is_finite() => serializer.serialize_f64(*fl),
            FieldValue::Float(fl) => Err(S::Error::custom(format!("unsupported value: {}", fl))),
            FieldValue::String(s) | FieldValue::Error(s) => serializer.serialize_str(s),
            FieldValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            FieldValue::Map(record) => record.serialize(serializer),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<Cow<'_, str>> for FieldValue {
    fn from(s: Cow<'_, str>) -> Self {
        FieldValue::String(s.into_owned())
    }
}

impl From<char> for FieldValue {
    fn from(c: char) -> Self {
        FieldValue::String(c.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

macro_rules! field_value_from_int {
    ($variant:ident, $target:ty: $($t:ty),+) => {
        $(
            impl From<$t> for FieldValue {
                fn from(v: $t) -> Self {
                    FieldValue::$variant(v as $target)
                }
            }
        )+
    };
}

field_value_from_int!(Int, i64: i8, i16, i32, i64, isize);
field_value_from_int!(UInt, u64: u8, u16, u32, u64, usize);

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<()> for FieldValue {
    fn from(_: ()) -> Self {
        FieldValue::Null
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<Record> for FieldValue {
    fn from(record: Record) -> Self {
        FieldValue::Map(record)
    }
}

impl<V: Into<FieldValue>> From<BTreeMap<String, V>> for FieldValue {
    fn from(map: BTreeMap<String, V>) -> Self {
        FieldValue::Map(map.into_iter().collect())
    }
}

impl<V: Into<FieldValue>> From<HashMap<String, V>> for FieldValue {
    fn from(map: HashMap<String, V>) -> Self {
        FieldValue::Map(map.into_iter().collect())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(time: DateTime<Utc>) -> Self {
        FieldValue::String(time.to_rfc3339())
    }
}

impl From<Duration> for FieldValue {
    fn from(d: Duration) -> Self {
        FieldValue::String(format!("{:?}", d))
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::UInt(u)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => FieldValue::String(s),
            Value::Array(items) => FieldValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => FieldValue::Map(map.into_iter().collect()),
        }
    }
}

/// Structured key/value record built for a single log call
///
/// Keys are unique and kept sorted, so encoded records are byte-stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Add a field to the record
    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Insert a field, returning the value it replaced
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<FieldValue>
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Copy every field of `other` into this record; fields of `other` win
    pub fn merge(&mut self, other: Record) {
        self.fields.extend(other.fields);
    }

}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> Extend<(K, V)> for Record {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.fields.insert(k.into(), v.into());
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, FieldValue);
    type IntoIter = btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Compact JSON, the same text a record shows as a map value
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serializer::encode_or_fallback(self).0)
    }
}
