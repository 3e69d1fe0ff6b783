//! Records: the opaque entities a list screen manages.
//!
//! The engine only ever reads records through the [`Record`] trait, by field
//! name. Typed application structs implement it directly; [`DynamicRecord`] is
//! the stock implementation backed by a field map, built from JSON objects.

use crate::model::error::RecordError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared, immutable record collection handed to the engine.
///
/// Identity (`Arc::ptr_eq`) is what the engine's memo compares; replacing the
/// collection means building a new `RecordSet`.
pub type RecordSet<R> = Arc<[R]>;

/// Borrowed view of a single field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Free text.
    Text(&'a str),
    /// Whole number (identifiers, counts).
    Integer(i64),
    /// Fractional number.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// Point in time (created/updated stamps).
    Timestamp {
        /// Instant used for ordering.
        at: DateTime<Utc>,
        /// Text as it appeared in the record, used for search and output.
        raw: &'a str,
    },
    /// Multi-valued text (tags, roles).
    List(&'a [String]),
}

impl<'a> FieldValue<'a> {
    /// Text form used for searching and categorical matching.
    ///
    /// Lists join their elements with ", ". Timestamps keep their original text.
    pub fn to_text(&self) -> Cow<'a, str> {
        match *self {
            FieldValue::Text(s) => Cow::Borrowed(s),
            FieldValue::Integer(n) => Cow::Owned(n.to_string()),
            FieldValue::Float(n) => Cow::Owned(n.to_string()),
            FieldValue::Bool(b) => Cow::Borrowed(if b { "true" } else { "false" }),
            FieldValue::Timestamp { raw, .. } => Cow::Borrowed(raw),
            FieldValue::List(items) => Cow::Owned(items.join(", ")),
        }
    }
}

/// An entity that can be searched, filtered and sorted by field name.
///
/// Implementations return `None` for fields they do not have or whose value is
/// null; the engine treats those as empty text and never fails on them.
pub trait Record {
    /// Look up a field by name.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}

/// Owned field value stored in a [`DynamicRecord`].
///
/// Serializes as the plain JSON value it was read from.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedValue {
    /// Free text.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Fractional number.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// Point in time, with the text it was parsed from.
    Timestamp {
        /// Instant used for ordering.
        at: DateTime<Utc>,
        /// Original text.
        raw: String,
    },
    /// Multi-valued text.
    List(Vec<String>),
}

impl OwnedValue {
    /// Borrow as a [`FieldValue`].
    pub fn as_field(&self) -> FieldValue<'_> {
        match self {
            OwnedValue::Text(s) => FieldValue::Text(s),
            OwnedValue::Integer(n) => FieldValue::Integer(*n),
            OwnedValue::Float(n) => FieldValue::Float(*n),
            OwnedValue::Bool(b) => FieldValue::Bool(*b),
            OwnedValue::Timestamp { at, raw } => FieldValue::Timestamp { at: *at, raw },
            OwnedValue::List(items) => FieldValue::List(items),
        }
    }
}

impl Serialize for OwnedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OwnedValue::Text(s) => serializer.serialize_str(s),
            OwnedValue::Integer(n) => serializer.serialize_i64(*n),
            OwnedValue::Float(n) => serializer.serialize_f64(*n),
            OwnedValue::Bool(b) => serializer.serialize_bool(*b),
            OwnedValue::Timestamp { raw, .. } => serializer.serialize_str(raw),
            OwnedValue::List(items) => items.serialize(serializer),
        }
    }
}

impl From<&str> for OwnedValue {
    fn from(value: &str) -> Self {
        OwnedValue::Text(value.to_string())
    }
}

impl From<String> for OwnedValue {
    fn from(value: String) -> Self {
        OwnedValue::Text(value)
    }
}

impl From<i64> for OwnedValue {
    fn from(value: i64) -> Self {
        OwnedValue::Integer(value)
    }
}

impl From<bool> for OwnedValue {
    fn from(value: bool) -> Self {
        OwnedValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for OwnedValue {
    fn from(value: DateTime<Utc>) -> Self {
        OwnedValue::Timestamp {
            at: value,
            raw: value.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

impl From<Vec<String>> for OwnedValue {
    fn from(value: Vec<String>) -> Self {
        OwnedValue::List(value)
    }
}

/// Record backed by a map of field name to value.
///
/// Nested JSON objects are flattened into dotted names, so a location's
/// `{"business": {"name": "Acme"}}` is reachable as `business.name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DynamicRecord {
    fields: BTreeMap<String, OwnedValue>,
}

impl DynamicRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OwnedValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<OwnedValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a record from one element of a JSON export.
    ///
    /// - `null` fields are dropped (absent)
    /// - strings that parse as RFC 3339 become timestamps ordered by instant;
    ///   search, filters and output still see the original text
    /// - arrays keep their scalar elements as text
    /// - nested objects are flattened into dotted names
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotAnObject`] for non-objects and
    /// [`RecordError::Empty`] when nothing usable remains.
    pub fn from_json(index: usize, value: serde_json::Value) -> Result<Self, RecordError> {
        let map = match value {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(RecordError::NotAnObject {
                    index,
                    found: json_type_name(&other),
                })
            }
        };

        let mut record = DynamicRecord::new();
        flatten_into(&mut record, None, map);

        if record.is_empty() {
            return Err(RecordError::Empty { index });
        }
        Ok(record)
    }
}

impl Record for DynamicRecord {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.fields.get(name).map(OwnedValue::as_field)
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn flatten_into(
    record: &mut DynamicRecord,
    prefix: Option<&str>,
    map: serde_json::Map<String, serde_json::Value>,
) {
    for (key, value) in map {
        let name = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key,
        };
        match value {
            serde_json::Value::Object(nested) => flatten_into(record, Some(&name), nested),
            other => {
                if let Some(owned) = scalar_value(other) {
                    record.insert(name, owned);
                }
            }
        }
    }
}

fn scalar_value(value: serde_json::Value) -> Option<OwnedValue> {
    match value {
        serde_json::Value::Null | serde_json::Value::Object(_) => None,
        serde_json::Value::Bool(b) => Some(OwnedValue::Bool(b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Some(OwnedValue::Integer(i)),
            None => n.as_f64().map(OwnedValue::Float),
        },
        serde_json::Value::String(s) => match DateTime::parse_from_rfc3339(&s) {
            Ok(ts) => Some(OwnedValue::Timestamp {
                at: ts.with_timezone(&Utc),
                raw: s,
            }),
            Err(_) => Some(OwnedValue::Text(s)),
        },
        serde_json::Value::Array(items) => Some(OwnedValue::List(
            items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(s) => Some(s),
                    serde_json::Value::Number(n) => Some(n.to_string()),
                    serde_json::Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .collect(),
        )),
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
