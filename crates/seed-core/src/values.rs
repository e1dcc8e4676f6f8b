//! Generated values and records.
//!
//! `SeedValue` is the type-agnostic value produced by the generators and
//! `SeedRecord` is the ephemeral field map submitted to a record sink.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Raw generated value.
///
/// `Null` doubles as the "unresolvable" marker: the orchestrator omits a
/// field whose generator returned `Null` instead of writing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeedValue {
    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    /// String value
    String(String),

    /// UUID value
    Uuid(Uuid),

    /// Date/time with timezone
    DateTime(DateTime<Utc>),

    /// Array of values (list fields)
    Array(Vec<SeedValue>),

    /// Null value
    Null,
}

impl SeedValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an f64. Integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a DateTime.
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Try to get this value as an array.
    pub fn as_array(&self) -> Option<&[SeedValue]> {
        match self {
            Self::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Convert a JSON value (configuration literal or stored record) into a
    /// seed value. Objects are kept as their JSON text.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => SeedValue::Null,
            serde_json::Value::Bool(b) => SeedValue::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    SeedValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    SeedValue::Float(f)
                } else {
                    SeedValue::String(n.to_string())
                }
            }
            serde_json::Value::String(s) => SeedValue::String(s.clone()),
            serde_json::Value::Array(arr) => {
                SeedValue::Array(arr.iter().map(SeedValue::from_json).collect())
            }
            serde_json::Value::Object(_) => SeedValue::String(json.to_string()),
        }
    }

    /// Convert to a JSON value. Dates render as RFC 3339, UUIDs hyphenated.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SeedValue::Bool(b) => serde_json::Value::Bool(*b),
            SeedValue::Int(i) => serde_json::Value::from(*i),
            SeedValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            SeedValue::String(s) => serde_json::Value::String(s.clone()),
            SeedValue::Uuid(u) => serde_json::Value::String(u.to_string()),
            SeedValue::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
            SeedValue::Array(arr) => {
                serde_json::Value::Array(arr.iter().map(SeedValue::to_json).collect())
            }
            SeedValue::Null => serde_json::Value::Null,
        }
    }
}

impl fmt::Display for SeedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedValue::Bool(b) => write!(f, "{b}"),
            SeedValue::Int(i) => write!(f, "{i}"),
            SeedValue::Float(v) => write!(f, "{v}"),
            SeedValue::String(s) => f.write_str(s),
            SeedValue::Uuid(u) => write!(f, "{u}"),
            SeedValue::DateTime(dt) => f.write_str(&dt.to_rfc3339()),
            SeedValue::Array(arr) => {
                f.write_str("[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            SeedValue::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for SeedValue {
    fn from(s: &str) -> Self {
        SeedValue::String(s.to_string())
    }
}

impl From<String> for SeedValue {
    fn from(s: String) -> Self {
        SeedValue::String(s)
    }
}

impl From<i64> for SeedValue {
    fn from(i: i64) -> Self {
        SeedValue::Int(i)
    }
}

impl From<bool> for SeedValue {
    fn from(b: bool) -> Self {
        SeedValue::Bool(b)
    }
}

/// One generated record, scoped to a single insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedRecord {
    /// Model name
    pub model: String,

    /// Iteration index within the model's seeding pass
    pub index: u64,

    /// Name of the primary key field, when the model declares one
    pub id_field: Option<String>,

    /// Field values (field name -> value)
    pub fields: BTreeMap<String, SeedValue>,
}

impl SeedRecord {
    /// Create an empty record.
    pub fn new(model: impl Into<String>, index: u64) -> Self {
        Self {
            model: model.into(),
            index,
            id_field: None,
            fields: BTreeMap::new(),
        }
    }

    /// Create a new record with a builder pattern.
    pub fn builder(model: impl Into<String>, index: u64) -> SeedRecordBuilder {
        SeedRecordBuilder {
            record: Self::new(model, index),
        }
    }

    /// Get a field value by name.
    pub fn get_field(&self, name: &str) -> Option<&SeedValue> {
        self.fields.get(name)
    }

    /// Set a field value.
    pub fn insert(&mut self, name: impl Into<String>, value: SeedValue) {
        self.fields.insert(name.into(), value);
    }

    /// The primary key value, if present.
    pub fn id(&self) -> Option<&SeedValue> {
        self.id_field
            .as_deref()
            .and_then(|field| self.fields.get(field))
    }

    /// Get the number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Render the record as a JSON object.
    pub fn to_json(&self) -> serde_json::Map<String, serde_json::Value> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }
}

/// Builder for `SeedRecord`.
pub struct SeedRecordBuilder {
    record: SeedRecord,
}

impl SeedRecordBuilder {
    /// Name the primary key field.
    pub fn id_field(mut self, name: impl Into<String>) -> Self {
        self.record.id_field = Some(name.into());
        self
    }

    /// Add a field to the record.
    pub fn field(mut self, name: impl Into<String>, value: SeedValue) -> Self {
        self.record.fields.insert(name.into(), value);
        self
    }

    /// Build the record.
    pub fn build(self) -> SeedRecord {
        self.record
    }
}
