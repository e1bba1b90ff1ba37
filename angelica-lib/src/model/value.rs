//! Value enum for dynamic field values

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use super::Record;

/// A dynamic value held by a [`Record`] field.
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | boolean | `Bool` |
/// | integer | `Int` |
/// | other number | `Float` |
/// | string | `String` |
/// | array of objects, or empty array | `Records` |
/// | any other array | `List` |
/// | object | `Record` |
///
/// `Records` is what a node's children field holds, so a forest is simply a
/// `Vec<Record>` whose elements nest further `Records` values.
///
/// A sequence has one canonical form: every conversion into `Value` turns a
/// sequence made only of records (including an empty one) into `Records`.
/// Equality follows the same rule, so `List(vec![])` equals
/// `Records(vec![])`.
///
/// # Example
///
/// ```
/// use angelica_lib::model::Value;
///
/// let name = Value::from("root");
/// let id = Value::from(1);
/// let empty = Value::Null;
/// assert!(empty.is_falsy());
/// assert_eq!(id.as_key().as_deref(), Some("1"));
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Sequence of arbitrary values.
    List(Vec<Value>),
    /// Nested record.
    Record(Box<Record>),
    /// Sequence of records, typically a node's children.
    Records(Vec<Record>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a boolean.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` for integers and floats alike.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Returns `true` if this is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if this is a nested record.
    pub fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Returns `true` for both `List` and `Records`.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_) | Value::Records(_))
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::Records(_) => "records",
        }
    }

    /// Returns `true` for the values JavaScript treats as false in a
    /// condition: null, `false`, zero, NaN and the empty string.
    ///
    /// Collections and records are never falsy, even when empty.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Int(n) => *n == 0,
            Value::Float(f) => *f == 0.0 || f.is_nan(),
            Value::String(s) => s.is_empty(),
            Value::List(_) | Value::Record(_) | Value::Records(_) => false,
        }
    }

    /// Returns the string this value is indexed under when used as a lookup
    /// key, or `None` for values that cannot act as a key.
    ///
    /// Integers and their decimal strings share a slot, matching how the
    /// records' origin (JSON objects) coerces keys.
    pub fn as_key(&self) -> Option<String> {
        match self {
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(f) if f.is_finite() => Some(format_float_key(*f)),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Returns the string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number as `f64`, if this is an integer or float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Builds a sequence value in canonical form.
    ///
    /// Items that are all records (vacuously so for no items) become
    /// `Records`; anything else stays a `List`, with nested lists normalized
    /// the same way.
    pub fn list(items: Vec<Value>) -> Value {
        if items.iter().all(Value::is_record) {
            Value::Records(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Record(record) => Some(*record),
                        _ => None,
                    })
                    .collect(),
            )
        } else {
            Value::List(items.into_iter().map(Value::normalized).collect())
        }
    }

    /// Returns this value in canonical form. Only `List` values change.
    pub fn normalized(self) -> Value {
        match self {
            Value::List(items) => Value::list(items),
            other => other,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Records(a), Value::Records(b)) => a == b,
            (Value::List(items), Value::Records(records))
            | (Value::Records(records), Value::List(items)) => {
                items.len() == records.len()
                    && items.iter().zip(records).all(|(item, record)| {
                        matches!(item, Value::Record(inner) if **inner == *record)
                    })
            }
            _ => false,
        }
    }
}

/// Whole floats print without a fractional part so `2.0` keys like `2`.
fn format_float_key(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                if items.iter().all(|item| item.is_object()) {
                    Value::Records(items.into_iter().map(Record::from_json_object).collect())
                } else {
                    Value::List(items.into_iter().map(Value::from).collect())
                }
            }
            serde_json::Value::Object(map) => {
                Value::Record(Box::new(Record::from_json_map(map)))
            }
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(Box::new(v))
    }
}

impl From<Vec<Record>> for Value {
    fn from(v: Vec<Record>) -> Self {
        Value::Records(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::list(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}
