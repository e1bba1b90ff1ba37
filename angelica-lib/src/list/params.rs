//! Loose comparison of list query parameters

use crate::model::Record;
use crate::model::Value;

/// Returns `true` if every field of `a` loosely equals the same field of `b`.
///
/// Query parameters round-trip through URLs as strings, so `"2"` must equal
/// `2`. The comparison is:
///
/// - nested records and lists: compared recursively, field by field or
///   position by position
/// - numbers and numeric strings: compared as numbers (`""` counts as 0)
/// - booleans: compared as `0`/`1` against numbers and numeric strings
/// - `Null`: equal to `Null` or to a missing field
///
/// The check is one-sided: fields present only in `b` are ignored.
///
/// # Example
///
/// ```
/// use angelica_lib::list::params_equal;
/// use angelica_lib::model::Record;
///
/// let params = Record::new().set("pageNum", 2).set("name", "abc");
/// let route_query = Record::new().set("pageNum", "2").set("name", "abc").set("active", "x");
///
/// assert!(params_equal(&params, &route_query));
/// assert!(!params_equal(&route_query, &params));
/// ```
pub fn params_equal(a: &Record, b: &Record) -> bool {
    a.fields()
        .iter()
        .all(|(field, value)| loose_eq(value, b.get(field)))
}

/// Like [`params_equal`], but `false` when either side is absent.
pub fn params_equal_opt(a: Option<&Record>, b: Option<&Record>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => params_equal(a, b),
        _ => false,
    }
}

/// Loose equality of a parameter value against a possibly missing one.
pub fn loose_eq(a: &Value, b: Option<&Value>) -> bool {
    let Some(b) = b else {
        return a.is_null();
    };
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Record(a), Value::Record(b)) => params_equal(a, b),
        (Value::Records(a), Value::Records(b)) => a
            .iter()
            .enumerate()
            .all(|(i, record)| b.get(i).is_some_and(|other| params_equal(record, other))),
        (Value::List(a), Value::List(b)) => a
            .iter()
            .enumerate()
            .all(|(i, value)| loose_eq(value, b.get(i))),
        // Same sequence, one side holding records inline
        (Value::Records(a), Value::List(b)) => a.iter().enumerate().all(|(i, record)| {
            matches!(b.get(i), Some(Value::Record(other)) if params_equal(record, other))
        }),
        (Value::List(a), Value::Records(b)) => a.iter().enumerate().all(|(i, value)| match value {
            Value::Record(record) => b.get(i).is_some_and(|other| params_equal(record, other)),
            other => b.get(i).is_none() && other.is_null(),
        }),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (a, b) => match (as_number(a), as_number(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

/// Numeric reading of a scalar, as used for mixed-type comparisons.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Int(n) => Some(*n as f64),
        Value::Float(f) => Some(*f),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse().ok()
            }
        }
        _ => None,
    }
}
