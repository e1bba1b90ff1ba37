//! Field-equality predicates for locating records

use super::Record;
use super::Value;

/// How the field conditions of a [`Predicate`] are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Every condition must hold. An empty predicate matches every record.
    #[default]
    All,
    /// At least one condition must hold. An empty predicate matches nothing.
    Any,
}

/// A partial record tested field-by-field against candidate records.
///
/// Values are compared with `Value` equality: exact for scalars, recursive
/// for nested records. A field the candidate lacks never matches, not even
/// a `Null` condition.
///
/// # Example
///
/// ```
/// use angelica_lib::model::{Predicate, Record};
///
/// let node = Record::new().set("id", 2).set("kind", "leaf");
///
/// assert!(Predicate::eq("id", 2).matches(&node));
/// assert!(!Predicate::eq("id", 2).and_eq("kind", "root").matches(&node));
/// assert!(Predicate::any().and_eq("id", 9).and_eq("kind", "leaf").matches(&node));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    conditions: Vec<(String, Value)>,
    mode: MatchMode,
}

impl Predicate {
    /// Creates an empty predicate requiring all conditions.
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates an empty predicate requiring any condition.
    pub fn any() -> Self {
        Self {
            conditions: Vec::new(),
            mode: MatchMode::Any,
        }
    }

    /// Creates a single-field equality predicate.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and_eq(field, value)
    }

    /// Creates an all-fields predicate from every field of `record`.
    pub fn from_record(record: &Record) -> Self {
        Self {
            conditions: record
                .fields()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            mode: MatchMode::All,
        }
    }

    /// Adds an equality condition (builder pattern).
    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    /// Sets how conditions are combined.
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the combination mode.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Returns the field conditions in insertion order.
    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    /// Tests `record` against this predicate.
    pub fn matches(&self, record: &Record) -> bool {
        let holds = |(field, expected): &(String, Value)| record.get(field) == Some(expected);
        match self.mode {
            MatchMode::All => self.conditions.iter().all(holds),
            MatchMode::Any => self.conditions.iter().any(holds),
        }
    }
}
