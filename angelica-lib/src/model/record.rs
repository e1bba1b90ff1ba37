//! Dynamic field-keyed record

use std::collections::HashMap;

use super::Value;
use crate::error::FieldError;

/// A node of hierarchical data: an opaque mapping from field name to value.
///
/// Only the children field (named by the caller, usually `"children"`) has
/// structural meaning; everything else belongs to the application.
///
/// # Example
///
/// ```
/// use angelica_lib::model::Record;
///
/// let leaf = Record::new().set("id", 2);
/// let root = Record::new()
///     .set("id", 1)
///     .set("children", vec![leaf]);
///
/// assert_eq!(root.get_int("id").unwrap(), Some(1));
/// assert_eq!(root.children("children").map(|c| c.len()), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    pub(crate) fn from_json_map(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            fields: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
        }
    }

    pub(crate) fn from_json_object(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Self::from_json_map(map),
            _ => Self::new(),
        }
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a mutable reference to the field value, if it exists.
    ///
    /// Values written through it are stored as given; see
    /// [`Value::normalized`].
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.fields.get_mut(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns a mutable reference to all fields.
    pub fn fields_mut(&mut self) -> &mut HashMap<String, Value> {
        &mut self.fields
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    ///
    /// Sequences are stored in canonical form, so a list of records becomes
    /// `Records`.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Inserts a field value, returning the previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into().normalized())
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Hierarchy
    // =========================================================================

    /// Returns the child records stored under `children_key`.
    ///
    /// An empty list counts as no children; any other value, or a missing
    /// field, yields `None`.
    pub fn children(&self, children_key: &str) -> Option<&[Record]> {
        match self.fields.get(children_key) {
            Some(Value::Records(children)) => Some(children),
            Some(Value::List(items)) if items.is_empty() => Some(&[]),
            _ => None,
        }
    }

    /// Returns the child records stored under `children_key` for mutation.
    ///
    /// A list left in raw form by [`get_mut`](Self::get_mut) is normalized
    /// first, so a list of records is usable as children.
    pub fn children_mut(&mut self, children_key: &str) -> Option<&mut Vec<Record>> {
        let slot = self.fields.get_mut(children_key)?;
        if matches!(slot, Value::List(_)) {
            *slot = std::mem::take(slot).normalized();
        }
        match slot {
            Value::Records(children) => Some(children),
            _ => None,
        }
    }

    /// Returns `true` if the record has at least one child under `children_key`.
    pub fn has_children(&self, children_key: &str) -> bool {
        self.children(children_key).is_some_and(|c| !c.is_empty())
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Gets a float field value. Integers widen.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(*n as f64)),
            Some(other) => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets a nested record field value.
    pub fn get_record(&self, field: &str) -> Result<Option<&Record>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Record(r)) => Ok(Some(r.as_ref())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "record",
                other.type_name(),
            )),
        }
    }

    /// Gets a collection of records.
    pub fn get_records(&self, field: &str) -> Result<Option<&[Record]>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Records(r)) => Ok(Some(r)),
            Some(Value::List(items)) if items.is_empty() => Ok(Some(&[])),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "records",
                other.type_name(),
            )),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into().normalized()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let record = Record::new()
            .set("name", "root")
            .set("id", 7)
            .set("weight", 1.5)
            .set("parent", Value::Null);

        assert_eq!(record.get_string("name").unwrap(), Some("root"));
        assert_eq!(record.get_int("id").unwrap(), Some(7));
        assert_eq!(record.get_float("id").unwrap(), Some(7.0));
        assert_eq!(record.get_int("parent").unwrap(), None);
        assert_eq!(
            record.get_int("missing"),
            Err(FieldError::missing("missing"))
        );
        assert_eq!(
            record.get_bool("name"),
            Err(FieldError::type_mismatch("name", "bool", "string"))
        );
    }

    #[test]
    fn test_children_accessors() {
        let mut record = Record::new()
            .set("id", 1)
            .set("children", Value::List(Vec::new()));
        assert_eq!(record.children("children"), Some(&[][..]));
        assert!(!record.has_children("children"));

        record
            .children_mut("children")
            .unwrap()
            .push(Record::new().set("id", 2));
        assert!(record.has_children("children"));
        assert_eq!(record.get("children").map(Value::type_name), Some("records"));

        let leaf = Record::new().set("id", 3).set("children", "nope");
        assert_eq!(leaf.children("children"), None);
        assert_eq!(leaf.children("items"), None);
    }

    #[test]
    fn test_record_list_counts_as_children() {
        let child = Record::new().set("id", 2);
        let mut record = Record::new()
            .set("id", 1)
            .set("children", vec![Value::from(child.clone())]);
        assert_eq!(record.children("children"), Some(&[child.clone()][..]));

        // written raw, then picked up by the mutable accessor
        *record.get_mut("children").unwrap() = Value::List(vec![Value::from(child)]);
        assert_eq!(record.children_mut("children").map(|c| c.len()), Some(1));
        assert_eq!(record.get("children").map(Value::type_name), Some("records"));

        let mixed = Record::new().set("children", vec![Value::from(1)]);
        assert_eq!(mixed.children("children"), None);
    }

    #[test]
    fn test_from_iterator() {
        let record: Record = [("id", Value::from(1)), ("name", Value::from("a"))]
            .into_iter()
            .collect();
        assert_eq!(record.len(), 2);
        assert!(record.contains("name"));
    }
}
