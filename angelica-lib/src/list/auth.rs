//! Permission entries attached to a list view

use std::collections::HashMap;

use crate::model::Record;
use crate::model::Value;

/// `menuType` of entries that grant a button-level action.
pub const ACTION_MENU_TYPE: &str = "F";

/// Returns the action entries (`menuType == "F"`) among `auth`, in order.
pub fn final_auth(auth: &[Record]) -> Vec<&Record> {
    auth.iter()
        .filter(|entry| entry.get("menuType").and_then(Value::as_str) == Some(ACTION_MENU_TYPE))
        .collect()
}

/// Indexes the action entries by their `path`.
///
/// A later entry with the same path replaces an earlier one. Entries
/// without a usable path are left out.
///
/// ```
/// use angelica_lib::list::auth_by_path;
/// use angelica_lib::model::Record;
///
/// let auth = vec![
///     Record::new().set("menuType", "F").set("path", "order:export"),
///     Record::new().set("menuType", "C").set("path", "order"),
/// ];
/// let actions = auth_by_path(&auth);
/// assert!(actions.contains_key("order:export"));
/// assert!(!actions.contains_key("order"));
/// ```
pub fn auth_by_path(auth: &[Record]) -> HashMap<String, &Record> {
    final_auth(auth)
        .into_iter()
        .filter_map(|entry| {
            let path = entry.get("path").and_then(Value::as_key)?;
            Some((path, entry))
        })
        .collect()
}

/// Resolves which tab of a tabbed list is active.
///
/// Returns the `alias` (or failing that the `path`) of the first entry whose
/// `alias` or `path` equals `value`. When none matches, falls back to the
/// first entry's alias or path. With no entries, `value` itself is returned,
/// or an empty string. A missing `value` matches an entry lacking either
/// field.
pub fn active_value(value: Option<&str>, auth: &[Record]) -> String {
    let Some(first) = auth.first() else {
        return value.unwrap_or_default().to_string();
    };
    auth.iter()
        .find(|entry| field_is(entry, "alias", value) || field_is(entry, "path", value))
        .and_then(tab_name)
        .or_else(|| tab_name(first))
        .unwrap_or_default()
}

/// Strict comparison of a field against an optional string; a missing field
/// equals a missing value.
fn field_is(entry: &Record, field: &str, value: Option<&str>) -> bool {
    match (entry.get(field), value) {
        (None, None) => true,
        (Some(Value::String(s)), Some(value)) => s == value,
        _ => false,
    }
}

fn tab_name(entry: &Record) -> Option<String> {
    ["alias", "path"].into_iter().find_map(|field| {
        entry
            .get(field)
            .filter(|value| !value.is_falsy())
            .and_then(Value::as_key)
    })
}
