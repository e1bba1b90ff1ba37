//! Selection merging across list pages

use std::collections::HashSet;

use crate::model::Record;
use crate::model::Value;

/// Returns the records of `incoming` whose `unique_key` value does not occur
/// in `existing`, in `incoming` order.
///
/// Values are compared strictly. Records lacking the key are matched
/// against other records lacking it, the same way two absent fields compare
/// equal.
pub fn unique_by(existing: &[Record], incoming: &[Record], unique_key: &str) -> Vec<Record> {
    incoming
        .iter()
        .filter(|item| {
            let value = item.get(unique_key);
            !existing.iter().any(|v| v.get(unique_key) == value)
        })
        .cloned()
        .collect()
}

/// Appends the rows selected on the current page to `checked`, skipping rows
/// already checked on an earlier page.
///
/// Returns how many rows were added.
pub fn merge_selection(checked: &mut Vec<Record>, page_selection: &[Record], unique_key: &str) -> usize {
    let added = unique_by(checked, page_selection, unique_key);
    let count = added.len();
    checked.extend(added);
    count
}

/// Returns the indices of `rows` whose `unique_key` value is among the
/// `checked` records, so a freshly loaded page can restore its checkboxes.
pub fn checked_rows(rows: &[Record], checked: &[Record], unique_key: &str) -> Vec<usize> {
    let keys: HashSet<String> = checked
        .iter()
        .filter_map(|record| record.get(unique_key).and_then(Value::as_key))
        .collect();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            row.get(unique_key)
                .and_then(Value::as_key)
                .is_some_and(|key| keys.contains(&key))
        })
        .map(|(index, _)| index)
        .collect()
}
