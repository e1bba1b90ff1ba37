//! Column sorting folded into the list query

use serde::Deserialize;
use serde::Serialize;

use super::PageInfo;
use crate::model::Record;

/// Direction reported by a sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Returns the value sent to the server.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

/// The column a sort change came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortColumn {
    /// Field the column displays.
    pub prop: String,

    /// Query field to sort by instead of `{prop}Sort`.
    pub sort_field: Option<String>,

    /// Only columns sorted by the server change the query.
    ///
    /// Default: false
    pub server_side: bool,
}

impl SortColumn {
    /// Creates a server-sorted column for `prop`.
    pub fn new(prop: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            sort_field: None,
            server_side: true,
        }
    }

    /// Sorts by `field` rather than the derived `{prop}Sort`.
    pub fn with_sort_field(mut self, field: impl Into<String>) -> Self {
        self.sort_field = Some(field.into());
        self
    }

    /// Marks the column as sorted on the client, so sort changes are
    /// ignored here.
    pub fn client_side(mut self) -> Self {
        self.server_side = false;
        self
    }

    /// Returns the query field carrying this column's order.
    pub fn query_field(&self) -> String {
        match &self.sort_field {
            Some(field) if !field.is_empty() => field.clone(),
            _ => format!("{}Sort", self.prop),
        }
    }
}

/// Applies a sort change to the list query.
///
/// Sets the column's query field to the order, or removes it when the order
/// is cleared, and goes back to the first page as any new search does.
/// Columns not sorted on the server leave everything untouched; returns
/// whether the query changed and a refetch is due.
///
/// # Example
///
/// ```
/// use angelica_lib::list::{apply_sort, PageInfo, SortColumn, SortOrder};
/// use angelica_lib::model::Record;
///
/// let mut query = Record::new().set("name", "abc");
/// let mut page = PageInfo::new().with_page_num(4);
///
/// assert!(apply_sort(&mut query, &mut page, &SortColumn::new("createTime"), Some(SortOrder::Descending)));
/// assert_eq!(query.get_string("createTimeSort").unwrap(), Some("descending"));
/// assert_eq!(page.page_num, 1);
/// ```
pub fn apply_sort(
    query: &mut Record,
    page: &mut PageInfo,
    column: &SortColumn,
    order: Option<SortOrder>,
) -> bool {
    if !column.server_side {
        return false;
    }
    let field = column.query_field();
    match order {
        Some(order) => {
            query.insert(field, order.as_str());
        }
        None => {
            query.remove(&field);
        }
    }
    page.reset();
    true
}
