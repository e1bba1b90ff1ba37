//! Pagination state for list views

use serde::Deserialize;
use serde::Serialize;

use crate::model::Record;

/// The requested page of a list.
///
/// Serializes with the `pageNum`/`pageSize` names list endpoints expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// 1-based page number.
    ///
    /// Default: 1
    pub page_num: u32,

    /// Rows per page.
    ///
    /// Default: 20
    pub page_size: u32,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            page_num: 1,
            page_size: 20,
        }
    }
}

impl PageInfo {
    /// Creates page info for the first page with the default size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page number.
    pub fn with_page_num(mut self, page_num: u32) -> Self {
        self.page_num = page_num.max(1);
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Returns to the first page, as a new search does.
    pub fn reset(&mut self) {
        self.page_num = 1;
    }

    /// Adjusts the page after rows were deleted from the current page.
    ///
    /// `rows_on_page` is the row count before the deletion. Removing the
    /// last row of any page but the first steps back one page, so the next
    /// fetch does not land past the end. Returns `true` if the page changed.
    pub fn after_delete(&mut self, rows_on_page: usize) -> bool {
        if rows_on_page <= 1 && self.page_num > 1 {
            self.page_num -= 1;
            true
        } else {
            false
        }
    }

    /// Merges `query` with the page fields into one request parameter set.
    ///
    /// Page fields win over query fields of the same name.
    pub fn parameters(&self, query: &Record) -> Record {
        query
            .clone()
            .set("pageNum", self.page_num)
            .set("pageSize", self.page_size)
    }
}

/// One page of list results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    records: Vec<Record>,
    info: PageInfo,
    /// Total matching rows across all pages.
    total_count: usize,
}

impl Page {
    /// Creates a page holding `records`.
    pub fn new(records: Vec<Record>, info: PageInfo) -> Self {
        let total_count = records.len();
        Self {
            records,
            info,
            total_count,
        }
    }

    /// Sets the total row count reported by the server.
    pub fn with_total_count(mut self, count: usize) -> Self {
        self.total_count = count;
        self
    }

    /// Returns the rows on this page.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the page and returns the rows.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Returns the page this result belongs to.
    pub fn info(&self) -> PageInfo {
        self.info
    }

    /// Returns the total row count across all pages.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns the number of pages, at least 1.
    pub fn page_count(&self) -> usize {
        self.total_count
            .div_ceil(self.info.page_size.max(1) as usize)
            .max(1)
    }

    /// Returns `true` if a later page exists.
    pub fn has_next(&self) -> bool {
        (self.info.page_num as usize) < self.page_count()
    }
}
