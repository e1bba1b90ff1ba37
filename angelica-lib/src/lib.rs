//! Hierarchical record utilities
//!
//! Tree traversal, chained lookup and flat-to-tree construction over dynamic
//! field-keyed records, plus the memoizing cache and list-state helpers that
//! sit behind the angelica-ui list and dialog widgets.

pub mod cache;
pub mod dialog;
pub mod error;
pub mod format;
pub mod list;
pub mod model;
pub mod tree;
