//! Hierarchical record utilities
//!
//! A forest is a `[Record]` whose nodes keep their children as
//! [`Value::Records`](crate::model::Value::Records) under a caller-chosen
//! field, [`DEFAULT_CHILDREN_KEY`] unless stated otherwise. Records own their
//! children, so a forest can never contain a cycle; parent links in flat
//! input can, and [`to_tree`] rejects them.

mod build;
mod find;
mod options;
mod walk;

pub use build::*;
pub use find::*;
pub use options::*;
pub use walk::*;
