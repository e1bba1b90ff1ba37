//! Error types

mod field;
mod store;
mod tree;

pub use field::*;
pub use store::*;
pub use tree::*;
