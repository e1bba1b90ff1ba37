//! Dynamic record model

mod predicate;
mod record;
mod record_serde;
mod value;

pub use predicate::*;
pub use record::*;
pub use value::*;
