//! Caching layer
//!
//! [`Memoize`] caches the results of a function by an explicit key for the
//! lifetime of the wrapper. [`KeyValueStore`] is the get/set/remove contract
//! for string payloads that list widgets persist through, with
//! [`InMemoryStore`] as the process-local implementation. [`TabCache`]
//! persists a tabbed list's state on top of any store.

mod memoize;
mod memory;
mod store;
mod tab;

pub use memoize::*;
pub use memory::*;
pub use store::*;
pub use tab::*;
