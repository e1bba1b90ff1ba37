//! List view state helpers
//!
//! Pure functions behind paginated, selectable lists: comparing query
//! parameters, merging selections across pages, keeping page numbers valid,
//! folding column sorts into the query and reading the view's permission
//! entries. Rendering and routing stay with the caller.

mod auth;
mod page;
mod params;
mod selection;
mod sort;

pub use auth::*;
pub use page::*;
pub use params::*;
pub use selection::*;
pub use sort::*;
