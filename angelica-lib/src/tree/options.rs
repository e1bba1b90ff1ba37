//! Flat-to-tree builder configuration

use crate::error::TreeError;

/// The field holding child records unless configured otherwise.
pub const DEFAULT_CHILDREN_KEY: &str = "children";

/// What the builder does when two records share a unique key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Every record holding the key stays in the forest. A child attaches to
    /// the last holder listed at or before it, or to the first holder when
    /// it precedes them all. A warning is logged.
    #[default]
    Overwrite,
    /// Fail with [`TreeError::DuplicateKey`].
    Reject,
}

/// Configuration for [`to_tree`](super::to_tree).
///
/// # Example
///
/// ```
/// use angelica_lib::tree::{DuplicatePolicy, ToTreeOptions};
///
/// let options = ToTreeOptions::new("id", "parentId")
///     .with_children_key("items")
///     .retain_children_key(true)
///     .on_duplicate(DuplicatePolicy::Reject);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToTreeOptions {
    /// Field identifying a record.
    pub unique_key: String,

    /// Field naming the parent's unique key. A falsy or missing value makes
    /// the record a root.
    pub parent_key: String,

    /// Field the children are stored under.
    ///
    /// Default: `"children"`
    pub children_key: String,

    /// Give every record a children list, empty for leaves.
    ///
    /// Default: `false`
    pub retain_children_key: bool,

    /// Handling of repeated unique keys.
    ///
    /// Default: [`DuplicatePolicy::Overwrite`]
    pub duplicates: DuplicatePolicy,

    /// Append records whose parent never appears to the roots instead of
    /// dropping them.
    ///
    /// Default: `false`
    pub promote_orphans: bool,
}

impl ToTreeOptions {
    /// Creates options linking `parent_key` values to `unique_key` values.
    pub fn new(unique_key: impl Into<String>, parent_key: impl Into<String>) -> Self {
        Self {
            unique_key: unique_key.into(),
            parent_key: parent_key.into(),
            children_key: DEFAULT_CHILDREN_KEY.to_string(),
            retain_children_key: false,
            duplicates: DuplicatePolicy::default(),
            promote_orphans: false,
        }
    }

    /// Sets the children field name.
    pub fn with_children_key(mut self, children_key: impl Into<String>) -> Self {
        self.children_key = children_key.into();
        self
    }

    /// Sets whether leaves get an empty children list.
    pub fn retain_children_key(mut self, retain: bool) -> Self {
        self.retain_children_key = retain;
        self
    }

    /// Sets the duplicate key policy.
    pub fn on_duplicate(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Sets whether orphaned records become roots.
    pub fn promote_orphans(mut self, promote: bool) -> Self {
        self.promote_orphans = promote;
        self
    }

    /// Checks that the three field names are non-empty and distinct.
    pub fn validate(&self) -> Result<(), TreeError> {
        let names = [
            ("unique key", &self.unique_key),
            ("parent key", &self.parent_key),
            ("children key", &self.children_key),
        ];
        for (label, name) in names {
            if name.is_empty() {
                return Err(TreeError::invalid_configuration(format!(
                    "{label} must not be empty"
                )));
            }
        }
        if self.unique_key == self.parent_key
            || self.unique_key == self.children_key
            || self.parent_key == self.children_key
        {
            return Err(TreeError::invalid_configuration(format!(
                "unique key '{}', parent key '{}' and children key '{}' must be distinct",
                self.unique_key, self.parent_key, self.children_key
            )));
        }
        Ok(())
    }
}
