//! Tree construction error types

/// Errors raised while building a forest from flat records.
///
/// Lookups never fail: a missing node is reported through `Option` or an
/// empty chain, not through this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The builder options name an empty or conflicting field.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Two records share the same unique key and duplicates are rejected.
    #[error("duplicate unique key '{key}' at records {first} and {second}")]
    DuplicateKey {
        key: String,
        /// Input position of the record that claimed the key first.
        first: usize,
        /// Input position of the conflicting record.
        second: usize,
    },

    /// Following parent keys from a record leads back to itself.
    #[error("parent chain through key '{key}' forms a cycle")]
    CyclicStructure { key: String },
}

impl TreeError {
    /// Creates an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Creates a cyclic structure error for the given key.
    pub fn cyclic(key: impl Into<String>) -> Self {
        Self::CyclicStructure { key: key.into() }
    }
}
