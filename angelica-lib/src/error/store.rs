//! Key-value store error types

/// Errors that can occur when writing typed values to a key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The value could not be encoded as JSON.
    #[error("failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
