//! Key-value store contract and typed JSON helpers

use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// A string key-value store.
///
/// Implementations decide where the data lives (process memory, browser
/// storage behind a bridge, a file). Operations are infallible from the
/// caller's point of view: a failed read is a missing key.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored payload for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous payload.
    fn set(&self, key: &str, value: String);

    /// Removes `key`. Removing a missing key is a no-op.
    fn remove(&self, key: &str);
}

/// Reads and decodes a JSON payload.
///
/// A missing key and an undecodable payload both yield `None`; the latter is
/// logged so corrupt entries do not go unnoticed.
pub fn get_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("[store] failed to decode entry '{}': {}", key, e);
            None
        }
    }
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn set_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, raw);
    Ok(())
}
