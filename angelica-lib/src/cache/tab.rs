//! Per-tab list state persisted through a key-value store

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::KeyValueStore;
use super::get_json;
use super::set_json;
use crate::error::StoreError;
use crate::model::Value;

/// Prefix of every tab cache key; the tab's flag follows it.
pub const TAB_CACHE_PREFIX: &str = "writeable-";

/// Returns the store key for the tab identified by `flag`.
pub fn tab_cache_key(flag: &str) -> String {
    format!("{TAB_CACHE_PREFIX}{flag}")
}

/// Saves and restores the state of a list shown inside a tab.
///
/// Each tab is identified by a flag (usually passed along the route). The
/// state is stored as JSON under [`tab_cache_key`]. Every operation takes an
/// optional flag override and falls back to the current flag; with neither,
/// it does nothing.
///
/// # Example
///
/// ```
/// use angelica_lib::cache::{InMemoryStore, TabCache};
/// use angelica_lib::model::Record;
///
/// let store = InMemoryStore::new();
/// let mut tab = TabCache::new(&store, Some("1700000000".to_string()));
///
/// let query = Record::new().set("name", "abc");
///
/// // leaving a tab saves its state, coming back restores it
/// let other: Option<Record> = tab.switch_flag(Some("42".to_string()), &query).unwrap();
/// assert_eq!(other, None);
/// let back: Option<Record> = tab.switch_flag(Some("1700000000".to_string()), &Record::new()).unwrap();
/// assert_eq!(back, Some(query));
/// ```
pub struct TabCache<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
    flag: Option<String>,
}

impl<'a, S: KeyValueStore + ?Sized> TabCache<'a, S> {
    /// Creates a tab cache over `store` for the tab identified by `flag`.
    pub fn new(store: &'a S, flag: Option<String>) -> Self {
        Self { store, flag }
    }

    /// Returns the current flag.
    pub fn flag(&self) -> Option<&str> {
        self.flag.as_deref()
    }

    fn key(&self, flag: Option<&str>) -> Option<String> {
        flag.or(self.flag.as_deref())
            .filter(|flag| !flag.is_empty())
            .map(tab_cache_key)
    }

    /// Stores `data` for the tab.
    ///
    /// Returns `Ok(false)` without writing when there is no flag or `data`
    /// serializes to a falsy value (`null`, `false`, `0`, `""`).
    pub fn save<T>(&self, data: &T, flag: Option<&str>) -> Result<bool, StoreError>
    where
        T: Serialize + ?Sized,
    {
        let Some(key) = self.key(flag) else {
            return Ok(false);
        };
        let value = serde_json::to_value(data).map_err(|source| StoreError::Encode {
            key: key.clone(),
            source,
        })?;
        if Value::from(value).is_falsy() {
            debug!("[tab] skipping falsy state for '{}'", key);
            return Ok(false);
        }
        set_json(self.store, &key, data)?;
        Ok(true)
    }

    /// Reads the tab's saved state.
    ///
    /// A missing, undecodable or falsy entry yields `None`.
    pub fn restore<T>(&self, flag: Option<&str>) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let key = self.key(flag)?;
        let raw: serde_json::Value = get_json(self.store, &key)?;
        if Value::from(raw.clone()).is_falsy() {
            return None;
        }
        match serde_json::from_value(raw) {
            Ok(state) => Some(state),
            Err(e) => {
                debug!("[tab] entry '{}' does not fit the requested type: {}", key, e);
                None
            }
        }
    }

    /// Deletes the tab's saved state.
    pub fn remove(&self, flag: Option<&str>) {
        if let Some(key) = self.key(flag) {
            self.store.remove(&key);
        }
    }

    /// Moves to another tab: saves `current` under the old flag, then
    /// returns whatever the new flag has saved.
    pub fn switch_flag<T>(&mut self, flag: Option<String>, current: &T) -> Result<Option<T>, StoreError>
    where
        T: Serialize + DeserializeOwned,
    {
        if self.flag.is_some() {
            self.save(current, None)?;
        }
        self.flag = flag;
        Ok(self.restore(None))
    }

    /// Finishes with the tab. A view that may come back (`keep` set) saves
    /// `current`; one closed for good has its entry removed.
    pub fn release<T>(&self, keep: bool, current: &T) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        if keep {
            self.save(current, None)?;
        } else {
            self.remove(None);
        }
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> std::fmt::Debug for TabCache<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabCache")
            .field("flag", &self.flag)
            .finish_non_exhaustive()
    }
}
