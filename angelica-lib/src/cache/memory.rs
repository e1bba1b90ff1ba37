//! In-memory key-value store using DashMap

use dashmap::DashMap;

use super::KeyValueStore;

/// A process-local key-value store backed by a concurrent hash map.
///
/// A store may carry a namespace, which prefixes every key as
/// `namespace:key`. Namespaced stores see only their own entries through
/// [`keys`](Self::keys) and [`len`](Self::len), so several list views can
/// persist state without colliding.
///
/// # Example
///
/// ```
/// use angelica_lib::cache::{InMemoryStore, KeyValueStore};
///
/// let store = InMemoryStore::with_namespace("orders");
/// store.set("page", "2".to_string());
/// assert_eq!(store.get("page").as_deref(), Some("2"));
/// assert_eq!(store.keys(), ["page"]);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    namespace: Option<String>,
    entries: DashMap<String, String>,
}

impl InMemoryStore {
    /// Creates an empty store without a namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose keys live under `namespace`.
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            entries: DashMap::new(),
        }
    }

    /// Returns the namespace, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn full_key(&self, key: &str) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}:{key}"),
            None => key.to_string(),
        }
    }

    /// Strips the namespace from a stored key, or `None` if the key belongs
    /// elsewhere.
    fn local_key<'a>(&self, stored: &'a str) -> Option<&'a str> {
        match &self.namespace {
            Some(namespace) => stored.strip_prefix(namespace.as_str())?.strip_prefix(':'),
            None => Some(stored),
        }
    }

    /// Returns the keys in this namespace, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter_map(|entry| self.local_key(entry.key()).map(str::to_string))
            .collect();
        keys.sort();
        keys
    }

    /// Returns the number of entries in this namespace.
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    /// Returns `true` if this namespace holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry whose key starts with `prefix`, returning how
    /// many were removed.
    pub fn remove_prefix(&self, prefix: &str) -> usize {
        self.keys()
            .into_iter()
            .filter(|key| key.starts_with(prefix))
            .filter(|key| self.entries.remove(&self.full_key(key)).is_some())
            .count()
    }

    /// Removes every entry in this namespace.
    pub fn clear(&self) {
        self.remove_prefix("");
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .get(&self.full_key(key))
            .map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: String) {
        self.entries.insert(self.full_key(key), value);
    }

    fn remove(&self, key: &str) {
        self.entries.remove(&self.full_key(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());

        store.set("a", "1".to_string());
        store.set("a", "2".to_string());
        assert_eq!(store.get("a").as_deref(), Some("2"));
        assert_eq!(store.len(), 1);

        store.remove("a");
        store.remove("missing");
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn test_namespace_prefixes_keys() {
        let store = InMemoryStore::with_namespace("tab");
        store.set("writeable-1", "{}".to_string());

        assert_eq!(store.namespace(), Some("tab"));
        assert_eq!(store.get("writeable-1").as_deref(), Some("{}"));
        assert_eq!(store.keys(), ["writeable-1"]);
        assert!(store.entries.contains_key("tab:writeable-1"));
    }

    #[test]
    fn test_namespace_hides_foreign_entries() {
        let store = InMemoryStore::with_namespace("tab");
        store.entries.insert("other:x".to_string(), "1".to_string());
        store.entries.insert("tabs:x".to_string(), "1".to_string());
        store.set("y", "2".to_string());

        assert_eq!(store.keys(), ["y"]);
        assert_eq!(store.len(), 1);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.entries.len(), 2);
    }

    #[test]
    fn test_remove_prefix() {
        let store = InMemoryStore::new();
        store.set("writeable-1", "a".to_string());
        store.set("writeable-2", "b".to_string());
        store.set("query", "c".to_string());

        assert_eq!(store.remove_prefix("writeable-"), 2);
        assert_eq!(store.keys(), ["query"]);
        assert_eq!(store.remove_prefix("writeable-"), 0);
    }
}
