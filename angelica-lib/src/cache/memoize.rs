//! Keyed memoization of a function

use std::fmt;
use std::hash::Hash;

use dashmap::DashMap;
use log::trace;

type Compute<K, A, R> = Box<dyn Fn(&K, A) -> Option<R> + Send + Sync>;

/// Wraps a function and caches its results by an explicit key.
///
/// The key only discriminates cache entries; the remaining arguments are
/// passed through on a miss and ignored on a hit. A result of `None` means
/// "no value" and is never cached, so the next call with that key computes
/// again. Entries are never evicted.
///
/// The cache is a concurrent map, so a `Memoize` can be shared between
/// threads. Two threads missing on the same key at once may both compute;
/// the last write wins.
///
/// # Example
///
/// ```
/// use angelica_lib::cache::Memoize;
///
/// let scaled = Memoize::new(|key: &u32, factor: u32| Some(key * factor));
///
/// assert_eq!(scaled.call(3, 10), Some(30));
/// // cached: the new factor is not used
/// assert_eq!(scaled.call(3, 99), Some(30));
/// ```
pub struct Memoize<K, A, R> {
    compute: Compute<K, A, R>,
    cache: DashMap<K, R>,
}

impl<K, A, R> Memoize<K, A, R>
where
    K: Eq + Hash,
    R: Clone,
{
    /// Wraps `compute`, which receives the key followed by the arguments.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn(&K, A) -> Option<R> + Send + Sync + 'static,
    {
        Self {
            compute: Box::new(compute),
            cache: DashMap::new(),
        }
    }

    /// Wraps `compute`, which receives only the arguments. The key serves
    /// purely as the cache discriminator.
    pub fn dropping_key<F>(compute: F) -> Self
    where
        F: Fn(A) -> Option<R> + Send + Sync + 'static,
    {
        Self::new(move |_: &K, args| compute(args))
    }

    /// Returns the cached result for `key`, computing it from `args` on a
    /// miss.
    pub fn call(&self, key: K, args: A) -> Option<R> {
        // Copy the hit out before computing; the map guard must not be held
        // while `compute` runs, since it may call back into this cache.
        let cached = self.cache.get(&key).map(|entry| entry.value().clone());
        if cached.is_some() {
            trace!("[memoize] hit");
            return cached;
        }

        let result = (self.compute)(&key, args);
        match &result {
            Some(value) => {
                self.cache.insert(key, value.clone());
                trace!("[memoize] miss, {} entries cached", self.cache.len());
            }
            None => trace!("[memoize] miss without value, not cached"),
        }
        result
    }

    /// Returns the cached result for `key` without computing.
    pub fn peek(&self, key: &K) -> Option<R> {
        self.cache.get(key).map(|entry| entry.value().clone())
    }

    /// Returns `true` if a result is cached for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.cache.contains_key(key)
    }

    /// Returns the number of cached results.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if nothing is cached yet.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl<K, A, R> fmt::Debug for Memoize<K, A, R>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoize")
            .field("entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}
