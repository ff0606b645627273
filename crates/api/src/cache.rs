//! Session-lifetime memoization of warehouse results.

use std::{
    collections::HashMap,
    fmt,
    hash::Hash,
    sync::{Arc, Mutex},
};

use tracing::debug;

/// Key to result mapping that lives as long as the session.
///
/// Entries are never evicted individually; [`ResultCache::clear`] drops all
/// of them when the session is reset. Failed fetches are not stored. The lock
/// is never held across an await, so two concurrent misses for the same key
/// may both reach the warehouse.
pub struct ResultCache<K, V> {
    name: &'static str,
    entries: Mutex<HashMap<K, Arc<V>>>,
}

impl<K, V> fmt::Debug for ResultCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultCache").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<K, V> ResultCache<K, V>
where
    K: Eq + Hash + fmt::Debug,
{
    /// Create an empty cache. `name` only shows up in logs.
    pub fn new(name: &'static str) -> Self {
        Self { name, entries: Mutex::new(HashMap::new()) }
    }

    /// Cached result for `key`, if any.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries.lock().expect("lock poisoned").get(key).cloned()
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn insert(&self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.entries.lock().expect("lock poisoned").insert(key, Arc::clone(&value));
        value
    }

    /// Return the cached result for `key`, or run `fetch` once and cache
    /// its result.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: K, fetch: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(&key) {
            debug!(cache = self.name, key = ?key, "Cache hit");
            return Ok(hit);
        }
        debug!(cache = self.name, key = ?key, "Cache miss");
        let value = fetch().await?;
        Ok(self.insert(key, value))
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut entries = self.entries.lock().expect("lock poisoned");
        debug!(cache = self.name, entries = entries.len(), "Cache cleared");
        entries.clear();
    }

    /// Number of cached keys.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("lock poisoned").len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
