use std::{
    any::Any,
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

type Entry = Arc<dyn Any + Send + Sync>;

/// Process-lifetime cache of decoded assets shared by an animation and all of its clones.
///
/// Entries are keyed by package-relative path (or any caller-chosen key) and are never
/// evicted. Values are stored type-erased; `get` returns `None` when the stored type differs.
#[derive(Clone, Default)]
pub struct SharedAssetCache {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl SharedAssetCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Typed lookup.
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()?.downcast::<T>().ok()
    }

    /// Whether anything is stored under `key`.
    pub fn has(&self, key: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(key)
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn put<T: Any + Send + Sync>(&self, key: impl Into<String>, value: T) -> Arc<T> {
        let value = Arc::new(value);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.into(), value.clone());
        value
    }

    /// Typed lookup, building and storing the value on a miss.
    ///
    /// If an entry of a different type already exists it is replaced.
    pub fn get_or_insert_with<T, F>(&self, key: &str, make: F) -> Arc<T>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        if let Some(hit) = self.get::<T>(key) {
            return hit;
        }
        self.put(key, make())
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether two handles point at the same cache.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl fmt::Debug for SharedAssetCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedAssetCache")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/unit/assets.rs"]
mod tests;
