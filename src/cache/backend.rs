//! Cache backend implementations.

use super::key::RequestIdentity;
use crate::xml::XmlDocument;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, RwLock};

/// A previously computed call result.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Text(String),
    Document(XmlDocument),
}

impl CachedValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CachedValue::Text(s) => Some(s),
            CachedValue::Document(_) => None,
        }
    }

    pub fn as_document(&self) -> Option<&XmlDocument> {
        match self {
            CachedValue::Document(d) => Some(d),
            CachedValue::Text(_) => None,
        }
    }
}

/// Mapping from request identity to result.
///
/// The client never evicts, sizes or expires entries itself; that policy
/// belongs entirely to the implementation. Implementations shared between
/// threads are responsible for their own synchronisation.
pub trait CacheBackend: Send + Sync {
    fn get(&self, key: &RequestIdentity) -> Option<CachedValue>;
    /// Insert, returning the previous value for `key`.
    fn put(&self, key: RequestIdentity, value: CachedValue) -> Option<CachedValue>;
    fn remove(&self, key: &RequestIdentity) -> Option<CachedValue>;
    fn clear(&self);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn name(&self) -> &'static str;
}

/// Unbounded hash-map cache.
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<RequestIdentity, CachedValue>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheBackend for MemoryCache {
    fn get(&self, key: &RequestIdentity) -> Option<CachedValue> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }
    fn put(&self, key: RequestIdentity, value: CachedValue) -> Option<CachedValue> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, value)
    }
    fn remove(&self, key: &RequestIdentity) -> Option<CachedValue> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key)
    }
    fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
    fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }
    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Size-bounded cache evicting the least recently used entry.
pub struct LruCache {
    entries: Mutex<lru::LruCache<RequestIdentity, CachedValue>>,
}

impl LruCache {
    /// A capacity of zero is treated as one.
    pub fn new(max_entries: usize) -> Self {
        let cap = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(lru::LruCache::new(cap)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .cap()
            .get()
    }
}

impl CacheBackend for LruCache {
    fn get(&self, key: &RequestIdentity) -> Option<CachedValue> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }
    fn put(&self, key: RequestIdentity, value: CachedValue) -> Option<CachedValue> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.put(key, value)
    }
    fn remove(&self, key: &RequestIdentity) -> Option<CachedValue> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.pop(key)
    }
    fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
    fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
    fn name(&self) -> &'static str {
        "lru"
    }
}

/// Cache that stores nothing.
pub struct NullCache;
impl NullCache {
    pub fn new() -> Self {
        Self
    }
}
impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheBackend for NullCache {
    fn get(&self, _: &RequestIdentity) -> Option<CachedValue> {
        None
    }
    fn put(&self, _: RequestIdentity, _: CachedValue) -> Option<CachedValue> {
        None
    }
    fn remove(&self, _: &RequestIdentity) -> Option<CachedValue> {
        None
    }
    fn clear(&self) {}
    fn len(&self) -> usize {
        0
    }
    fn name(&self) -> &'static str {
        "null"
    }
}
