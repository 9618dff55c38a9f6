//! Response caching keyed by request identity.
//!
//! The client consults an optional, externally supplied [`CacheBackend`]
//! before any network I/O and stores decoded results after it. The client
//! itself has no eviction, sizing or expiry policy; pick a backend for that.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`RequestIdentity`] | Value key: result format + method + ordered params |
//! | [`CacheBackend`] | Trait for cache implementations |
//! | [`MemoryCache`] | Unbounded in-memory map |
//! | [`LruCache`] | Size-bounded LRU map |
//! | [`NullCache`] | Stores nothing |
//!
//! ```rust
//! use restful_ws_client::cache::{CacheBackend, CachedValue, MemoryCache, RequestIdentity, ResultFormat};
//! use restful_ws_client::request::Method;
//! use restful_ws_client::params;
//!
//! let cache = MemoryCache::new();
//! let key = RequestIdentity::new(Some(ResultFormat::Text), Method::Get, params! { "q" => "dog" });
//! cache.put(key.clone(), CachedValue::Text("<r/>".into()));
//! assert!(cache.get(&key).is_some());
//! ```

mod backend;
mod key;

pub use backend::{CacheBackend, CachedValue, LruCache, MemoryCache, NullCache};
pub use key::{RequestIdentity, ResultFormat};
