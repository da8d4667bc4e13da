//! Cache abstraction layer for cartdocs.
//!
//! Rendered documentation is cached by content hash, so entries never go
//! stale: a changed document simply produces a different key. This crate
//! provides the storage side of that contract:
//!
//! - [`Cache`]: Factory for named cache buckets
//! - [`CacheBucket`]: Plain key-value store
//!
//! # Implementations
//!
//! - [`NullCache`] / [`NullCacheBucket`]: No-op implementations (always miss)
//! - [`MemoryCache`]: In-process store that keeps entries for its whole lifetime
//! - [`FileCache`]: File-based store with version validation, shareable
//!   between processes
//!
//! # Example
//!
//! ```
//! use cartdocs_cache::{Cache, MemoryCache};
//!
//! let cache = MemoryCache::new();
//! let bucket = cache.bucket("docs");
//! bucket.set("3f2a", b"<h1>Install</h1>");
//! assert_eq!(bucket.get("3f2a"), Some(b"<h1>Install</h1>".to_vec()));
//! ```

mod ext;
mod file;
mod memory;

pub use ext::CacheBucketExt;
pub use file::FileCache;
pub use memory::MemoryCache;

/// A named partition within a [`Cache`].
///
/// Failures inside a bucket are never surfaced to the caller: a broken cache
/// behaves like an empty one.
pub trait CacheBucket: Send + Sync {
    /// Retrieve a cached value, or `None` on miss.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store a value, replacing any existing entry for `key`.
    fn set(&self, key: &str, value: &[u8]);
}

/// Factory for named cache [`CacheBucket`]s.
///
/// Buckets with different names never see each other's entries. Calling
/// `bucket` twice with the same name returns handles over the same storage.
pub trait Cache: Send + Sync {
    /// Open or create a named bucket.
    ///
    /// # Arguments
    ///
    /// * `name` - Bucket name (e.g., "docs")
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket>;
}

/// No-op [`CacheBucket`] that never stores or retrieves data.
pub struct NullCacheBucket;

impl CacheBucket for NullCacheBucket {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _value: &[u8]) {}
}

/// No-op [`Cache`] that always returns [`NullCacheBucket`]s.
///
/// Use when caching is disabled.
pub struct NullCache;

impl Cache for NullCache {
    fn bucket(&self, _name: &str) -> Box<dyn CacheBucket> {
        Box::new(NullCacheBucket)
    }
}
