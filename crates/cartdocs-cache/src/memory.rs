//! In-process cache that keeps every entry for its own lifetime.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::{Cache, CacheBucket};

type Entries = Arc<RwLock<HashMap<String, Vec<u8>>>>;

/// Process-local [`Cache`] without expiry or eviction.
///
/// Create one at startup and hand it to whatever needs caching; dropping the
/// value drops all entries. Concurrent writers to the same key are
/// last-writer-wins.
#[derive(Default)]
pub struct MemoryCache {
    buckets: RwLock<HashMap<String, Entries>>,
}

impl MemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self, name: &str) -> Entries {
        if let Some(entries) = self
            .buckets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Arc::clone(entries);
        }

        let mut buckets = self
            .buckets
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(buckets.entry(name.to_owned()).or_default())
    }
}

impl Cache for MemoryCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(MemoryCacheBucket {
            entries: self.entries(name),
        })
    }
}

/// Handle onto one bucket of a [`MemoryCache`].
struct MemoryCacheBucket {
    entries: Entries,
}

impl CacheBucket for MemoryCacheBucket {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &[u8]) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("docs");

        assert_eq!(bucket.get("key"), None);
        bucket.set("key", b"value");
        assert_eq!(bucket.get("key"), Some(b"value".to_vec()));
    }

    #[test]
    fn test_overwrite_is_last_writer_wins() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("docs");

        bucket.set("key", b"first");
        bucket.set("key", b"second");
        assert_eq!(bucket.get("key"), Some(b"second".to_vec()));
    }

    #[test]
    fn test_handles_share_storage() {
        let cache = MemoryCache::new();
        let writer = cache.bucket("docs");
        let reader = cache.bucket("docs");

        writer.set("key", b"shared");
        assert_eq!(reader.get("key"), Some(b"shared".to_vec()));
    }

    #[test]
    fn test_buckets_are_isolated() {
        let cache = MemoryCache::new();
        let docs = cache.bucket("docs");
        let other = cache.bucket("other");

        docs.set("key", b"docs-data");
        assert_eq!(other.get("key"), None);
    }

    #[test]
    fn test_concurrent_writers() {
        let cache = Arc::new(MemoryCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    cache.bucket("docs").set(&format!("key-{i}"), b"same");
                    cache.bucket("docs").set("shared", b"same");
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let bucket = cache.bucket("docs");
        assert_eq!(bucket.get("shared"), Some(b"same".to_vec()));
        for i in 0..8 {
            assert!(bucket.get(&format!("key-{i}")).is_some());
        }
    }
}
