//! Extension trait for [`CacheBucket`] with string helpers.

use crate::CacheBucket;

/// String convenience methods for [`CacheBucket`].
///
/// Implemented for every bucket through a blanket impl, so [`CacheBucket`]
/// implementors only deal with raw bytes.
pub trait CacheBucketExt: CacheBucket {
    /// Retrieve a cached UTF-8 string.
    ///
    /// Returns `None` on cache miss or invalid UTF-8.
    fn get_string(&self, key: &str) -> Option<String> {
        let bytes = self.get(key)?;
        String::from_utf8(bytes).ok()
    }

    /// Store a string value in the cache.
    fn set_string(&self, key: &str, value: &str) {
        self.set(key, value.as_bytes());
    }
}

impl<B: CacheBucket + ?Sized> CacheBucketExt for B {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cache, MemoryCache};

    #[test]
    fn test_string_round_trip() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("docs");

        bucket.set_string("page", "<p>héllo</p>");
        assert_eq!(bucket.get_string("page").as_deref(), Some("<p>héllo</p>"));
    }

    #[test]
    fn test_invalid_utf8_is_a_miss() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("docs");

        bucket.set("page", &[0xFF, 0xFE]);
        assert_eq!(bucket.get_string("page"), None);
    }
}
