//! SharedCache: thread-safe wrapper over the LRU engine
//!
//! The engine itself is single-owner with no internal locking. When the
//! cache is shared across threads, every public operation goes through
//! one mutex; the indirection-heavy splice logic does not lend itself to
//! lock-free updates.

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::lru::FastLru;
use crate::stats::CacheStats;

/// Mutex-wrapped LRU cache with hit/miss statistics
///
/// Values are cloned out on lookup so the lock is never held across a
/// caller's use of the value. Put `SharedCache` behind an `Arc` to share
/// it between threads.
pub struct SharedCache<V> {
    inner: Mutex<FastLru<V>>,
    stats: CacheStats,
}

impl<V: Clone> SharedCache<V> {
    /// Create a shared cache with the given capacity, clamped the same
    /// way as [`FastLru::new`]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(FastLru::new(capacity)),
            stats: CacheStats::new(),
        }
    }

    /// Look up a key, promoting it and returning a clone of its value
    pub fn get(&self, key: &str) -> Result<V> {
        let mut cache = self.inner.lock();
        match cache.get(key) {
            Ok(value) => {
                let value = value.clone();
                self.stats.record_hit();
                Ok(value)
            }
            Err(err @ (Error::Empty | Error::NotFound)) => {
                self.stats.record_miss();
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Insert or update a key, evicting the least-recently-used entry
    /// when a new key lands in a full cache
    pub fn put(&self, key: &str, value: V) -> Result<()> {
        let mut cache = self.inner.lock();
        if !cache.contains(key) && cache.len() == cache.capacity() {
            self.stats.record_eviction();
        }
        cache.put(key, value)?;
        self.stats.record_insert();
        Ok(())
    }

    /// Clone out all live values, most-recently-used first
    pub fn values(&self) -> Vec<V> {
        self.inner.lock().values().into_iter().cloned().collect()
    }

    /// Drop every entry and reset statistics
    pub fn clear(&self) {
        self.inner.lock().clear();
        self.stats.reset();
    }

    /// Whether the key is currently cached; does not promote
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Effective (clamped) capacity
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_shared_basic() {
        let cache = SharedCache::new(10);

        cache.put("a", vec![1u8, 2, 3]).unwrap();
        assert_eq!(cache.get("a"), Ok(vec![1, 2, 3]));
        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.stats().misses(), 0);
    }

    #[test]
    fn test_shared_miss_stats() {
        let cache = SharedCache::<u32>::new(10);

        assert_eq!(cache.get("a"), Err(Error::Empty));
        cache.put("a", 1).unwrap();
        assert_eq!(cache.get("b"), Err(Error::NotFound));

        assert_eq!(cache.stats().misses(), 2);
        assert_eq!(cache.stats().hits(), 0);
    }

    #[test]
    fn test_shared_eviction_stats() {
        let cache = SharedCache::new(10);

        for i in 0..10 {
            cache.put(&format!("k{i}"), i).unwrap();
        }
        assert_eq!(cache.stats().evictions(), 0);

        // Updating a present key in a full cache is not an eviction.
        cache.put("k5", 50).unwrap();
        assert_eq!(cache.stats().evictions(), 0);

        cache.put("k10", 10).unwrap();
        assert_eq!(cache.stats().evictions(), 1);
        assert_eq!(cache.len(), 10);
    }

    #[test]
    fn test_shared_clear() {
        let cache = SharedCache::new(10);

        cache.put("a", 1).unwrap();
        cache.get("a").unwrap();
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits(), 0);
        assert_eq!(cache.get("a"), Err(Error::Empty));
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(SharedCache::new(100));

        let mut handles = Vec::new();
        for t in 0..4 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    let key = format!("t{t}k{i}");
                    cache.put(&key, i).unwrap();
                    let _ = cache.get(&key);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), cache.capacity());
        assert_eq!(cache.stats().inserts(), 400);
    }
}
