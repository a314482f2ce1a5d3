use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

/// Default number of entries kept by [`TtlCache`]
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Bounded key/value store whose entries expire after a fixed time-to-live
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    ttl: Duration,
    capacity: usize,
}

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() > ttl
    }
}

impl<V: Clone> TtlCache<V> {
    /// Create an empty cache. A capacity of zero disables caching.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            capacity,
        }
    }

    /// Return a copy of the value for `key` unless it is missing or expired
    pub fn get(&mut self, key: &str) -> Option<V> {
        let expired = self.entries.get(key)?.is_expired(self.ttl);

        if expired {
            self.entries.remove(key);
            return None;
        }

        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Store a value, evicting the oldest entry when the cache is full
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        if self.capacity == 0 {
            return;
        }

        let key = key.into();

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.purge_expired();

            if self.entries.len() >= self.capacity {
                self.evict_oldest();
            }
        }

        self.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop every expired entry
    pub fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| !entry.is_expired(ttl));
    }

    /// Number of stored entries, expired ones included until they are purged
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.inserted_at)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let mut cache = TtlCache::new(10, Duration::from_secs(300));
        cache.insert("me", 1);

        tokio::time::advance(Duration::from_secs(299)).await;
        assert_eq!(cache.get("me"), Some(1));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get("me"), None);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_oldest_entry_is_evicted_at_capacity() {
        let mut cache = TtlCache::new(2, Duration::from_secs(60));
        cache.insert("a", 1);
        tokio::time::advance(Duration::from_millis(10)).await;
        cache.insert("b", 2);
        tokio::time::advance(Duration::from_millis(10)).await;
        cache.insert("c", 3);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));
        assert_eq!(cache.get("c"), Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_refreshes_entry() {
        let mut cache = TtlCache::new(1, Duration::from_secs(5));
        cache.insert("a", 1);
        tokio::time::advance(Duration::from_secs(4)).await;
        cache.insert("a", 2);
        tokio::time::advance(Duration::from_secs(4)).await;

        assert_eq!(cache.get("a"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_capacity_disables_cache() {
        let mut cache = TtlCache::new(0, Duration::from_secs(5));
        cache.insert("a", 1);
        assert_eq!(cache.get("a"), None);
    }
}
