// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A small time-to-live cache.
//!
//! Backs the summary endpoint: aggregate results are reused for a short
//! window and dropped wholesale whenever an entry mutation lands, so readers
//! never see numbers older than the TTL or staler than the last write.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

struct CacheSlot<V> {
    value: V,
    stored_at: Instant,
}

/// A map whose values expire after a fixed time-to-live.
pub struct TtlCache<K, V> {
    ttl: Duration,
    slots: HashMap<K, CacheSlot<V>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    /// Creates an empty cache with the given time-to-live.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: HashMap::new(),
        }
    }

    /// Returns the cached value for the key if it has not expired. Expired
    /// slots are evicted on access.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let expired: bool = match self.slots.get(key) {
            Some(slot) => slot.stored_at.elapsed() >= self.ttl,
            None => return None,
        };
        if expired {
            self.slots.remove(key);
            return None;
        }
        self.slots.get(key).map(|slot| slot.value.clone())
    }

    /// Stores a value under the key, resetting its age.
    pub fn insert(&mut self, key: K, value: V) {
        self.slots.insert(
            key,
            CacheSlot {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drops every cached value.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Number of live and expired slots currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the cache holds no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::TtlCache;
    use std::time::Duration;

    #[test]
    fn test_cache_returns_fresh_value() {
        let mut cache: TtlCache<i64, String> = TtlCache::new(Duration::from_secs(300));
        cache.insert(1, String::from("summary"));
        assert_eq!(cache.get(&1), Some(String::from("summary")));
    }

    #[test]
    fn test_cache_evicts_expired_value() {
        let mut cache: TtlCache<i64, String> = TtlCache::new(Duration::ZERO);
        cache.insert(1, String::from("summary"));
        assert_eq!(cache.get(&1), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_clear_drops_everything() {
        let mut cache: TtlCache<(i64, i64), i64> = TtlCache::new(Duration::from_secs(300));
        cache.insert((1, 1), 10);
        cache.insert((2, 1), 20);
        cache.clear();
        assert_eq!(cache.get(&(1, 1)), None);
        assert_eq!(cache.len(), 0);
    }
}
