//! Feed cache keyed by normalized preference set and page.

use crate::FeedResult;
use news_types::{normalize_categories, PreferenceSet};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cache key: the normalized preference snapshot plus the page number.
///
/// Two preference sets that normalize identically share a key; any other
/// pair is isolated, so a changed filter can never surface a previous
/// filter's articles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedKey {
    /// Normalized category list (trimmed, lowercased, de-duplicated, sorted).
    pub categories: Vec<String>,
    /// 1-based page number.
    pub page: u32,
}

impl FeedKey {
    /// Build the key for a preference set and page.
    pub fn new(preferences: &PreferenceSet, page: u32) -> Self {
        Self {
            categories: normalize_categories(preferences),
            page,
        }
    }
}

struct CacheEntry {
    result: FeedResult,
    stored_at: Instant,
}

/// Bounded, staleness-aware cache of merged feed pages.
///
/// Process-lifetime only; nothing here is persisted.
pub struct FeedCache {
    entries: HashMap<FeedKey, CacheEntry>,
    stale_after: Duration,
    max_entries: usize,
}

impl FeedCache {
    /// Create an empty cache.
    pub fn new(stale_after: Duration, max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            stale_after,
            max_entries,
        }
    }

    /// Get a non-stale entry.
    pub fn fresh(&self, key: &FeedKey) -> Option<FeedResult> {
        self.entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.stale_after)
            .map(|entry| entry.result.clone())
    }

    /// Get an entry regardless of age. Used to serve a stale value when a
    /// refresh fails.
    pub fn any(&self, key: &FeedKey) -> Option<FeedResult> {
        self.entries.get(key).map(|entry| entry.result.clone())
    }

    /// Insert (or replace) an entry, evicting the oldest one when the cache
    /// is full.
    pub fn insert(&mut self, key: FeedKey, result: FeedResult) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                self.entries.remove(&oldest);
            }
        }

        self.entries.insert(
            key,
            CacheEntry {
                result,
                stored_at: Instant::now(),
            },
        );
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn set(items: &[&str]) -> PreferenceSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn result(page: u32) -> FeedResult {
        FeedResult {
            articles: Vec::new(),
            total: 0,
            page,
            limit: 10,
            total_pages: 0,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn key_normalizes_preferences() {
        let noisy = FeedKey::new(&set(&["Sports", " sports", "Crime"]), 1);
        let clean = FeedKey::new(&set(&["crime", "sports"]), 1);
        assert_eq!(noisy, clean);
    }

    #[test]
    fn distinct_preferences_give_distinct_keys() {
        let a = FeedKey::new(&set(&["sports"]), 1);
        let b = FeedKey::new(&set(&["crime"]), 1);
        let unfiltered = FeedKey::new(&PreferenceSet::new(), 1);
        assert_ne!(a, b);
        assert_ne!(a, unfiltered);
    }

    #[test]
    fn same_preferences_different_pages_give_distinct_keys() {
        let p1 = FeedKey::new(&set(&["sports"]), 1);
        let p2 = FeedKey::new(&set(&["sports"]), 2);
        assert_ne!(p1, p2);
    }

    #[test]
    fn fresh_entry_is_returned() {
        let mut cache = FeedCache::new(Duration::from_secs(60), 4);
        let key = FeedKey::new(&PreferenceSet::new(), 1);

        cache.insert(key.clone(), result(1));

        assert!(cache.fresh(&key).is_some());
        assert!(cache.any(&key).is_some());
    }

    #[test]
    fn stale_entry_is_not_fresh_but_still_any() {
        let mut cache = FeedCache::new(Duration::ZERO, 4);
        let key = FeedKey::new(&PreferenceSet::new(), 1);

        cache.insert(key.clone(), result(1));

        assert!(cache.fresh(&key).is_none());
        assert!(cache.any(&key).is_some());
    }

    #[test]
    fn insert_evicts_oldest_beyond_capacity() {
        let mut cache = FeedCache::new(Duration::from_secs(60), 2);

        let k1 = FeedKey::new(&set(&["a"]), 1);
        let k2 = FeedKey::new(&set(&["b"]), 1);
        let k3 = FeedKey::new(&set(&["c"]), 1);

        cache.insert(k1.clone(), result(1));
        cache.insert(k2.clone(), result(1));
        cache.insert(k3.clone(), result(1));

        assert_eq!(cache.len(), 2);
        assert!(cache.any(&k1).is_none());
        assert!(cache.any(&k2).is_some());
        assert!(cache.any(&k3).is_some());
    }

    #[test]
    fn replacing_an_entry_does_not_evict() {
        let mut cache = FeedCache::new(Duration::from_secs(60), 2);

        let k1 = FeedKey::new(&set(&["a"]), 1);
        let k2 = FeedKey::new(&set(&["b"]), 1);

        cache.insert(k1.clone(), result(1));
        cache.insert(k2.clone(), result(1));
        cache.insert(k1.clone(), result(2));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.any(&k1).unwrap().page, 2);
        assert!(cache.any(&k2).is_some());
    }
}
