//! High-level API for per-user content preferences.

use crate::{LocalStorage, StorageKeys, StorageResult};
use news_types::PreferenceSet;
use std::sync::Arc;
use tracing::warn;

/// Per-username preference sets, stored independently of the session token
/// so they survive logout.
#[derive(Clone)]
pub struct PreferenceStore {
    storage: Arc<dyn LocalStorage>,
}

impl PreferenceStore {
    /// Create a new preference store over the given storage backend.
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// Get the preference set for a username.
    ///
    /// An absent or corrupted entry degrades to the empty set ("no filter").
    pub fn get(&self, username: &str) -> StorageResult<PreferenceSet> {
        let key = StorageKeys::preferences(username);
        let raw = match self.storage.get(&key)? {
            Some(raw) => raw,
            None => return Ok(PreferenceSet::new()),
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(categories) => Ok(categories.into_iter().collect()),
            Err(e) => {
                warn!(username, error = %e, "Stored preferences are malformed, treating as empty");
                Ok(PreferenceSet::new())
            }
        }
    }

    /// Overwrite the preference set for a username. No merge.
    pub fn set(&self, username: &str, preferences: &PreferenceSet) -> StorageResult<()> {
        let key = StorageKeys::preferences(username);
        let categories: Vec<&String> = preferences.iter().collect();
        let raw = serde_json::to_string(&categories)
            .map_err(|e| crate::StorageError::Encoding(e.to_string()))?;
        self.storage.set(&key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryStorage;

    fn set(items: &[&str]) -> PreferenceSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn absent_preferences_are_empty() {
        let prefs = PreferenceStore::new(Arc::new(MemoryStorage::new()));
        assert!(prefs.get("ada").unwrap().is_empty());
    }

    #[test]
    fn set_then_get_roundtrip() {
        let prefs = PreferenceStore::new(Arc::new(MemoryStorage::new()));

        prefs.set("ada", &set(&["sports", "politics"])).unwrap();
        assert_eq!(prefs.get("ada").unwrap(), set(&["politics", "sports"]));
    }

    #[test]
    fn set_overwrites_without_merging() {
        let prefs = PreferenceStore::new(Arc::new(MemoryStorage::new()));

        prefs.set("ada", &set(&["sports", "crime"])).unwrap();
        prefs.set("ada", &set(&["entertainment"])).unwrap();

        assert_eq!(prefs.get("ada").unwrap(), set(&["entertainment"]));
    }

    #[test]
    fn preferences_are_scoped_per_username() {
        let prefs = PreferenceStore::new(Arc::new(MemoryStorage::new()));

        prefs.set("ada", &set(&["sports"])).unwrap();

        assert_eq!(prefs.get("ada").unwrap(), set(&["sports"]));
        assert!(prefs.get("bob").unwrap().is_empty());
    }

    #[test]
    fn corrupted_preferences_degrade_to_empty() {
        let backend = Arc::new(MemoryStorage::new());
        backend
            .set(&StorageKeys::preferences("ada"), "{ not an array")
            .unwrap();

        let prefs = PreferenceStore::new(backend);
        assert!(prefs.get("ada").unwrap().is_empty());
    }
}
