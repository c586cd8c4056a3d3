//! Content category preferences.

use std::collections::BTreeSet;

/// Set of content categories a user filters their feed by.
///
/// An empty set means "no filter, show everything", not "show nothing".
pub type PreferenceSet = BTreeSet<String>;

/// Normalize a preference set into a canonical category list:
/// trimmed, lowercased, de-duplicated, sorted.
///
/// Two preference sets that normalize to the same list are the same filter.
pub fn normalize_categories(preferences: &PreferenceSet) -> Vec<String> {
    let normalized: BTreeSet<String> = preferences
        .iter()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .collect();
    normalized.into_iter().collect()
}
