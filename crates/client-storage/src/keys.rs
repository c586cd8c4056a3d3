//! Storage key constants.

/// Storage keys used by the client
pub struct StorageKeys;

impl StorageKeys {
    /// Bearer access token
    pub const ACCESS_TOKEN: &'static str = "access_token";

    /// Last-known user snapshot (JSON)
    pub const USER_SNAPSHOT: &'static str = "user";

    /// Prefix for per-username preference sets (JSON array)
    pub const PREFERENCES_PREFIX: &'static str = "preferences_";

    /// Preference key for a given username.
    pub fn preferences(username: &str) -> String {
        format!("{}{}", Self::PREFERENCES_PREFIX, username)
    }
}
