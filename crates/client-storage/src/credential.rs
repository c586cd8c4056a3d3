//! High-level API for the persisted credential.

use crate::{LocalStorage, StorageKeys, StorageResult};
use news_types::UserRecord;
use std::sync::Arc;
use tracing::warn;

/// Bearer token plus last-known user snapshot, persisted as a unit.
///
/// A stored token without a usable snapshot is not an error at this layer;
/// the session manager treats it as requiring a remote re-fetch.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn LocalStorage>,
}

impl CredentialStore {
    /// Create a new credential store over the given storage backend.
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// Persist token and user snapshot in one durable write.
    pub fn store(&self, token: &str, user: &UserRecord) -> StorageResult<()> {
        let user_json = serde_json::to_string(user)
            .map_err(|e| crate::StorageError::Encoding(e.to_string()))?;
        self.storage.set_many(&[
            (StorageKeys::ACCESS_TOKEN, token),
            (StorageKeys::USER_SNAPSHOT, &user_json),
        ])
    }

    /// Replace only the user snapshot, leaving the token untouched.
    pub fn store_user(&self, user: &UserRecord) -> StorageResult<()> {
        let user_json = serde_json::to_string(user)
            .map_err(|e| crate::StorageError::Encoding(e.to_string()))?;
        self.storage.set(StorageKeys::USER_SNAPSHOT, &user_json)
    }

    /// Retrieve the stored bearer token.
    pub fn token(&self) -> StorageResult<Option<String>> {
        self.storage.get(StorageKeys::ACCESS_TOKEN)
    }

    /// Retrieve the stored user snapshot.
    ///
    /// A malformed snapshot degrades to `None` rather than failing the read.
    pub fn user_snapshot(&self) -> StorageResult<Option<UserRecord>> {
        let raw = match self.storage.get(StorageKeys::USER_SNAPSHOT)? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "Stored user snapshot is malformed, ignoring");
                Ok(None)
            }
        }
    }

    /// Check whether a token is stored.
    pub fn has_token(&self) -> StorageResult<bool> {
        self.storage.has(StorageKeys::ACCESS_TOKEN)
    }

    /// Remove token and snapshot.
    pub fn clear(&self) -> StorageResult<()> {
        self.storage.delete(StorageKeys::ACCESS_TOKEN)?;
        self.storage.delete(StorageKeys::USER_SNAPSHOT)?;
        Ok(())
    }
}
