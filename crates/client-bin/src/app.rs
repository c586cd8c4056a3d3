//! Application state wiring.

use anyhow::Result;
use client_config_and_utils::{Config, Paths};
use client_storage::{create_storage, CredentialStore, PreferenceStore};
use feed_orchestrator::{FeedConfig, FeedOrchestrator};
use news_api::ApiClient;
use session_engine::SessionManager;
use std::sync::Arc;

/// Shared handles for all commands.
pub struct AppState {
    pub session: Arc<SessionManager>,
    pub orchestrator: FeedOrchestrator,
    pub api: Arc<ApiClient>,
}

impl AppState {
    /// Wire storage, API client, session manager, and orchestrator together.
    pub fn build(paths: &Paths, config: &Config) -> Result<Self> {
        paths.ensure_dirs()?;

        let storage = create_storage(paths)?;
        let credentials = CredentialStore::new(storage.clone());
        let preferences = PreferenceStore::new(storage);

        let api = Arc::new(ApiClient::new(config.api_base_url.clone())?);

        let session = SessionManager::new(credentials, preferences, api.clone());
        session.attach_forced_logout(&api);

        let orchestrator = FeedOrchestrator::new(api.clone(), FeedConfig::default());

        Ok(Self {
            session,
            orchestrator,
            api,
        })
    }
}
