//! Command implementations.

pub mod account;
pub mod auth;
pub mod feed;
pub mod prefs;

use crate::app::AppState;
use anyhow::Result;
use tracing::warn;

/// Await session rehydration before anything that depends on the active
/// preference set or the stored credential.
///
/// A failed restore leaves the session signed out; commands that can run
/// unauthenticated keep going.
pub async fn initialize_session(state: &AppState) -> Result<()> {
    if let Err(e) = state.session.initialize().await {
        warn!(error = %e, "Could not restore the stored session");
        eprintln!("Stored session is no longer valid; sign in again with `newsdeck login`.");
    }
    Ok(())
}
