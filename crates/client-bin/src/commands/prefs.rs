//! Preference commands.

use crate::app::AppState;
use anyhow::Result;
use news_types::PreferenceSet;

pub async fn show(state: &AppState) -> Result<()> {
    super::initialize_session(state).await?;

    let preferences = state.session.active_preferences()?;
    if preferences.is_empty() {
        println!("No category filter (showing all news).");
    } else {
        let categories: Vec<&str> = preferences.iter().map(String::as_str).collect();
        println!("Categories: {}", categories.join(", "));
    }
    Ok(())
}

pub async fn set(state: &AppState, categories: Vec<String>) -> Result<()> {
    super::initialize_session(state).await?;

    let preferences: PreferenceSet = categories.into_iter().collect();
    state.session.set_preferences(&preferences)?;

    if preferences.is_empty() {
        println!("Category filter cleared.");
    } else {
        let categories: Vec<&str> = preferences.iter().map(String::as_str).collect();
        println!("Categories set: {}", categories.join(", "));
    }
    Ok(())
}
