//! Account maintenance commands.

use crate::app::AppState;
use anyhow::{bail, Result};
use news_types::UserUpdate;

pub async fn update(
    state: &AppState,
    email: Option<String>,
    username: Option<String>,
    full_name: Option<String>,
) -> Result<()> {
    if email.is_none() && username.is_none() && full_name.is_none() {
        bail!("nothing to update: pass at least one of --email, --username, --full-name");
    }

    super::initialize_session(state).await?;

    let user = state
        .session
        .update_user(UserUpdate {
            email,
            username,
            full_name,
        })
        .await?;

    println!("Account updated: {} <{}>", user.username, user.email);
    Ok(())
}

pub async fn change_password(
    state: &AppState,
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<()> {
    super::initialize_session(state).await?;

    let message = state.session.change_password(current, new, confirm).await?;
    println!("{message}");
    Ok(())
}
