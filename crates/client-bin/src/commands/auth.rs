//! Session commands: login, register, logout, whoami.

use crate::app::AppState;
use anyhow::Result;
use news_types::RegisterRequest;

pub async fn login(state: &AppState, username: &str, password: &str) -> Result<()> {
    // Drop any previous session before signing in.
    state.session.logout();

    let user = state.session.login(username, password).await?;
    println!("Signed in as {} <{}>", user.username, user.email);
    Ok(())
}

pub async fn register(
    state: &AppState,
    email: String,
    username: String,
    full_name: Option<String>,
    password: String,
    confirm_password: String,
) -> Result<()> {
    let user = state
        .session
        .register(RegisterRequest {
            email,
            username,
            full_name,
            password,
            confirm_password,
        })
        .await?;

    println!(
        "Account {} created. Sign in with `newsdeck login {}`.",
        user.username, user.username
    );
    Ok(())
}

pub fn logout(state: &AppState) -> Result<()> {
    state.session.logout();
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(state: &AppState) -> Result<()> {
    super::initialize_session(state).await?;

    match state.session.current_user() {
        Some(user) => {
            println!("{} <{}>", user.username, user.email);
            if let Some(full_name) = &user.full_name {
                println!("  name:  {full_name}");
            }
            println!("  admin: {}", user.is_admin);
        }
        None => println!("Not signed in."),
    }
    Ok(())
}
