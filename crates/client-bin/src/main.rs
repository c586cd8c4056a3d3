//! Newsdeck - command-line consumer for the personalized news feed.
//!
//! Thin I/O layer over the session manager and the feed orchestrator; all
//! orchestration lives in the library crates.

mod app;
mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_config_and_utils::{init_logging, Config, Paths};

use crate::app::AppState;

/// Newsdeck command-line interface.
#[derive(Parser)]
#[command(name = "newsdeck")]
#[command(about = "Personalized news feed with generated summaries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Base directory for config and local storage. Defaults to ~/.newsdeck
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create a new account (sign in afterwards with `login`)
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the current session
    Whoami,
    /// Account maintenance
    #[command(subcommand)]
    Account(AccountCommands),
    /// Content category preferences
    #[command(subcommand)]
    Prefs(PrefsCommands),
    /// Show a page of the personalized, summarized feed
    Feed {
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Full-text article search
    Search {
        query: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Update account fields
    Update {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Change the account password
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Subcommand)]
enum PrefsCommands {
    /// Show the active preference set
    Show,
    /// Overwrite the preference set (no arguments clears the filter)
    Set {
        categories: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    let paths = match cli.base_dir {
        Some(base) => Paths::with_base_dir(base),
        None => Paths::new()?,
    };
    let config = Config::load(&paths)?;

    let state = AppState::build(&paths, &config)?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&state, &username, &password).await
        }
        Commands::Register {
            email,
            username,
            full_name,
            password,
            confirm_password,
        } => {
            commands::auth::register(&state, email, username, full_name, password, confirm_password)
                .await
        }
        Commands::Logout => commands::auth::logout(&state),
        Commands::Whoami => commands::auth::whoami(&state).await,
        Commands::Account(AccountCommands::Update {
            email,
            username,
            full_name,
        }) => commands::account::update(&state, email, username, full_name).await,
        Commands::Account(AccountCommands::ChangePassword {
            current,
            new,
            confirm,
        }) => commands::account::change_password(&state, &current, &new, &confirm).await,
        Commands::Prefs(PrefsCommands::Show) => commands::prefs::show(&state).await,
        Commands::Prefs(PrefsCommands::Set { categories }) => {
            commands::prefs::set(&state, categories).await
        }
        Commands::Feed { page } => commands::feed::show(&state, page).await,
        Commands::Search { query, page } => commands::feed::search(&state, &query, page).await,
    }
}
