//! Feed and search commands.

use crate::app::AppState;
use anyhow::Result;
use news_types::NewsArticle;

pub async fn show(state: &AppState, page: u32) -> Result<()> {
    // The feed works signed out too (unfiltered); rehydration must finish
    // first either way so the preference set is the current user's.
    super::initialize_session(state).await?;

    let preferences = state.session.active_preferences()?;
    let result = state.orchestrator.get_feed(&preferences, page).await?;

    if result.articles.is_empty() {
        println!("No articles found for your preferences.");
        return Ok(());
    }

    for article in &result.articles {
        print_article(article);
    }
    println!("Page {} of {}", result.page, result.total_pages.max(1));
    Ok(())
}

pub async fn search(state: &AppState, query: &str, page: u32) -> Result<()> {
    super::initialize_session(state).await?;

    let result = state.api.search(query, page, 10).await?;

    if result.articles.is_empty() {
        println!("No articles matched '{query}'.");
        return Ok(());
    }

    for article in &result.articles {
        print_article(article);
    }
    println!("Page {} of {}", result.page, result.total_pages.max(1));
    Ok(())
}

fn print_article(article: &NewsArticle) {
    println!("* {} ({})", article.title, article.source);
    if let Some(summary) = &article.summary {
        println!("  {summary}");
    } else if !article.description.is_empty() {
        println!("  {}", article.description);
    }
    println!("  {}", article.url);
}
