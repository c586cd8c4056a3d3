//! Two-stage feed fetching with a staleness-aware, request-coalescing cache.
//!
//! [`FeedOrchestrator::get_feed`] fetches a page of articles filtered by the
//! viewer's preference set, sends their texts through the summarization
//! endpoint in one batch, merges summaries onto articles by position, and
//! caches the merged result keyed by `(normalized preferences, page)`.
//!
//! Contracts:
//! - A fresh cache entry is returned without any network call.
//! - At most one remote fetch is in flight per key; concurrent identical
//!   requests share the leader's outcome.
//! - The fetch runs in a spawned task, so an abandoned caller never cancels
//!   work other callers (or the cache) benefit from.
//! - Stage one failing fails the call, unless a stale entry exists, which
//!   is then returned instead. Stage two is best-effort: a failed or short
//!   summary batch degrades to a fallback string, never an error.

mod cache;
mod config;
mod source;

#[cfg(test)]
mod tests;

pub use cache::{FeedCache, FeedKey};
pub use config::{FeedConfig, FeedRetryConfig};
pub use source::FeedSource;

use chrono::{DateTime, Utc};
use news_api::{ApiError, ApiResult};
use news_types::{NewsArticle, PreferenceSet};
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Description value the feed provider emits when it has none; the article
/// title is summarized instead.
pub const PLACEHOLDER_DESCRIPTION: &str = "No description available";

/// Summary attached when enrichment fails or comes back short.
pub const FALLBACK_SUMMARY: &str = "Unable to generate summary";

/// One merged, summary-enriched feed page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedResult {
    /// Articles with `summary` populated on every entry.
    pub articles: Vec<NewsArticle>,
    pub total: u32,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    /// When this result was fetched.
    pub fetched_at: DateTime<Utc>,
}

type FeedOutcome = ApiResult<FeedResult>;
type WaiterMap = HashMap<FeedKey, Vec<oneshot::Sender<FeedOutcome>>>;

/// Feed fetching and caching front end.
///
/// Cheap to clone; clones share one cache and one in-flight table.
#[derive(Clone)]
pub struct FeedOrchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn FeedSource>,
    config: FeedConfig,
    cache: Mutex<FeedCache>,
    in_flight: Mutex<WaiterMap>,
}

impl FeedOrchestrator {
    /// Create a new orchestrator over the given source.
    pub fn new(source: Arc<dyn FeedSource>, config: FeedConfig) -> Self {
        let cache = FeedCache::new(config.stale_after, config.max_entries);
        Self {
            inner: Arc::new(Inner {
                source,
                config,
                cache: Mutex::new(cache),
                in_flight: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Get one feed page for the given preference set.
    ///
    /// Fresh cache hits return immediately. Otherwise the caller either
    /// becomes the leader of a new fetch or parks on an identical in-flight
    /// one and shares its outcome.
    pub async fn get_feed(&self, preferences: &PreferenceSet, page: u32) -> FeedOutcome {
        let key = FeedKey::new(preferences, page);

        if let Some(result) = self.inner.cache.lock().unwrap().fresh(&key) {
            debug!(?key, "Feed cache hit");
            return Ok(result);
        }

        let rx = {
            let mut in_flight = self.inner.in_flight.lock().unwrap();
            let (tx, rx) = oneshot::channel();
            match in_flight.entry(key.clone()) {
                Entry::Occupied(mut waiters) => {
                    debug!(?key, "Coalescing onto in-flight feed fetch");
                    waiters.get_mut().push(tx);
                }
                Entry::Vacant(slot) => {
                    slot.insert(vec![tx]);
                    let inner = self.inner.clone();
                    let task_key = key.clone();
                    tokio::spawn(async move {
                        Inner::run_fetch(inner, task_key).await;
                    });
                }
            }
            rx
        };

        rx.await
            .unwrap_or_else(|_| Err(ApiError::Network("feed fetch task dropped".to_string())))
    }
}

impl Inner {
    /// Execute one fetch for `key` and deliver the outcome to every waiter.
    ///
    /// Runs detached from any caller: the result lands in the cache even if
    /// everyone who asked for it has navigated away.
    async fn run_fetch(inner: Arc<Inner>, key: FeedKey) {
        let outcome = inner.fetch_with_policy(&key).await;

        let waiters = {
            let mut in_flight = inner.in_flight.lock().unwrap();
            in_flight.remove(&key).unwrap_or_default()
        };

        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
    }

    /// Cache-aware fetch: re-check freshness, fetch with retry, fall back to
    /// a stale entry when the refresh fails.
    async fn fetch_with_policy(&self, key: &FeedKey) -> FeedOutcome {
        // Another fetch may have landed between the caller's cache miss and
        // this task starting.
        if let Some(result) = self.cache.lock().unwrap().fresh(key) {
            return Ok(result);
        }

        match self.fetch_merged(key).await {
            Ok(result) => {
                self.cache.lock().unwrap().insert(key.clone(), result.clone());
                Ok(result)
            }
            Err(e) => {
                if let Some(stale) = self.cache.lock().unwrap().any(key) {
                    warn!(?key, error = %e, "Feed refresh failed, serving stale entry");
                    return Ok(stale);
                }
                Err(e)
            }
        }
    }

    /// The two-stage fetch: articles, then one batched summarization call,
    /// merged by position. Stage one retries transient failures; stage two
    /// never fails the call.
    async fn fetch_merged(&self, key: &FeedKey) -> FeedOutcome {
        let page = self.fetch_articles_with_retry(key).await?;

        if page.articles.is_empty() {
            debug!(?key, "Stage one returned no articles, skipping summarization");
            return Ok(FeedResult {
                articles: Vec::new(),
                total: 0,
                page: key.page,
                limit: self.config.page_size,
                total_pages: 0,
                fetched_at: Utc::now(),
            });
        }

        let texts: Vec<String> = page
            .articles
            .iter()
            .map(|article| {
                if article.description == PLACEHOLDER_DESCRIPTION {
                    article.title.clone()
                } else {
                    article.description.clone()
                }
            })
            .collect();

        let summaries: Vec<String> = match self.source.summarize(&texts).await {
            Ok(results) => results.into_iter().map(|r| r.summary).collect(),
            Err(e) => {
                // Enrichment is best-effort; the feed still renders.
                warn!(?key, error = %e, "Summarization failed, using fallback summaries");
                Vec::new()
            }
        };

        let articles: Vec<NewsArticle> = page
            .articles
            .into_iter()
            .enumerate()
            .map(|(idx, mut article)| {
                article.summary = Some(
                    summaries
                        .get(idx)
                        .filter(|s| !s.is_empty())
                        .cloned()
                        .unwrap_or_else(|| FALLBACK_SUMMARY.to_string()),
                );
                article
            })
            .collect();

        Ok(FeedResult {
            articles,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
            fetched_at: Utc::now(),
        })
    }

    /// Stage one with retry for transient failures.
    async fn fetch_articles_with_retry(&self, key: &FeedKey) -> ApiResult<news_types::NewsPage> {
        let retry = &self.config.retry;
        let mut last_error = None;

        for attempt in 0..retry.max_attempts {
            match self
                .source
                .fetch_articles(&key.categories, key.page, self.config.page_size)
                .await
            {
                Ok(page) => return Ok(page),
                Err(e) if e.is_transient() => {
                    last_error = Some(e);

                    if attempt + 1 < retry.max_attempts {
                        let delay = retry.delay_for_attempt(attempt);
                        debug!(
                            attempt = attempt + 1,
                            max_attempts = retry.max_attempts,
                            delay_ms = delay.as_millis(),
                            "Article fetch failed with transient error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error
            .unwrap_or_else(|| ApiError::Network("article fetch retries exhausted".to_string())))
    }
}
