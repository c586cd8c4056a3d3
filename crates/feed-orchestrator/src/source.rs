//! The remote source the orchestrator fetches from.

use async_trait::async_trait;
use news_api::{ApiClient, ApiResult};
use news_types::{NewsPage, SummaryResult};

/// The two remote calls behind a feed page.
///
/// [`ApiClient`] is the production implementation; tests drive the
/// orchestrator with scripted fakes.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Stage one: fetch `limit` articles for `page`, filtered by the
    /// normalized category list (empty = unfiltered).
    async fn fetch_articles(
        &self,
        categories: &[String],
        page: u32,
        limit: u32,
    ) -> ApiResult<NewsPage>;

    /// Stage two: summarize `texts` in one batch; results align positionally
    /// with the input.
    async fn summarize(&self, texts: &[String]) -> ApiResult<Vec<SummaryResult>>;
}

#[async_trait]
impl FeedSource for ApiClient {
    async fn fetch_articles(
        &self,
        categories: &[String],
        page: u32,
        limit: u32,
    ) -> ApiResult<NewsPage> {
        self.news(categories, page, limit).await
    }

    async fn summarize(&self, texts: &[String]) -> ApiResult<Vec<SummaryResult>> {
        let response = ApiClient::summarize(self, texts).await?;
        Ok(response.results)
    }
}
