//! HTTP client for the Newsdeck backend.

use crate::error::{normalize_status, ApiError, ApiResult};
use crate::AuthApi;
use async_trait::async_trait;
use news_types::{
    ChangePasswordRequest, LoginRequest, LoginResponse, NewsPage, RegisterRequest,
    SummarizeRequest, SummarizeResponse, UserRecord, UserUpdate,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::{Mutex, RwLock};
use std::time::Duration;
use tracing::{debug, warn};

/// Bounded timeout applied to every request at the transport boundary.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Callback invoked whenever any endpoint reports an authentication-rejected
/// response, before the error propagates to the caller.
pub type AuthRejectedHook = Box<dyn Fn() + Send + Sync>;

/// Simple `{"message": "..."}` acknowledgement body.
#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

/// Client for the auth, news, and summarization endpoints.
///
/// Holds the current bearer token and attaches it to every request when
/// present. A single auth-rejected hook centralizes the forced-logout side
/// effect: one 401 anywhere clears the session before the error reaches the
/// caller.
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
    auth_rejected_hook: Mutex<Option<AuthRejectedHook>>,
}

impl ApiClient {
    /// Create a new client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            base_url,
            token: RwLock::new(None),
            auth_rejected_hook: Mutex::new(None),
        })
    }

    /// Build the URL for an API path.
    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Set the hook invoked on every authentication-rejected response.
    pub fn set_auth_rejected_hook(&self, hook: AuthRejectedHook) {
        let mut cb = self.auth_rejected_hook.lock().unwrap();
        *cb = Some(hook);
    }

    /// Attach the bearer header when a token is held.
    fn with_bearer(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let token = self.token.read().unwrap();
        match token.as_deref() {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Normalize a response into the typed body or an [`ApiError`].
    ///
    /// This is the single place authentication-rejected responses are
    /// detected; the hook fires here before the error is returned.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ApiResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = normalize_status(status.as_u16(), &body);
            if matches!(err, ApiError::AuthRejected(_)) {
                self.note_auth_rejected();
            }
            warn!(status = %status, error = %err, "Request failed");
            return Err(err);
        }

        Ok(response.json().await?)
    }

    /// Invoke the auth-rejected hook if one is registered.
    fn note_auth_rejected(&self) {
        let cb = self.auth_rejected_hook.lock().unwrap();
        if let Some(hook) = cb.as_ref() {
            hook();
        }
    }

    /// Fetch a page of articles, optionally filtered by category.
    ///
    /// `categories` must already be normalized; an empty slice means
    /// unfiltered.
    pub async fn news(&self, categories: &[String], page: u32, limit: u32) -> ApiResult<NewsPage> {
        let url = self.api_url("/news");

        debug!(url = %url, ?categories, page, limit, "Fetching news page");

        let mut request = self.http_client.get(&url).query(&[
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ]);
        if !categories.is_empty() {
            request = request.query(&[("categories", categories.join(","))]);
        }

        let response = self.with_bearer(request).send().await?;
        self.handle_response(response).await
    }

    /// Full-text article search.
    pub async fn search(&self, query: &str, page: u32, limit: u32) -> ApiResult<NewsPage> {
        let url = self.api_url("/search");

        debug!(url = %url, query, page, limit, "Searching news");

        let request = self.http_client.get(&url).query(&[
            ("q", query.to_string()),
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ]);

        let response = self.with_bearer(request).send().await?;
        self.handle_response(response).await
    }

    /// Batched summarization. Results align positionally with `texts`.
    ///
    /// The summarization endpoint lives at the server root, not under `/api`.
    pub async fn summarize(&self, texts: &[String]) -> ApiResult<SummarizeResponse> {
        let url = format!("{}/summarize", self.base_url);

        debug!(url = %url, count = texts.len(), "Requesting summaries");

        let response = self
            .http_client
            .post(&url)
            .json(&SummarizeRequest {
                texts: texts.to_vec(),
            })
            .send()
            .await?;
        self.handle_response(response).await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    fn set_bearer_token(&self, token: Option<String>) {
        let mut slot = self.token.write().unwrap();
        *slot = token;
    }

    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let url = self.api_url("/auth/login");

        debug!(url = %url, username, "Attempting login");

        let response = self
            .http_client
            .post(&url)
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<UserRecord> {
        let url = self.api_url("/auth/register");

        debug!(url = %url, username = %request.username, "Registering account");

        let response = self.http_client.post(&url).json(request).send().await?;
        self.handle_response(response).await
    }

    async fn me(&self) -> ApiResult<UserRecord> {
        let url = self.api_url("/auth/me");

        debug!(url = %url, "Fetching current user");

        let request = self.http_client.get(&url);
        let response = self.with_bearer(request).send().await?;
        self.handle_response(response).await
    }

    async fn update_user(&self, update: &UserUpdate) -> ApiResult<UserRecord> {
        let url = self.api_url("/auth/update");

        debug!(url = %url, "Updating account");

        let request = self.http_client.put(&url).json(update);
        let response = self.with_bearer(request).send().await?;
        self.handle_response(response).await
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> ApiResult<String> {
        let url = self.api_url("/auth/change-password");

        debug!(url = %url, "Changing password");

        let req = self.http_client.post(&url).json(request);
        let response = self.with_bearer(req).send().await?;
        let ack: MessageResponse = self.handle_response(response).await?;
        Ok(ack.message)
    }
}
