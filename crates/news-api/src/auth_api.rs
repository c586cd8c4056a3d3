//! Auth endpoint trait.

use crate::ApiResult;
use async_trait::async_trait;
use news_types::{ChangePasswordRequest, LoginResponse, RegisterRequest, UserRecord, UserUpdate};

/// The auth endpoints the session manager is written against.
///
/// [`crate::ApiClient`] is the production implementation; tests drive the
/// session manager with scripted fakes.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Set or clear the bearer token attached to subsequent requests.
    fn set_bearer_token(&self, token: Option<String>);

    /// `POST /api/auth/login`
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse>;

    /// `POST /api/auth/register`: returns the created user; no token is
    /// issued.
    async fn register(&self, request: &RegisterRequest) -> ApiResult<UserRecord>;

    /// `GET /api/auth/me`
    async fn me(&self) -> ApiResult<UserRecord>;

    /// `PUT /api/auth/update`: returns the full updated user.
    async fn update_user(&self, update: &UserUpdate) -> ApiResult<UserRecord>;

    /// `POST /api/auth/change-password`: returns the acknowledgement message.
    async fn change_password(&self, request: &ChangePasswordRequest) -> ApiResult<String>;
}
