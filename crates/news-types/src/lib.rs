//! Pure wire and domain types for the Newsdeck client.
//!
//! Field names mirror the backend's JSON exactly: user and auth payloads are
//! snake_case, news payloads use the feed provider's camelCase.

mod news;
mod preferences;
mod user;

pub use news::{NewsArticle, NewsPage, SummarizeRequest, SummarizeResponse, SummaryResult};
pub use preferences::{normalize_categories, PreferenceSet};
pub use user::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, UserRecord, UserUpdate,
};
