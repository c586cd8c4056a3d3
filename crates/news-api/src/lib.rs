//! Typed HTTP client for the Newsdeck backend.
//!
//! This crate provides:
//! - [`ApiClient`]: reqwest-based client for the auth, news, and
//!   summarization endpoints
//! - [`ApiError`]: the normalized error taxonomy every remote failure is
//!   mapped into at this boundary
//! - [`AuthApi`]: the auth-endpoint trait the session manager is written
//!   against

mod auth_api;
mod client;
mod error;

pub use auth_api::AuthApi;
pub use client::{ApiClient, AuthRejectedHook};
pub use error::{ApiError, ApiResult};
