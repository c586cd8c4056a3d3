//! Normalized API error taxonomy.
//!
//! Every remote failure is converted into one of these kinds at the
//! transport boundary; component logic never sees raw transport errors or
//! loosely-typed backend payloads. All variants are `Clone` so coalesced
//! callers can share one outcome.

use thiserror::Error;

/// Error type for remote API operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS). Transient.
    #[error("Network failure: {0}")]
    Network(String),

    /// The backend rejected the credential (401). Forces session invalidation.
    #[error("Authentication rejected: {0}")]
    AuthRejected(String),

    /// The request was well-formed but invalid (400/422), or failed
    /// client-side validation before any remote call.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Any other non-success HTTP status.
    #[error("Server error: HTTP {status}: {message}")]
    Server {
        /// The HTTP status code.
        status: u16,
        /// Flattened error detail from the response body.
        message: String,
    },

    /// The response body did not match the expected schema.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Returns true if this error is transient and the operation can be
    /// retried: network failures and 5xx server errors.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::Server { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Result type alias using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;

/// Flatten a backend error body into a single message.
///
/// The backend reports errors as `{"detail": "..."}` for simple failures and
/// `{"detail": [{"msg": "...", ...}, ...]}` for field validation failures.
/// Anything else falls back to the raw body (or a placeholder when empty).
pub(crate) fn flatten_error_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(s)) => return s.clone(),
            Some(serde_json::Value::Array(items)) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .collect();
                if !messages.is_empty() {
                    return messages.join("; ");
                }
            }
            _ => {}
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no error detail".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Map a non-success HTTP status and body to the normalized error kind.
pub(crate) fn normalize_status(status: u16, body: &str) -> ApiError {
    let message = flatten_error_detail(body);
    match status {
        401 => ApiError::AuthRejected(message),
        400 | 422 => ApiError::Validation(message),
        _ => ApiError::Server { status, message },
    }
}
