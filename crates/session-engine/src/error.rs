//! Session error types.

use news_api::ApiError;
use thiserror::Error;

/// Session error type.
#[derive(Error, Debug)]
pub enum SessionError {
    /// No user is signed in
    #[error("Not signed in")]
    NotSignedIn,

    /// Invalid transition in the session FSM
    #[error("Invalid session state transition: {0}")]
    InvalidStateTransition(String),

    /// Remote API error, already normalized at the transport boundary
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] client_storage::StorageError),
}

impl SessionError {
    /// Client-side validation failure, surfaced in the same kind as a
    /// backend validation rejection.
    pub fn validation(message: impl Into<String>) -> Self {
        SessionError::Api(ApiError::Validation(message.into()))
    }

    /// Returns true if the underlying cause is an authentication rejection.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, SessionError::Api(ApiError::AuthRejected(_)))
    }
}

/// Result type alias using SessionError.
pub type SessionResult<T> = Result<T, SessionError>;
