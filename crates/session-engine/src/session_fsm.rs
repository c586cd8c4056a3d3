//! Session state machine using rust-fsm.
//!
//! The session lifecycle is an explicit finite state machine rather than a
//! status derived from storage checks.
//!
//! ## State Diagram
//!
//! ```text
//! ┌─────────────────┐
//! │    SignedOut    │ (initial)
//! └────────┬────────┘
//!          │ RestoreAttempt / LoginAttempt / RegisterAttempt
//!          ▼
//! ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐
//! │    Restoring    │   │    LoggingIn    │   │   Registering   │
//! └────────┬────────┘   └────────┬────────┘   └────────┬────────┘
//!          │                     │                     │
//!          │ RestoreSuccess      │ LoginSuccess        │ RegisterFinished /
//!          │                     │                     │ RegisterFailed
//!          │ RestoreFailed /     │ LoginFailed         │ (no token issued:
//!          │ NoCredential        │                     │  back to SignedOut)
//!          ▼                     ▼                     ▼
//! ┌─────────────────┐
//! │    SignedIn     │ ◄── RestoreSuccess / LoginSuccess
//! └────────┬────────┘
//!          │ LogoutRequested / CredentialRejected
//!          ▼
//!      SignedOut
//! ```

use rust_fsm::*;
use serde::{Deserialize, Serialize};

state_machine! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub session_machine(SignedOut)

    SignedOut => {
        RestoreAttempt => Restoring,
        LoginAttempt => LoggingIn,
        RegisterAttempt => Registering
    },
    Restoring => {
        RestoreSuccess => SignedIn,
        RestoreFailed => SignedOut,
        NoCredential => SignedOut
    },
    LoggingIn => {
        LoginSuccess => SignedIn,
        LoginFailed => SignedOut
    },
    Registering => {
        RegisterFinished => SignedOut,
        RegisterFailed => SignedOut
    },
    SignedIn => {
        LogoutRequested => SignedOut,
        CredentialRejected => SignedOut
    }
}

// Re-export the generated types with clearer names
pub use session_machine::Input as SessionMachineInput;
pub use session_machine::State as SessionMachineState;
pub use session_machine::StateMachine as SessionMachine;

/// Public session status for consumers.
///
/// This is the simplified view of the FSM state: transient states collapse
/// into `Authenticating`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No authenticated user.
    Unauthenticated,
    /// A restore, login, or registration is in progress.
    Authenticating,
    /// Signed in with a current user snapshot.
    Authenticated,
}

impl SessionStatus {
    /// Returns true if a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionStatus::Authenticated)
    }

    /// Returns true if the status is transient and will settle shortly.
    pub fn is_transient(&self) -> bool {
        matches!(self, SessionStatus::Authenticating)
    }
}

impl From<&SessionMachineState> for SessionStatus {
    fn from(state: &SessionMachineState) -> Self {
        match state {
            SessionMachineState::SignedOut => SessionStatus::Unauthenticated,
            SessionMachineState::Restoring
            | SessionMachineState::LoggingIn
            | SessionMachineState::Registering => SessionStatus::Authenticating,
            SessionMachineState::SignedIn => SessionStatus::Authenticated,
        }
    }
}

/// Payload for session status change notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatusChangedPayload {
    /// Current session status.
    pub status: SessionStatus,
    /// Username if signed in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Callback type for session status change notifications.
pub type SessionStateCallback = Box<dyn Fn(SessionStatusChangedPayload) + Send + Sync>;
