//! Session lifecycle for the Newsdeck client.
//!
//! This crate provides:
//! - An explicit FSM for the session lifecycle (signed out, restoring,
//!   logging in, registering, signed in)
//! - [`SessionManager`]: the single owner of the process-wide session,
//!   covering silent rehydration on startup, login/register/update/logout,
//!   per-user preference access, and forced sign-out on credential rejection

mod error;
mod manager;
mod session_fsm;

pub use error::{SessionError, SessionResult};
pub use manager::SessionManager;
pub use session_fsm::{
    SessionMachine, SessionMachineInput, SessionMachineState, SessionStateCallback, SessionStatus,
    SessionStatusChangedPayload,
};
