//! Session management with FSM-based state tracking.
//!
//! `SessionManager` owns the process-wide session: the current user snapshot
//! and the lifecycle FSM. Session data (token + snapshot) lives in the
//! credential store; the FSM tracks transient states that are never
//! persisted.

use crate::error::{SessionError, SessionResult};
use crate::session_fsm::{
    SessionMachine, SessionMachineInput, SessionStateCallback, SessionStatus,
    SessionStatusChangedPayload,
};
use client_storage::{CredentialStore, PreferenceStore};
use news_api::{ApiClient, ApiError, AuthApi};
use news_types::{ChangePasswordRequest, PreferenceSet, RegisterRequest, UserRecord, UserUpdate};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Owner of the process-wide session.
///
/// All session mutation goes through these operations; consumers read
/// `status()` and `current_user()` and may register a state callback for
/// push notification of changes.
pub struct SessionManager {
    credentials: CredentialStore,
    preferences: PreferenceStore,
    api: Arc<dyn AuthApi>,
    /// Internal FSM tracking the session lifecycle.
    fsm: Mutex<SessionMachine>,
    /// Current user snapshot; present exactly when the FSM is SignedIn.
    current_user: Mutex<Option<UserRecord>>,
    /// Optional callback for status change notifications.
    state_callback: Mutex<Option<SessionStateCallback>>,
}

impl SessionManager {
    /// Create a new session manager.
    pub fn new(
        credentials: CredentialStore,
        preferences: PreferenceStore,
        api: Arc<dyn AuthApi>,
    ) -> Arc<Self> {
        Arc::new(Self {
            credentials,
            preferences,
            api,
            fsm: Mutex::new(SessionMachine::new()),
            current_user: Mutex::new(None),
            state_callback: Mutex::new(None),
        })
    }

    /// Install the forced-logout hook on the API client.
    ///
    /// After this, an authentication-rejected response from any endpoint
    /// clears the credential store and resets the session before the error
    /// propagates, so a single 401 anywhere cannot leave a stale
    /// authenticated view.
    pub fn attach_forced_logout(self: &Arc<Self>, client: &ApiClient) {
        let weak = Arc::downgrade(self);
        client.set_auth_rejected_hook(Box::new(move || {
            if let Some(manager) = weak.upgrade() {
                manager.force_sign_out();
            }
        }));
    }

    /// Set a callback to be notified of session status changes.
    pub fn set_state_callback(&self, callback: SessionStateCallback) {
        let mut cb = self.state_callback.lock().unwrap();
        *cb = Some(callback);
    }

    /// Get the current session status.
    pub fn status(&self) -> SessionStatus {
        let fsm = self.fsm.lock().unwrap();
        SessionStatus::from(fsm.state())
    }

    /// Get the current user snapshot, if signed in.
    pub fn current_user(&self) -> Option<UserRecord> {
        self.current_user.lock().unwrap().clone()
    }

    /// Transition the FSM and notify the callback if the status changed.
    fn transition(&self, input: &SessionMachineInput) -> SessionResult<SessionStatus> {
        let mut fsm = self.fsm.lock().unwrap();
        let old_status = SessionStatus::from(fsm.state());

        fsm.consume(input).map_err(|_| {
            SessionError::InvalidStateTransition(format!(
                "Cannot apply {:?} in state {:?}",
                input,
                fsm.state()
            ))
        })?;

        let new_status = SessionStatus::from(fsm.state());
        drop(fsm);

        if old_status != new_status {
            debug!(?old_status, ?new_status, "Session status transition");
            self.notify_state_change(&new_status);
        }

        Ok(new_status)
    }

    /// Notify the callback of a status change.
    fn notify_state_change(&self, status: &SessionStatus) {
        let cb = self.state_callback.lock().unwrap();
        if let Some(callback) = cb.as_ref() {
            let username = self
                .current_user
                .lock()
                .unwrap()
                .as_ref()
                .map(|u| u.username.clone());

            callback(SessionStatusChangedPayload {
                status: status.clone(),
                username,
            });
        }
    }

    /// Rehydrate the session from the credential store on startup.
    ///
    /// Must be awaited to completion before any request that depends on the
    /// active preference set; callers observe `Authenticating` meanwhile.
    ///
    /// Returns:
    /// - `Ok(true)` if a stored credential was verified and the session is
    ///   authenticated
    /// - `Ok(false)` if no credential is stored
    /// - `Err(...)` if verification failed; the credential store has been
    ///   cleared and the session is unauthenticated
    pub async fn initialize(&self) -> SessionResult<bool> {
        self.transition(&SessionMachineInput::RestoreAttempt)?;

        let token = match self.credentials.token()? {
            Some(token) => token,
            None => {
                info!("No stored credential found on startup");
                self.transition(&SessionMachineInput::NoCredential)?;
                return Ok(false);
            }
        };

        // The stored snapshot may be stale or missing; the remote record is
        // authoritative either way.
        self.api.set_bearer_token(Some(token.clone()));

        match self.api.me().await {
            Ok(user) => {
                // Re-persist so a missing or stale local snapshot heals itself.
                self.credentials.store(&token, &user)?;
                info!(username = %user.username, "Session restored from stored credential");
                *self.current_user.lock().unwrap() = Some(user);
                self.transition(&SessionMachineInput::RestoreSuccess)?;
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "Stored credential rejected, clearing");
                if let Err(storage_err) = self.credentials.clear() {
                    warn!(error = %storage_err, "Failed to clear credential store");
                }
                self.api.set_bearer_token(None);
                self.transition(&SessionMachineInput::RestoreFailed)?;
                Err(e.into())
            }
        }
    }

    /// Login with username and password.
    ///
    /// On success the token and user snapshot are persisted in one durable
    /// write. On failure the session stays unauthenticated and the error is
    /// surfaced to the caller.
    pub async fn login(&self, username: &str, password: &str) -> SessionResult<UserRecord> {
        self.transition(&SessionMachineInput::LoginAttempt)?;

        match self.api.login(username, password).await {
            Ok(response) => {
                self.credentials
                    .store(&response.access_token, &response.user)?;
                self.api
                    .set_bearer_token(Some(response.access_token.clone()));
                info!(username = %response.user.username, "Login successful");
                *self.current_user.lock().unwrap() = Some(response.user.clone());
                self.transition(&SessionMachineInput::LoginSuccess)?;
                Ok(response.user)
            }
            Err(e) => {
                warn!(username, error = %e, "Login failed");
                self.transition(&SessionMachineInput::LoginFailed)?;
                Err(e.into())
            }
        }
    }

    /// Register a new account.
    ///
    /// Field validation happens client-side before any remote call. The
    /// register endpoint returns a user but no token, so registration does
    /// NOT authenticate: the session returns to unauthenticated and an
    /// explicit `login` is required.
    pub async fn register(&self, request: RegisterRequest) -> SessionResult<UserRecord> {
        validate_registration(&request)?;

        self.transition(&SessionMachineInput::RegisterAttempt)?;

        match self.api.register(&request).await {
            Ok(user) => {
                info!(username = %user.username, "Registration successful, login required");
                self.transition(&SessionMachineInput::RegisterFinished)?;
                Ok(user)
            }
            Err(e) => {
                warn!(username = %request.username, error = %e, "Registration failed");
                self.transition(&SessionMachineInput::RegisterFailed)?;
                Err(e.into())
            }
        }
    }

    /// Update the current user's account fields.
    ///
    /// The server's response replaces the stored snapshot wholesale; partial
    /// fields are never merged client-side, so server-derived fields cannot
    /// drift.
    pub async fn update_user(&self, update: UserUpdate) -> SessionResult<UserRecord> {
        if !self.status().is_authenticated() {
            return Err(SessionError::NotSignedIn);
        }

        match self.api.update_user(&update).await {
            Ok(user) => {
                self.credentials.store_user(&user)?;
                *self.current_user.lock().unwrap() = Some(user.clone());
                info!(username = %user.username, "Account updated");
                Ok(user)
            }
            Err(e) => {
                if matches!(e, ApiError::AuthRejected(_)) {
                    self.force_sign_out();
                }
                Err(e.into())
            }
        }
    }

    /// Change the current user's password.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
        confirm_new_password: &str,
    ) -> SessionResult<String> {
        if new_password.is_empty() {
            return Err(SessionError::validation("New password must not be empty"));
        }
        if new_password != confirm_new_password {
            return Err(SessionError::validation("Passwords do not match"));
        }
        if !self.status().is_authenticated() {
            return Err(SessionError::NotSignedIn);
        }

        let request = ChangePasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
            confirm_new_password: confirm_new_password.to_string(),
        };

        match self.api.change_password(&request).await {
            Ok(message) => Ok(message),
            Err(e) => {
                if matches!(e, ApiError::AuthRejected(_)) {
                    self.force_sign_out();
                }
                Err(e.into())
            }
        }
    }

    /// Sign out: clear the credential store and reset the session.
    ///
    /// Unconditional and infallible; storage failures are logged, never
    /// surfaced.
    pub fn logout(&self) {
        let _ = self.transition(&SessionMachineInput::LogoutRequested);

        if let Err(e) = self.credentials.clear() {
            warn!(error = %e, "Failed to clear credential store on logout");
        }
        self.api.set_bearer_token(None);
        *self.current_user.lock().unwrap() = None;

        info!("Signed out");
    }

    /// Forced sign-out after an authentication-rejected response.
    ///
    /// Same side effect as `logout()`; idempotent, so it is safe for both
    /// the transport hook and session operations to funnel here.
    pub fn force_sign_out(&self) {
        let _ = self.transition(&SessionMachineInput::CredentialRejected);

        if let Err(e) = self.credentials.clear() {
            warn!(error = %e, "Failed to clear credential store after rejection");
        }
        self.api.set_bearer_token(None);
        *self.current_user.lock().unwrap() = None;

        info!("Session invalidated after credential rejection");
    }

    /// Get the active preference set: the current user's stored preferences,
    /// or the empty set ("no filter") when unauthenticated.
    pub fn active_preferences(&self) -> SessionResult<PreferenceSet> {
        let username = self
            .current_user
            .lock()
            .unwrap()
            .as_ref()
            .map(|u| u.username.clone());

        match username {
            Some(username) => Ok(self.preferences.get(&username)?),
            None => Ok(PreferenceSet::new()),
        }
    }

    /// Overwrite the current user's preference set.
    pub fn set_preferences(&self, preferences: &PreferenceSet) -> SessionResult<()> {
        let username = self
            .current_user
            .lock()
            .unwrap()
            .as_ref()
            .map(|u| u.username.clone())
            .ok_or(SessionError::NotSignedIn)?;

        self.preferences.set(&username, preferences)?;
        Ok(())
    }
}

/// Client-side registration checks, run before any remote call.
fn validate_registration(request: &RegisterRequest) -> SessionResult<()> {
    if request.username.trim().is_empty() {
        return Err(SessionError::validation("Username must not be empty"));
    }
    if !is_well_formed_email(&request.email) {
        return Err(SessionError::validation("Invalid email address"));
    }
    if request.password.is_empty() {
        return Err(SessionError::validation("Password must not be empty"));
    }
    if request.password != request.confirm_password {
        return Err(SessionError::validation("Passwords do not match"));
    }
    Ok(())
}

/// Minimal well-formedness check for an email address.
fn is_well_formed_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
