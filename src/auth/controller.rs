//! Login/logout orchestration and session phase tracking.
//!
//! The controller owns the session store, the auth client, and the current
//! phase. Its observable outputs are side effects: the persisted token, the
//! in-memory identity, and a caller-supplied error callback. Callers watch
//! the phase to decide when to move to the protected view.

use tracing::{debug, error, info, warn};

use crate::api::{AuthClient, AuthError, Credentials};

use super::SessionStore;

/// Authentication phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    LoggedOut,
    LoggingIn,
    LoggedIn,
}

/// Identity of the logged-in user. Held in memory only - lost when the
/// process exits, re-established by the next successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub username: String,
}

pub struct SessionController {
    store: SessionStore,
    client: AuthClient,
    phase: AuthPhase,
    identity: Option<UserIdentity>,
}

impl SessionController {
    pub fn new(store: SessionStore, client: AuthClient) -> Self {
        Self {
            store,
            client,
            phase: AuthPhase::LoggedOut,
            identity: None,
        }
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn is_logged_in(&self) -> bool {
        self.phase == AuthPhase::LoggedIn
    }

    /// Submit credentials and settle the session.
    ///
    /// On success the token is persisted, the identity set, and the phase
    /// moves to `LoggedIn`. On any failure the phase returns to `LoggedOut`,
    /// nothing is persisted, and `on_error` fires exactly once with an error
    /// that distinguishes rejected credentials from connectivity problems.
    ///
    /// A call made while a login is already in flight is ignored, so a rapid
    /// double submit cannot issue two parallel credential requests.
    pub async fn login<F>(&mut self, username: &str, password: &str, on_error: F)
    where
        F: FnOnce(&AuthError),
    {
        if self.phase == AuthPhase::LoggingIn {
            debug!("Login already in flight, ignoring submit");
            return;
        }
        self.phase = AuthPhase::LoggingIn;

        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };

        match self.client.submit_credentials(&credentials).await {
            Ok(response) if response.is_success() => match response.token {
                Some(token) => {
                    if let Err(e) = self.store.set_token(Some(&token)) {
                        // The in-memory session still works; only restarts lose it
                        warn!(error = %e, "Failed to persist session token");
                    }
                    let username = response
                        .username
                        .unwrap_or_else(|| credentials.username.clone());
                    info!(username = %username, "Login successful");
                    self.identity = Some(UserIdentity { username });
                    self.phase = AuthPhase::LoggedIn;
                }
                None => {
                    error!("Auth endpoint reported success without a token");
                    self.phase = AuthPhase::LoggedOut;
                    on_error(&AuthError::InvalidResponse(
                        "success response carried no token".to_string(),
                    ));
                }
            },
            Ok(response) => {
                info!(status = response.status, "Credentials rejected");
                self.phase = AuthPhase::LoggedOut;
                on_error(&AuthError::InvalidCredentials);
            }
            Err(e) => {
                error!(error = %e, "Login request failed");
                self.phase = AuthPhase::LoggedOut;
                on_error(&e);
            }
        }
    }

    /// Log out, clearing the identity and the stored token.
    ///
    /// Idempotent: logging out while already logged out leaves the store
    /// empty and raises nothing. A store I/O failure is logged, not
    /// surfaced - there is no useful recovery for the caller.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.set_token(None) {
            warn!(error = %e, "Failed to clear persisted token");
        }
        self.identity = None;
        if self.phase != AuthPhase::LoggedOut {
            info!("Logged out");
        }
        self.phase = AuthPhase::LoggedOut;
    }

    /// Ask the server whether the stored token is still recognized.
    ///
    /// With no stored token this returns `false` immediately, without a
    /// network call. Any request failure also reads as invalid: the check
    /// can demote to the login view but never error. Advisory only - real
    /// authorization happens server-side on every request.
    pub async fn check_stored_token(&self) -> bool {
        let Some(token) = self.store.token() else {
            return false;
        };

        match self.client.validate_token(token).await {
            Ok(response) => response.is_valid(),
            Err(e) => {
                warn!(error = %e, "Token validation failed, treating token as invalid");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn unroutable_controller(dir: &tempfile::TempDir) -> SessionController {
        // Port 1 is never listening; any request would fail fast. The guard
        // under test must return before a request is even attempted.
        let config = Config {
            auth_url: "http://127.0.0.1:1/api/authenticate".to_string(),
            check_token_url: "http://127.0.0.1:1/api/check-token".to_string(),
            last_username: None,
        };
        let store = SessionStore::open(dir.path().to_path_buf()).unwrap();
        let client = AuthClient::new(&config).unwrap();
        SessionController::new(store, client)
    }

    #[tokio::test]
    async fn test_login_ignored_while_already_in_flight() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = unroutable_controller(&dir);
        controller.phase = AuthPhase::LoggingIn;

        let mut error_fired = false;
        controller
            .login("alice", "hunter2", |_| error_fired = true)
            .await;

        assert!(!error_fired);
        assert_eq!(controller.phase(), AuthPhase::LoggingIn);
        assert!(controller.store().token().is_none());
    }

    #[tokio::test]
    async fn test_logout_idempotent_from_fresh_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = unroutable_controller(&dir);

        controller.logout();
        controller.logout();

        assert_eq!(controller.phase(), AuthPhase::LoggedOut);
        assert!(controller.identity().is_none());
        assert!(controller.store().token().is_none());
    }
}
