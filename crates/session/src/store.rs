//! The session store.
//!
//! Single-writer owner of the process-wide session: token, identity, and
//! phase live behind one mutex, and every mutation path (restore, login,
//! logout, forced logout) runs through here. The vault is written on the
//! same paths, so durable and in-memory state cannot drift.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{info, warn};

use stockdesk_auth::{Identity, SessionView, decode_claims};
use stockdesk_client::{
    ApiClient, ApiError, AuthService, ChangePasswordRequest, Credentials, Notifier, SessionVault,
    UserService,
};
use stockdesk_core::UserId;

use crate::listener::SignalListener;
use crate::navigator::Navigator;

/// Where a forced logout lands the user.
pub(crate) const LOGIN_ROUTE: &str = "/login";

const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";
const AUTH_FALLBACK_MESSAGE: &str = "Authentication failed";

/// Lifecycle phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Boot-time restoration has not finished yet.
    Restoring,
    Unauthenticated,
    Authenticated,
}

/// Result of an authentication-flow operation, returned rather than thrown
/// so form code can render it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl AuthOutcome {
    pub fn succeeded(message: Option<String>) -> Self {
        Self {
            success: true,
            message,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

struct SessionData {
    phase: SessionPhase,
    token: Option<String>,
    identity: Option<Identity>,
}

pub(crate) struct SessionShared {
    state: Mutex<SessionData>,
    vault: Arc<dyn SessionVault>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl SessionShared {
    fn lock_state(&self) -> MutexGuard<'_, SessionData> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn clear_vault(&self) {
        if let Err(err) = self.vault.clear() {
            warn!(?err, "failed to clear session vault");
        }
    }

    /// Shared logout path: clear memory and vault. Idempotent.
    pub(crate) fn logout(&self) {
        let mut state = self.lock_state();
        state.phase = SessionPhase::Unauthenticated;
        state.token = None;
        state.identity = None;
        drop(state);
        self.clear_vault();
    }

    /// Reaction to the forced-logout broadcast.
    pub(crate) fn force_logout(&self, status: u16) {
        info!(status, "forced logout");
        self.logout();
        self.notifier.error(SESSION_EXPIRED_MESSAGE);
        self.navigator.navigate(LOGIN_ROUTE);
    }
}

/// Owner of the session. See the crate docs for the single-writer rule.
pub struct SessionStore {
    shared: Arc<SessionShared>,
    auth: AuthService,
    users: UserService,
    api: ApiClient,
    listener: Mutex<Option<SignalListener>>,
}

impl SessionStore {
    pub fn new(api: ApiClient, navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>) -> Self {
        let shared = Arc::new(SessionShared {
            state: Mutex::new(SessionData {
                phase: SessionPhase::Restoring,
                token: None,
                identity: None,
            }),
            vault: api.vault(),
            notifier,
            navigator,
        });
        Self {
            shared,
            auth: AuthService::new(api.clone()),
            users: UserService::new(api.clone()),
            api,
            listener: Mutex::new(None),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Read access
    // ─────────────────────────────────────────────────────────────────────

    pub fn phase(&self) -> SessionPhase {
        self.shared.lock_state().phase
    }

    /// Authenticated means "a token is present"; expiry is only re-checked
    /// at restore time and reactively via 401/403.
    pub fn is_authenticated(&self) -> bool {
        self.shared.lock_state().token.is_some()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.shared.lock_state().identity.clone()
    }

    /// Read-only snapshot for the authorization gate.
    pub fn view(&self) -> SessionView {
        let state = self.shared.lock_state();
        SessionView {
            authenticated: state.token.is_some(),
            identity: state.identity.clone(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Restore a persisted session at startup.
    ///
    /// Leaves `Restoring` exactly once; calling again is a no-op. An
    /// expired or undecodable token clears the vault silently — the user
    /// simply boots logged out.
    pub fn restore(&self) -> SessionPhase {
        {
            let state = self.shared.lock_state();
            if state.phase != SessionPhase::Restoring {
                return state.phase;
            }
        }

        let token = match self.shared.vault.token() {
            Ok(token) => token,
            Err(err) => {
                warn!(?err, "failed to read persisted token");
                None
            }
        };

        let Some(token) = token else {
            return self.finish_restore(None, None);
        };

        let claims = match decode_claims(&token) {
            Ok(claims) => claims,
            Err(err) => {
                info!(%err, "persisted token unusable; clearing session");
                self.shared.clear_vault();
                return self.finish_restore(None, None);
            }
        };

        if claims.is_expired(Utc::now()) {
            info!("persisted token expired; clearing session");
            self.shared.clear_vault();
            return self.finish_restore(None, None);
        }

        // Prefer the persisted snapshot; fall back to the token's claims.
        let identity = match self.shared.vault.identity() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => claims.identity(),
            Err(err) => {
                warn!(?err, "persisted identity unreadable; decoding from token");
                claims.identity()
            }
        };

        self.finish_restore(Some(token), Some(identity))
    }

    fn finish_restore(&self, token: Option<String>, identity: Option<Identity>) -> SessionPhase {
        let mut state = self.shared.lock_state();
        state.phase = if token.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Unauthenticated
        };
        state.token = token;
        state.identity = identity;
        state.phase
    }

    /// Exchange credentials for a session. No retry; the failure message is
    /// the backend's when it sent one.
    pub async fn login(&self, credentials: &Credentials) -> AuthOutcome {
        let token = match self.auth.login(credentials).await {
            Ok(token) => token,
            Err(err) => return AuthOutcome::failed(login_failure_message(&err)),
        };

        let claims = match decode_claims(&token) {
            Ok(claims) => claims,
            Err(err) => {
                warn!(%err, "login returned an undecodable token");
                return AuthOutcome::failed(AUTH_FALLBACK_MESSAGE);
            }
        };

        let identity = claims.identity();
        if let Err(err) = self.shared.vault.store(&token, &identity) {
            // The in-memory session still works; it just won't survive a
            // restart.
            warn!(?err, "failed to persist session");
        }

        let mut state = self.shared.lock_state();
        state.phase = SessionPhase::Authenticated;
        state.token = Some(token);
        state.identity = Some(identity);
        drop(state);

        info!("login succeeded");
        AuthOutcome::succeeded(None)
    }

    /// Clear the session. Safe to call when already logged out.
    pub fn logout(&self) {
        self.shared.logout();
    }

    /// Request a password-reset mail. Does not touch session state.
    pub async fn forgot_password(&self, email: &str) -> AuthOutcome {
        match self.auth.forgot_password(email).await {
            Ok(message) => AuthOutcome::succeeded(message),
            Err(err) => AuthOutcome::failed(err.user_message()),
        }
    }

    /// Rotate a password. Does not touch session state — the caller forces
    /// a fresh login afterwards, since the issued token dies with the old
    /// password.
    pub async fn change_password(
        &self,
        user_id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> AuthOutcome {
        let request = ChangePasswordRequest {
            user_id,
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        };
        match self.users.change_password(&request).await {
            Ok(message) => AuthOutcome::succeeded(message),
            Err(err) => AuthOutcome::failed(err.user_message()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Forced-logout subscription
    // ─────────────────────────────────────────────────────────────────────

    /// Subscribe to the gateway's forced-logout broadcast.
    ///
    /// Established at most once per store; later calls are ignored. The
    /// listener runs until [`SessionStore::stop_signal_listener`] or drop.
    pub fn start_signal_listener(&self) {
        let mut slot = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            warn!("signal listener already running; ignoring duplicate start");
            return;
        }
        *slot = Some(SignalListener::spawn(
            self.api.signals(),
            Arc::clone(&self.shared),
        ));
    }

    /// Tear the subscription down (also happens on drop).
    pub fn stop_signal_listener(&self) {
        let listener = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(listener) = listener {
            listener.stop();
        }
    }
}

impl Drop for SessionStore {
    fn drop(&mut self) {
        self.stop_signal_listener();
    }
}

fn login_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Authorization {
            message: Some(message),
            ..
        } => message.clone(),
        ApiError::Backend { message, .. } => message.clone(),
        _ => AUTH_FALLBACK_MESSAGE.to_string(),
    }
}
