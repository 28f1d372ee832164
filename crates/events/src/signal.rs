//! Session control signals.

use serde::{Deserialize, Serialize};

/// Cross-cutting session signal.
///
/// `ForcedLogout` is broadcast by the API gateway whenever any backend call
/// comes back 401/403; the session store reacts by clearing the session and
/// redirecting to the login entry point. Consumers must tolerate duplicates:
/// several in-flight requests can each observe a 401 after the token dies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionSignal {
    /// The backend rejected the current credentials.
    ForcedLogout {
        /// HTTP status that triggered the signal (401 or 403).
        status: u16,
    },
}
