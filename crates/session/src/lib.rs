//! `stockdesk-session` — the session owner.
//!
//! One store holds the token and identity, restores them at startup,
//! updates them on login/logout, and reacts to the forced-logout broadcast.
//! Everything else in the process reads session state through
//! [`stockdesk_auth::SessionView`] snapshots; nothing else writes it.

pub mod listener;
pub mod navigator;
pub mod store;

pub use listener::SignalListener;
pub use navigator::{Navigator, NoopNavigator};
pub use store::{AuthOutcome, SessionPhase, SessionStore};
