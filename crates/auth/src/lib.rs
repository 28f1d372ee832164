//! `stockdesk-auth` — session identity and route authorization (pure).
//!
//! This crate is intentionally decoupled from HTTP and storage: it decodes
//! token payloads, checks expiry, and decides route access. Who holds the
//! token and where it lives is the session/transport layers' business.

pub mod account;
pub mod claims;
pub mod gate;
pub mod roles;

pub use account::UserAccount;
pub use claims::{Identity, TokenClaims, TokenError, decode_claims, validate_claims};
pub use gate::{Decision, RouteAccess, SessionView, decide};
pub use roles::Role;
