//! `stockdesk-client` — API gateway and typed backend services.
//!
//! Everything that talks HTTP lives here: the gateway ([`ApiClient`]) that
//! attaches bearer credentials and inspects every response uniformly, the
//! per-resource services mirroring the backend surface, the durable session
//! vault, and the confirmation-gated stock ledger.

pub mod config;
pub mod confirm;
pub mod envelope;
pub mod error;
pub mod http;
pub mod notify;
pub mod services;
pub mod stock;
pub mod vault;

pub use config::ApiConfig;
pub use confirm::{AlwaysConfirm, ConfirmAction, ConfirmPolicy};
pub use envelope::{Envelope, ErrorBody};
pub use error::ApiError;
pub use http::{ApiClient, SessionSignals};
pub use notify::{Notifier, TracingNotifier};
pub use services::articles::{ArticleDraft, ArticleService};
pub use services::auth::{AuthService, Credentials, RegisterRequest};
pub use services::categories::CategoryService;
pub use services::storages::{StorageDraft, StorageService};
pub use services::users::{ChangePasswordRequest, UserDraft, UserService};
pub use stock::{OperationOutcome, StockLedger};
pub use vault::{FileVault, MemoryVault, SessionVault, VaultError};
