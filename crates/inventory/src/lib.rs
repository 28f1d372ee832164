//! `stockdesk-inventory` — warehouse read models and stock-transfer rules.
//!
//! The models mirror the backend's wire shapes; the transfer module is the
//! deterministic arithmetic the ledger runs before dispatching a call (no
//! IO, no HTTP).

pub mod article;
pub mod category;
pub mod storage;
pub mod transfer;

pub use article::Article;
pub use category::Category;
pub use storage::{Storage, StorageArticle};
pub use transfer::{
    StockPosition, validate_assign, validate_decrement, validate_increment, validate_remove,
    validate_set, validate_transfer_quantity,
};
