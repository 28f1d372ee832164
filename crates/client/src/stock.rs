//! Stock ledger operations.
//!
//! Quantity transfers between an article's free pool and storage
//! allocations. Each operation runs its local preconditions against the
//! displayed read model, asks for confirmation, dispatches exactly one
//! backend call, then re-fetches authoritative state. There is no
//! optimistic mutation: a failed call leaves the displayed state untouched,
//! and the refresh is a full idempotent re-fetch so interleaved responses
//! still converge.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use stockdesk_core::{ArticleId, StorageId};
use stockdesk_inventory::{
    Article, StorageArticle, validate_assign, validate_decrement, validate_increment,
    validate_remove, validate_set, validate_transfer_quantity,
};

use crate::confirm::{ConfirmAction, ConfirmPolicy};
use crate::error::ApiError;
use crate::notify::Notifier;
use crate::services::articles::ArticleService;

/// Result of one ledger operation, returned rather than thrown so UI code
/// can render it without error-handling chains.
#[derive(Debug)]
pub enum OperationOutcome {
    /// The backend confirmed the mutation and the read model was refreshed.
    Completed { message: Option<String> },

    /// The user declined the confirmation prompt; nothing was dispatched.
    Cancelled,

    /// A local precondition or the backend rejected the operation.
    Failed(ApiError),
}

impl OperationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, OperationOutcome::Completed { .. })
    }

    /// Message suitable for display, if the outcome produced one.
    pub fn user_message(&self) -> Option<String> {
        match self {
            OperationOutcome::Completed { message } => message.clone(),
            OperationOutcome::Cancelled => None,
            OperationOutcome::Failed(err) => Some(err.user_message()),
        }
    }
}

#[derive(Default)]
struct ReadModel {
    articles: Vec<Article>,
    allocations: HashMap<StorageId, Vec<StorageArticle>>,
}

/// Confirmation-gated quantity transfers over the article service.
pub struct StockLedger {
    articles: ArticleService,
    confirm: Arc<dyn ConfirmPolicy>,
    notifier: Arc<dyn Notifier>,
    read_model: RwLock<ReadModel>,
}

impl StockLedger {
    pub fn new(
        articles: ArticleService,
        confirm: Arc<dyn ConfirmPolicy>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            articles,
            confirm,
            notifier,
            read_model: RwLock::new(ReadModel::default()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Read model
    // ─────────────────────────────────────────────────────────────────────

    /// Re-fetch the article list (full replacement, idempotent).
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let articles = self.articles.get_all().await?;
        if let Ok(mut model) = self.read_model.write() {
            model.articles = articles;
        }
        Ok(())
    }

    /// Re-fetch the allocations of one storage.
    pub async fn refresh_storage(&self, storage_id: StorageId) -> Result<(), ApiError> {
        let allocations = self.articles.get_by_storage(storage_id).await?;
        if let Ok(mut model) = self.read_model.write() {
            model.allocations.insert(storage_id, allocations);
        }
        Ok(())
    }

    /// Snapshot of the displayed article list.
    pub fn articles(&self) -> Vec<Article> {
        self.read_model
            .read()
            .map(|model| model.articles.clone())
            .unwrap_or_default()
    }

    /// Displayed free quantity of an article, when locally known.
    pub fn free_quantity(&self, article_id: ArticleId) -> Option<i64> {
        self.read_model.read().ok().and_then(|model| {
            model
                .articles
                .iter()
                .find(|a| a.id == article_id)
                .map(|a| a.quantity)
        })
    }

    /// Displayed allocation of an article in a storage, when locally known.
    pub fn allocated_quantity(&self, storage_id: StorageId, article_id: ArticleId) -> Option<i64> {
        self.read_model.read().ok().and_then(|model| {
            model.allocations.get(&storage_id).and_then(|entries| {
                entries
                    .iter()
                    .find(|entry| entry.article.id == article_id)
                    .map(|entry| entry.quantity)
            })
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────

    /// Move `quantity` units of an article into a storage's allocation.
    pub async fn assign_to_storage(
        &self,
        storage_id: StorageId,
        article_id: ArticleId,
        quantity: i64,
    ) -> OperationOutcome {
        // The check runs against the quantity currently displayed; the
        // server revalidates against live state either way. An article the
        // read model has not seen only gets the sign check.
        let precondition = match self.free_quantity(article_id) {
            Some(free) => validate_assign(free, quantity),
            None => validate_transfer_quantity(quantity),
        };
        if let Err(err) = precondition {
            return OperationOutcome::Failed(err.into());
        }

        let action = ConfirmAction {
            title: "Assign article to storage?",
            detail: format!("Move {quantity} units into storage {storage_id}"),
        };
        if !self.confirm.confirm(&action) {
            return OperationOutcome::Cancelled;
        }

        match self
            .articles
            .assign_to_storage(storage_id, article_id, quantity)
            .await
        {
            Ok(message) => {
                self.finish_movement(Some(storage_id), "Article assigned to storage", message)
                    .await
            }
            Err(err) => OperationOutcome::Failed(err),
        }
    }

    /// Move `quantity` units of an article back out of a storage.
    pub async fn remove_from_storage(
        &self,
        storage_id: StorageId,
        article_id: ArticleId,
        quantity: i64,
    ) -> OperationOutcome {
        // An allocation the read model has not seen cannot be locally
        // disproven; dispatch and let the server decide.
        let precondition = match self.allocated_quantity(storage_id, article_id) {
            Some(allocated) => validate_remove(allocated, quantity),
            None => validate_transfer_quantity(quantity),
        };
        if let Err(err) = precondition {
            return OperationOutcome::Failed(err.into());
        }

        let action = ConfirmAction {
            title: "Remove article from storage?",
            detail: format!("Return {quantity} units from storage {storage_id} to free stock"),
        };
        if !self.confirm.confirm(&action) {
            return OperationOutcome::Cancelled;
        }

        match self
            .articles
            .remove_from_storage(storage_id, article_id, quantity)
            .await
        {
            Ok(message) => {
                self.finish_movement(Some(storage_id), "Article removed from storage", message)
                    .await
            }
            Err(err) => OperationOutcome::Failed(err),
        }
    }

    /// Absolute set of an article's free quantity.
    pub async fn update_quantity(&self, article_id: ArticleId, new_quantity: i64) -> OperationOutcome {
        if let Err(err) = validate_set(new_quantity) {
            return OperationOutcome::Failed(err.into());
        }

        let action = ConfirmAction {
            title: "Update quantity?",
            detail: format!("Set free quantity to {new_quantity}"),
        };
        if !self.confirm.confirm(&action) {
            return OperationOutcome::Cancelled;
        }

        match self.articles.update_quantity(article_id, new_quantity).await {
            Ok(message) => self.finish_movement(None, "Quantity updated", message).await,
            Err(err) => OperationOutcome::Failed(err),
        }
    }

    /// Increase an article's free quantity by a positive delta.
    pub async fn increment_quantity(&self, article_id: ArticleId, delta: i64) -> OperationOutcome {
        if let Err(err) = validate_increment(delta) {
            return OperationOutcome::Failed(err.into());
        }

        let action = ConfirmAction {
            title: "Increase quantity?",
            detail: format!("Add {delta} units to free stock"),
        };
        if !self.confirm.confirm(&action) {
            return OperationOutcome::Cancelled;
        }

        match self.articles.increment_quantity(article_id, delta).await {
            Ok(message) => self.finish_movement(None, "Quantity updated", message).await,
            Err(err) => OperationOutcome::Failed(err),
        }
    }

    /// Decrease an article's free quantity by a positive delta; must not
    /// drive the displayed quantity below zero.
    pub async fn decrement_quantity(&self, article_id: ArticleId, delta: i64) -> OperationOutcome {
        let precondition = match self.free_quantity(article_id) {
            Some(free) => validate_decrement(free, delta),
            None => validate_increment(delta),
        };
        if let Err(err) = precondition {
            return OperationOutcome::Failed(err.into());
        }

        let action = ConfirmAction {
            title: "Decrease quantity?",
            detail: format!("Remove {delta} units from free stock"),
        };
        if !self.confirm.confirm(&action) {
            return OperationOutcome::Cancelled;
        }

        match self.articles.decrement_quantity(article_id, delta).await {
            Ok(message) => self.finish_movement(None, "Quantity updated", message).await,
            Err(err) => OperationOutcome::Failed(err),
        }
    }

    /// Shared success tail: refresh, then announce.
    async fn finish_movement(
        &self,
        storage_id: Option<StorageId>,
        announcement: &str,
        message: Option<String>,
    ) -> OperationOutcome {
        if let Err(err) = self.refresh().await {
            return OperationOutcome::Failed(err);
        }
        if let Some(storage_id) = storage_id {
            // Only storages already on display are kept fresh.
            let tracked = self
                .read_model
                .read()
                .map(|model| model.allocations.contains_key(&storage_id))
                .unwrap_or(false);
            if tracked {
                if let Err(err) = self.refresh_storage(storage_id).await {
                    return OperationOutcome::Failed(err);
                }
            }
        }

        debug!(announcement, "stock movement completed");
        self.notifier.success(announcement);
        OperationOutcome::Completed { message }
    }
}
