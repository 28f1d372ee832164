//! Article endpoints, including the stock-movement calls.
//!
//! The movement endpoints carry their quantities as query parameters. Note
//! the removal path lives under `/api/storages` — a backend quirk the
//! original client honors, preserved here.

use serde::Serialize;
use uuid::Uuid;

use stockdesk_core::{ArticleId, CategoryId, StorageId};
use stockdesk_inventory::{Article, StorageArticle};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Create/update payload for an article.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    pub article_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub quantity: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
}

#[derive(Clone)]
pub struct ArticleService {
    api: ApiClient,
}

impl ArticleService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Article>, ApiError> {
        self.api.get("/api/articles").await?.into_data()
    }

    pub async fn create(&self, draft: &ArticleDraft) -> Result<Article, ApiError> {
        self.api.post_json("/api/articles", draft).await?.into_data()
    }

    pub async fn get_by_id(&self, id: ArticleId) -> Result<Article, ApiError> {
        self.api
            .get(&format!("/api/articles/{id}"))
            .await?
            .into_data()
    }

    pub async fn update(&self, id: ArticleId, draft: &ArticleDraft) -> Result<Article, ApiError> {
        self.api
            .put_json(&format!("/api/articles/{id}"), draft)
            .await?
            .into_data()
    }

    pub async fn delete(&self, id: ArticleId) -> Result<Option<String>, ApiError> {
        let envelope = self
            .api
            .delete::<serde_json::Value>(&format!("/api/articles/{id}"))
            .await?;
        Ok(envelope.message)
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<Article, ApiError> {
        self.api
            .get(&format!("/api/articles/uuid/{uuid}"))
            .await?
            .into_data()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Stock movements (quantity rides in the query string)
    // ─────────────────────────────────────────────────────────────────────

    /// Move `quantity` units from the article's free pool into the storage.
    pub async fn assign_to_storage(
        &self,
        storage_id: StorageId,
        article_id: ArticleId,
        quantity: i64,
    ) -> Result<Option<String>, ApiError> {
        let envelope = self
            .api
            .put_query::<serde_json::Value>(
                &format!("/api/articles/storage/{storage_id}/article/{article_id}"),
                &[("quantity", quantity.to_string())],
            )
            .await?;
        Ok(envelope.message)
    }

    /// Move `quantity` units from the storage back into the free pool.
    pub async fn remove_from_storage(
        &self,
        storage_id: StorageId,
        article_id: ArticleId,
        quantity: i64,
    ) -> Result<Option<String>, ApiError> {
        let envelope = self
            .api
            .delete_query::<serde_json::Value>(
                &format!("/api/storages/storage/{storage_id}/article/{article_id}"),
                &[("quantity", quantity.to_string())],
            )
            .await?;
        Ok(envelope.message)
    }

    /// Absolute set of the article's free quantity.
    pub async fn update_quantity(
        &self,
        id: ArticleId,
        new_quantity: i64,
    ) -> Result<Option<String>, ApiError> {
        let envelope = self
            .api
            .put_query::<serde_json::Value>(
                &format!("/api/articles/{id}/quantity"),
                &[("newQuantity", new_quantity.to_string())],
            )
            .await?;
        Ok(envelope.message)
    }

    pub async fn increment_quantity(
        &self,
        id: ArticleId,
        increment: i64,
    ) -> Result<Option<String>, ApiError> {
        let envelope = self
            .api
            .put_query::<serde_json::Value>(
                &format!("/api/articles/{id}/increment"),
                &[("increment", increment.to_string())],
            )
            .await?;
        Ok(envelope.message)
    }

    pub async fn decrement_quantity(
        &self,
        id: ArticleId,
        decrement: i64,
    ) -> Result<Option<String>, ApiError> {
        let envelope = self
            .api
            .put_query::<serde_json::Value>(
                &format!("/api/articles/{id}/decrement"),
                &[("decrement", decrement.to_string())],
            )
            .await?;
        Ok(envelope.message)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────

    /// Allocations currently held by a storage.
    pub async fn get_by_storage(
        &self,
        storage_id: StorageId,
    ) -> Result<Vec<StorageArticle>, ApiError> {
        self.api
            .get(&format!("/api/articles/storage/{storage_id}"))
            .await?
            .into_data()
    }

    pub async fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Article>, ApiError> {
        self.api
            .get(&format!("/api/articles/category/{category_id}"))
            .await?
            .into_data()
    }

    pub async fn search(
        &self,
        name: &str,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<Article>, ApiError> {
        let mut query = vec![("name", name.to_string())];
        if let Some(category_id) = category_id {
            query.push(("categoryId", category_id.to_string()));
        }
        self.api
            .get_query("/api/articles/search", &query)
            .await?
            .into_data()
    }

    pub async fn without_stock(&self) -> Result<Vec<Article>, ApiError> {
        self.api.get("/api/articles/no-stock").await?.into_data()
    }

    pub async fn low_stock(&self, threshold: i64) -> Result<Vec<Article>, ApiError> {
        self.api
            .get_query(
                "/api/articles/low-stock",
                &[("threshold", threshold.to_string())],
            )
            .await?
            .into_data()
    }

    /// Total free stock across all articles.
    pub async fn total_stock(&self) -> Result<i64, ApiError> {
        self.api.get("/api/articles/total/stock").await?.into_data()
    }

    pub async fn total_by_category(&self, category_id: CategoryId) -> Result<i64, ApiError> {
        self.api
            .get(&format!("/api/articles/total/category/{category_id}"))
            .await?
            .into_data()
    }
}
