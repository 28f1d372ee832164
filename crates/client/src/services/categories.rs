//! Category endpoints.
//!
//! The backend takes category payloads as query parameters rather than
//! JSON bodies; the service keeps that quirk out of callers' sight.

use uuid::Uuid;

use stockdesk_core::CategoryId;
use stockdesk_inventory::Category;

use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Clone)]
pub struct CategoryService {
    api: ApiClient,
}

impl CategoryService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Category>, ApiError> {
        self.api.get("/api/categories").await?.into_data()
    }

    pub async fn create(&self, category: &str) -> Result<Category, ApiError> {
        self.api
            .post_query("/api/categories", &[("category", category.to_string())])
            .await?
            .into_data()
    }

    pub async fn get_by_id(&self, id: CategoryId) -> Result<Category, ApiError> {
        self.api
            .get(&format!("/api/categories/{id}"))
            .await?
            .into_data()
    }

    pub async fn update(&self, id: CategoryId, details: &str) -> Result<Category, ApiError> {
        self.api
            .put_query(
                &format!("/api/categories/{id}"),
                &[("categoryDetails", details.to_string())],
            )
            .await?
            .into_data()
    }

    pub async fn delete(&self, id: CategoryId) -> Result<Option<String>, ApiError> {
        let envelope = self
            .api
            .delete::<serde_json::Value>(&format!("/api/categories/{id}"))
            .await?;
        Ok(envelope.message)
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<Category, ApiError> {
        self.api
            .get(&format!("/api/categories/uuid/{uuid}"))
            .await?
            .into_data()
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Category, ApiError> {
        self.api
            .get(&format!("/api/categories/name/{name}"))
            .await?
            .into_data()
    }

    /// Categories that have at least one storage attached.
    pub async fn with_storages(&self) -> Result<Vec<Category>, ApiError> {
        self.api
            .get("/api/categories/with-storages")
            .await?
            .into_data()
    }

    /// Categories that have at least one article attached.
    pub async fn with_articles(&self) -> Result<Vec<Category>, ApiError> {
        self.api
            .get("/api/categories/with-articles")
            .await?
            .into_data()
    }
}
