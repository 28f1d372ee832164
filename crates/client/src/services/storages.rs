//! Storage (warehouse) endpoints.

use serde::Serialize;
use uuid::Uuid;

use stockdesk_core::{CategoryId, StorageId, UserId};
use stockdesk_inventory::Storage;

use crate::error::ApiError;
use crate::http::ApiClient;

/// Create/update payload for a storage.
///
/// The responsible account travels by its public uuid, matching the
/// backend's contract.
#[derive(Debug, Clone, Serialize)]
pub struct StorageDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<StorageId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuidresponsible: Option<Uuid>,
}

#[derive(Clone)]
pub struct StorageService {
    api: ApiClient,
}

impl StorageService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Storage>, ApiError> {
        self.api.get("/api/storages").await?.into_data()
    }

    pub async fn create(&self, draft: &StorageDraft) -> Result<Storage, ApiError> {
        self.api.post_json("/api/storages", draft).await?.into_data()
    }

    pub async fn get_by_id(&self, id: StorageId) -> Result<Storage, ApiError> {
        self.api
            .get(&format!("/api/storages/{id}"))
            .await?
            .into_data()
    }

    pub async fn update(&self, id: StorageId, draft: &StorageDraft) -> Result<Storage, ApiError> {
        self.api
            .put_json(&format!("/api/storages/{id}"), draft)
            .await?
            .into_data()
    }

    pub async fn delete(&self, id: StorageId) -> Result<Option<String>, ApiError> {
        let envelope = self
            .api
            .delete::<serde_json::Value>(&format!("/api/storages/{id}"))
            .await?;
        Ok(envelope.message)
    }

    /// Flip the storage between active and inactive.
    pub async fn toggle_status(&self, id: StorageId) -> Result<Option<String>, ApiError> {
        let envelope = self
            .api
            .put::<serde_json::Value>(&format!("/api/storages/{id}/toggle-status"))
            .await?;
        Ok(envelope.message)
    }

    /// Put `user_id` in charge of `storage_id`.
    pub async fn assign_responsible(
        &self,
        storage_id: StorageId,
        user_id: UserId,
    ) -> Result<Option<String>, ApiError> {
        let envelope = self
            .api
            .put::<serde_json::Value>(&format!(
                "/api/storages/{storage_id}/responsible/{user_id}"
            ))
            .await?;
        Ok(envelope.message)
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<Storage, ApiError> {
        self.api
            .get(&format!("/api/storages/uuid/{uuid}"))
            .await?
            .into_data()
    }

    pub async fn get_by_responsible(&self, user_id: UserId) -> Result<Vec<Storage>, ApiError> {
        self.api
            .get(&format!("/api/storages/responsible/{user_id}"))
            .await?
            .into_data()
    }

    pub async fn get_by_identifier(&self, identifier: &str) -> Result<Storage, ApiError> {
        self.api
            .get(&format!("/api/storages/identifier/{identifier}"))
            .await?
            .into_data()
    }

    pub async fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Storage>, ApiError> {
        self.api
            .get(&format!("/api/storages/category/{category_id}"))
            .await?
            .into_data()
    }

    /// Storages nobody is responsible for yet.
    pub async fn without_responsible(&self) -> Result<Vec<Storage>, ApiError> {
        self.api
            .get("/api/storages/without-responsible")
            .await?
            .into_data()
    }

    pub async fn get_active(&self) -> Result<Vec<Storage>, ApiError> {
        self.api.get("/api/storages/active").await?.into_data()
    }
}
