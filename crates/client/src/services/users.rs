//! User administration endpoints.

use serde::Serialize;
use uuid::Uuid;

use stockdesk_auth::UserAccount;
use stockdesk_core::UserId;

use crate::error::ApiError;
use crate::http::ApiClient;

/// Create/update payload for a user account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub user_id: UserId,
    pub current_password: String,
    pub new_password: String,
}

#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<UserAccount>, ApiError> {
        self.api.get("/api/users").await?.into_data()
    }

    pub async fn create(&self, draft: &UserDraft) -> Result<UserAccount, ApiError> {
        self.api.post_json("/api/users", draft).await?.into_data()
    }

    pub async fn get_by_id(&self, id: UserId) -> Result<UserAccount, ApiError> {
        self.api.get(&format!("/api/users/{id}")).await?.into_data()
    }

    pub async fn update(&self, id: UserId, draft: &UserDraft) -> Result<UserAccount, ApiError> {
        self.api
            .put_json(&format!("/api/users/{id}"), draft)
            .await?
            .into_data()
    }

    pub async fn delete(&self, id: UserId) -> Result<Option<String>, ApiError> {
        let envelope = self
            .api
            .delete::<serde_json::Value>(&format!("/api/users/{id}"))
            .await?;
        Ok(envelope.message)
    }

    /// Flip the account between active and inactive.
    pub async fn toggle_status(&self, id: UserId) -> Result<Option<String>, ApiError> {
        let envelope = self
            .api
            .put::<serde_json::Value>(&format!("/api/users/{id}/toggle-status"))
            .await?;
        Ok(envelope.message)
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<UserAccount, ApiError> {
        self.api
            .get(&format!("/api/users/uuid/{uuid}"))
            .await?
            .into_data()
    }

    pub async fn get_by_username(&self, username: &str) -> Result<UserAccount, ApiError> {
        self.api
            .get(&format!("/api/users/username/{username}"))
            .await?
            .into_data()
    }

    pub async fn get_by_role(&self) -> Result<Vec<UserAccount>, ApiError> {
        self.api.get("/api/users/role").await?.into_data()
    }

    /// Accounts eligible to take responsibility for a storage.
    pub async fn available_managers(&self) -> Result<Vec<UserAccount>, ApiError> {
        self.api
            .get("/api/users/available-managers")
            .await?
            .into_data()
    }

    pub async fn get_active(&self) -> Result<Vec<UserAccount>, ApiError> {
        self.api.get("/api/users/active").await?.into_data()
    }

    /// Rotate a password. The issued token dies with the old password, so
    /// callers are expected to force a fresh login afterwards.
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<Option<String>, ApiError> {
        let envelope = self
            .api
            .put_json::<serde_json::Value, _>("/api/users/change-password", request)
            .await?;
        Ok(envelope.message)
    }
}
