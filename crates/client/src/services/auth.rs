//! Authentication endpoints.

use serde::Serialize;

use stockdesk_auth::{Role, UserAccount};

use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        self.api
            .post_json::<String, _>("/api/auth", credentials)
            .await?
            .into_data()
    }

    /// Register a new account.
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserAccount, ApiError> {
        self.api
            .post_json::<UserAccount, _>("/api/auth/register", request)
            .await?
            .into_data()
    }

    /// Ask the backend to mail a password-reset to `email`.
    pub async fn forgot_password(&self, email: &str) -> Result<Option<String>, ApiError> {
        let envelope = self
            .api
            .get_query::<serde_json::Value>(
                "/api/auth/forgotPassword",
                &[("email", email.to_string())],
            )
            .await?;
        Ok(envelope.message)
    }
}
