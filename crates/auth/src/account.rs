//! User account directory model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockdesk_core::UserId;

use crate::Role;

/// A managed user account as returned by the user endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: UserId,

    /// Public identifier used by the `/uuid/{uuid}` lookups.
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub username: String,
    pub email: String,
    pub role: Role,

    /// Inactive accounts cannot log in; toggled via the status endpoint.
    #[serde(default)]
    pub active: bool,

    /// Set while the account's password is system-issued.
    #[serde(default)]
    pub temporal_password: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_wire_shape() {
        let body = serde_json::json!({
            "id": 4,
            "uuid": "018f3c80-0000-7000-8000-000000000001",
            "username": "mvega",
            "email": "mvega@example.com",
            "role": "USER",
            "active": true,
            "temporalPassword": true,
        });

        let account: UserAccount = serde_json::from_value(body).unwrap();
        assert_eq!(account.id, UserId::new(4));
        assert_eq!(account.role, Role::User);
        assert!(account.temporal_password);
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let body = serde_json::json!({
            "id": 9,
            "username": "jortiz",
            "email": "jortiz@example.com",
            "role": "ADMIN",
        });

        let account: UserAccount = serde_json::from_value(body).unwrap();
        assert!(account.uuid.is_none());
        assert!(!account.active);
        assert!(!account.temporal_password);
    }
}
