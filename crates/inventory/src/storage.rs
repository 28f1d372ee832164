use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockdesk_auth::UserAccount;
use stockdesk_core::StorageId;

use crate::{Article, Category};

/// A warehouse location holding allocated article quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Storage {
    pub id: StorageId,

    #[serde(default)]
    pub uuid: Option<Uuid>,

    /// Human-assigned warehouse code (unique, used by the identifier lookup).
    pub identifier: String,

    #[serde(default)]
    pub category: Option<Category>,

    /// Account responsible for this storage, when one is assigned.
    #[serde(default)]
    pub responsible: Option<UserAccount>,

    #[serde(default)]
    pub active: bool,

    /// Allocated article-quantity pairs.
    #[serde(default)]
    pub articles: Vec<StorageArticle>,
}

/// One allocation: a quantity of an article held by a storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageArticle {
    pub article: Article,

    /// Units of the article allocated to the storage.
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_allocations() {
        let body = serde_json::json!({
            "id": 3,
            "identifier": "WH-NORTE-01",
            "active": true,
            "responsible": {
                "id": 4,
                "username": "mvega",
                "email": "mvega@example.com",
                "role": "USER",
            },
            "articles": [
                {
                    "article": { "id": 12, "name": "M8 hex bolt", "quantity": 250 },
                    "quantity": 40,
                },
            ],
        });

        let storage: Storage = serde_json::from_value(body).unwrap();
        assert_eq!(storage.identifier, "WH-NORTE-01");
        assert_eq!(storage.articles.len(), 1);
        assert_eq!(storage.articles[0].quantity, 40);
        assert_eq!(storage.responsible.as_ref().unwrap().username, "mvega");
    }

    #[test]
    fn responsible_and_allocations_are_optional() {
        let body = serde_json::json!({
            "id": 5,
            "identifier": "WH-SUR-02",
        });

        let storage: Storage = serde_json::from_value(body).unwrap();
        assert!(storage.responsible.is_none());
        assert!(storage.articles.is_empty());
        assert!(!storage.active);
    }
}
