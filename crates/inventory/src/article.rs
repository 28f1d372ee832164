use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockdesk_core::ArticleId;

use crate::Category;

/// A stock item.
///
/// `quantity` is the free (unallocated) stock; per-storage allocations live
/// on [`crate::Storage`]. The backend owns the conservation invariant
/// between the two — the client only ever reads these numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,

    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Free (unallocated) stock.
    pub quantity: i64,

    #[serde(default)]
    pub category: Option<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_wire_shape() {
        let body = serde_json::json!({
            "id": 12,
            "uuid": "018f3c80-0000-7000-8000-00000000000c",
            "name": "M8 hex bolt",
            "description": "Zinc plated",
            "quantity": 250,
            "category": { "id": 2, "name": "Fasteners" },
        });

        let article: Article = serde_json::from_value(body).unwrap();
        assert_eq!(article.quantity, 250);
        assert_eq!(article.category.unwrap().name, "Fasteners");
    }

    #[test]
    fn category_and_description_are_optional() {
        let body = serde_json::json!({
            "id": 13,
            "name": "Pallet wrap",
            "quantity": 0,
        });

        let article: Article = serde_json::from_value(body).unwrap();
        assert!(article.category.is_none());
        assert!(article.description.is_none());
    }
}
