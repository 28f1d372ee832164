use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockdesk_core::CategoryId;

/// Grouping for storages and articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,

    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}
