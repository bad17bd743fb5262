//! Category Model

use super::serde_thing;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type CategoryId = Thing;

/// Category model
///
/// Names are stored trimmed and lowercased; uniqueness is case-insensitive
/// across all live records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<CategoryId>,
    pub name: String,
    /// URL returned by the image store
    #[serde(default)]
    pub image: String,
    /// Epoch milliseconds
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    /// Already trimmed and lowercased by the handler
    pub name: String,
    pub image: String,
}

/// Partial update: omitted fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
