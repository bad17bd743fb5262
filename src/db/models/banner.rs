//! Banner Model

use super::serde_thing;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type BannerId = Thing;

/// Promotional banner. No uniqueness constraint; every text field optional.
///
/// The image is optional on create and stored as an empty string when absent
/// (the behavior the public API always had, despite the data model implying
/// required - see DESIGN.md).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<BannerId>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub sub_title: Option<String>,
    #[serde(default)]
    pub main_title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Epoch milliseconds
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerCreate {
    pub image: String,
    pub sub_title: Option<String>,
    pub main_title: Option<String>,
    pub link: Option<String>,
}

/// Partial update: omitted fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
