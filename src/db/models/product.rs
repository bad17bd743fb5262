//! Product Model
//!
//! `category` and `brand` are weak references: record links stored by id with
//! no enforced existence guarantee. They are resolved into full nested
//! objects at read time with a `FETCH` step; referential integrity is NOT
//! enforced on write, so a product may point at a deleted category or brand.

use super::serde_thing;
use super::{Brand, Category};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type ProductId = Thing;

/// Product as stored. Record links stay native `Thing`s so `FETCH` can
/// resolve them; this struct never crosses the HTTP boundary - handlers
/// respond with [`ProductView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    /// Image URLs in submission order
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub actual_price: f64,
    #[serde(default)]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub is_out_of_stock: bool,
    #[serde(default)]
    pub is_featured: bool,
    /// Weak reference to a category
    pub category: Thing,
    /// Weak reference to a brand
    pub brand: Thing,
    /// Epoch milliseconds
    #[serde(default)]
    pub created_at: i64,
}

/// Product as read back with references resolved (`FETCH category, brand`).
///
/// A dangling reference resolves to `null`, so the external shape stays
/// stable even when integrity was violated by a category/brand delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub actual_price: f64,
    #[serde(default)]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub is_out_of_stock: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub brand: Option<Brand>,
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub images: Vec<String>,
    pub title: String,
    pub description: String,
    pub actual_price: f64,
    pub discount_price: Option<f64>,
    pub is_out_of_stock: bool,
    pub is_featured: bool,
    pub category: Thing,
    pub brand: Thing,
}

/// Wholesale replacement payload for update.
///
/// Unlike Category/Brand/Banner updates this is not a merge: every field here
/// is written on every update. Missing text fields arrive as empty strings
/// and a missing discount price clears the stored one. References are the one
/// exception - the handler carries the previous value forward when the form
/// omits them, since a stored product must always hold both links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReplace {
    pub images: Vec<String>,
    pub title: String,
    pub description: String,
    pub actual_price: f64,
    /// Serialized even when `None` so an omitted discount clears the field
    pub discount_price: Option<f64>,
    pub is_out_of_stock: bool,
    pub is_featured: bool,
    pub category: Thing,
    pub brand: Thing,
}

/// Listing filters, all optional except pagination defaults
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<Thing>,
    pub brand: Option<Thing>,
    /// Case-insensitive substring matched against title OR description
    pub search: Option<String>,
    pub sort: ProductSort,
    pub page: i64,
    pub limit: i64,
}

/// Sort orders for the product listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Effective price ascending
    LowToHigh,
    /// Effective price descending
    HighToLow,
    /// Creation time descending
    Newest,
    /// Creation time ascending
    Oldest,
    /// Creation time descending
    #[default]
    Default,
}

impl ProductSort {
    /// Unrecognized values fall back to the default ordering, matching the
    /// tolerant query-string handling of the public API.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("lowToHigh") => Self::LowToHigh,
            Some("highToLow") => Self::HighToLow,
            Some("newest") => Self::Newest,
            Some("oldest") => Self::Oldest,
            _ => Self::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_parsing() {
        assert_eq!(ProductSort::parse(Some("lowToHigh")), ProductSort::LowToHigh);
        assert_eq!(ProductSort::parse(Some("highToLow")), ProductSort::HighToLow);
        assert_eq!(ProductSort::parse(Some("newest")), ProductSort::Newest);
        assert_eq!(ProductSort::parse(Some("oldest")), ProductSort::Oldest);
        assert_eq!(ProductSort::parse(Some("garbage")), ProductSort::Default);
        assert_eq!(ProductSort::parse(None), ProductSort::Default);
    }
}
