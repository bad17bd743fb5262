//! Product API Handlers
//!
//! The listing endpoint drives the storefront: category/brand filters,
//! case-insensitive search over title and description, price or recency
//! ordering and offset pagination, all pushed down into one query.
//!
//! Update replaces the stored product wholesale. The client sends
//! `imagesToKeep` (a JSON array of already-stored URLs) plus any new files;
//! the final image list is the kept URLs followed by the new uploads, with
//! duplicates (by trailing filename) removed, first occurrence winning.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::multipart::MultipartForm;
use crate::core::ServerState;
use crate::db::models::{ProductCreate, ProductFilter, ProductReplace, ProductSort, ProductView};
use crate::db::repository::{ProductRepository, make_thing};
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, parse_flag, parse_optional_price, parse_required_price,
    validate_optional_text, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, Pagination, ok, ok_message, ok_paginated};

/// Upload folder for product images
const IMAGE_FOLDER: &str = "products";

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/products
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<ProductView>>>> {
    let page = query.page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).max(1);

    let filter = ProductFilter {
        category: query
            .category
            .filter(|v| !v.trim().is_empty())
            .map(|v| make_thing("category", v.trim())),
        brand: query
            .brand
            .filter(|v| !v.trim().is_empty())
            .map(|v| make_thing("brand", v.trim())),
        search: query.search.filter(|v| !v.trim().is_empty()),
        sort: ProductSort::parse(query.sort.as_deref()),
        page,
        limit,
    };

    let repo = ProductRepository::new(state.get_db());
    let (products, total) = repo.list(filter).await?;

    Ok(ok_paginated(
        products,
        "Products fetched successfully",
        Pagination::new(total, page, limit),
    ))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ProductView>>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .find_view_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(ok(product, "Product fetched successfully"))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductView>>)> {
    let form = MultipartForm::parse(multipart).await?;

    let title = form.required_field("title")?;
    validate_required_text(title, "title", MAX_TITLE_LEN)?;
    let description = form.required_field("description")?;
    validate_required_text(description, "description", MAX_DESCRIPTION_LEN)?;

    let actual_price = parse_required_price(form.field("actualPrice"), "actualPrice")?;
    let discount_price = parse_optional_price(form.field("discountPrice"), "discountPrice")?;
    let is_out_of_stock = parse_flag(form.field("isOutOfStock"), "isOutOfStock")?;
    let is_featured = parse_flag(form.field("isFeatured"), "isFeatured")?;

    let category = make_thing("category", form.required_field("category")?);
    let brand = make_thing("brand", form.required_field("brand")?);

    let mut images = Vec::new();
    for file in form.files("images") {
        images.push(
            state
                .image_store()
                .store(IMAGE_FOLDER, &file.filename, &file.bytes)?,
        );
    }

    let repo = ProductRepository::new(state.get_db());
    let created = repo
        .create(ProductCreate {
            images,
            title: title.to_string(),
            description: description.to_string(),
            actual_price,
            discount_price,
            is_out_of_stock,
            is_featured,
            category,
            brand,
        })
        .await?;

    let id = created
        .id
        .as_ref()
        .map(|t| t.to_raw())
        .ok_or_else(|| AppError::database("Created product has no id"))?;
    let product = repo
        .find_view_by_id(&id)
        .await?
        .ok_or_else(|| AppError::database("Created product vanished"))?;

    Ok((
        StatusCode::CREATED,
        ok(product, "Product created successfully"),
    ))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<ProductView>>> {
    let form = MultipartForm::parse(multipart).await?;

    let repo = ProductRepository::new(state.get_db());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    let title = form.field("title").unwrap_or_default().trim().to_string();
    validate_optional_text(Some(title.as_str()), "title", MAX_TITLE_LEN)?;
    let description = form
        .field("description")
        .unwrap_or_default()
        .trim()
        .to_string();
    validate_optional_text(Some(description.as_str()), "description", MAX_DESCRIPTION_LEN)?;

    let actual_price = parse_required_price(form.field("actualPrice"), "actualPrice")?;
    let discount_price = parse_optional_price(form.field("discountPrice"), "discountPrice")?;
    let is_out_of_stock = parse_flag(form.field("isOutOfStock"), "isOutOfStock")?;
    let is_featured = parse_flag(form.field("isFeatured"), "isFeatured")?;

    // References survive an omitted field; a product always keeps both links
    let category = match form.field("category").map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => make_thing("category", v),
        None => existing.category.clone(),
    };
    let brand = match form.field("brand").map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => make_thing("brand", v),
        None => existing.brand.clone(),
    };

    let kept: Vec<String> = match form.field("imagesToKeep") {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(raw)
            .map_err(|e| AppError::validation(format!("imagesToKeep must be a JSON array: {e}")))?,
        _ => Vec::new(),
    };
    let mut images = kept;
    for file in form.files("images") {
        images.push(
            state
                .image_store()
                .store(IMAGE_FOLDER, &file.filename, &file.bytes)?,
        );
    }
    let images = dedupe_by_filename(images);

    let product = repo
        .update(
            &id,
            ProductReplace {
                images,
                title,
                description,
                actual_price,
                discount_price,
                is_out_of_stock,
                is_featured,
                category,
                brand,
            },
        )
        .await?;

    Ok(ok(product, "Product updated successfully"))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = ProductRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(ok_message("Product deleted successfully"))
}

/// Remove URLs whose trailing filename was already seen, keeping order.
///
/// Kept URLs precede new uploads in the input, so on a collision the
/// already-stored URL wins.
fn dedupe_by_filename(urls: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut result = Vec::with_capacity(urls.len());
    for url in urls {
        let filename = url.rsplit('/').next().unwrap_or(&url).to_string();
        if seen.insert(filename) {
            result.push(url);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let urls = vec![
            "https://x.example/a.jpg".to_string(),
            "https://y.example/b.jpg".to_string(),
            "https://z.example/a.jpg".to_string(),
        ];
        assert_eq!(
            dedupe_by_filename(urls),
            vec![
                "https://x.example/a.jpg".to_string(),
                "https://y.example/b.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn dedupe_handles_bare_names() {
        let urls = vec!["a.jpg".to_string(), "a.jpg".to_string()];
        assert_eq!(dedupe_by_filename(urls), vec!["a.jpg".to_string()]);
    }
}
