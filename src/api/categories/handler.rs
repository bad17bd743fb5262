//! Category API Handlers
//!
//! Create and update arrive as multipart forms because the admin UI submits
//! the name and the image file together. Names are stored trimmed and
//! lowercased; uniqueness is case-insensitive.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use crate::api::multipart::MultipartForm;
use crate::core::ServerState;
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use crate::db::repository::CategoryRepository;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{ApiResponse, AppError, AppResult, ok, ok_message};

/// Upload folder for category images
const IMAGE_FOLDER: &str = "categories";

/// GET /api/categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let repo = CategoryRepository::new(state.get_db());
    let categories = repo.find_all().await?;
    Ok(ok(categories, "Categories fetched successfully"))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let repo = CategoryRepository::new(state.get_db());
    let category = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Category not found"))?;
    Ok(ok(category, "Category fetched successfully"))
}

/// POST /api/categories
pub async fn create(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let form = MultipartForm::parse(multipart).await?;

    let name = form.required_field("name")?;
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    let name = name.to_lowercase();

    let file = form
        .file("image")
        .ok_or_else(|| AppError::validation("image is required"))?;
    let image = state
        .image_store()
        .store(IMAGE_FOLDER, &file.filename, &file.bytes)?;

    let repo = CategoryRepository::new(state.get_db());
    let category = repo.create(CategoryCreate { name, image }).await?;

    Ok((
        StatusCode::CREATED,
        ok(category, "Category created successfully"),
    ))
}

/// PUT /api/categories/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Category>>> {
    let form = MultipartForm::parse(multipart).await?;

    let name = match form.field("name") {
        Some(raw) => {
            validate_required_text(raw, "name", MAX_NAME_LEN)?;
            Some(raw.trim().to_lowercase())
        }
        None => None,
    };

    let image = match form.file("image") {
        Some(file) => Some(
            state
                .image_store()
                .store(IMAGE_FOLDER, &file.filename, &file.bytes)?,
        ),
        None => None,
    };

    let repo = CategoryRepository::new(state.get_db());
    let category = repo.update(&id, CategoryUpdate { name, image }).await?;
    Ok(ok(category, "Category updated successfully"))
}

/// DELETE /api/categories/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = CategoryRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(ok_message("Category deleted successfully"))
}
