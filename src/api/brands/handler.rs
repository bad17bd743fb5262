//! Brand API Handlers
//!
//! Same multipart surface and name normalization as categories; the listing
//! differs in returning newest first.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use crate::api::multipart::MultipartForm;
use crate::core::ServerState;
use crate::db::models::{Brand, BrandCreate, BrandUpdate};
use crate::db::repository::BrandRepository;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{ApiResponse, AppError, AppResult, ok, ok_message};

/// Upload folder for brand images
const IMAGE_FOLDER: &str = "brands";

/// GET /api/brands
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Brand>>>> {
    let repo = BrandRepository::new(state.get_db());
    let brands = repo.find_all().await?;
    Ok(ok(brands, "Brands fetched successfully"))
}

/// GET /api/brands/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Brand>>> {
    let repo = BrandRepository::new(state.get_db());
    let brand = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Brand not found"))?;
    Ok(ok(brand, "Brand fetched successfully"))
}

/// POST /api/brands
pub async fn create(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<Brand>>)> {
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

    let repo = BrandRepository::new(state.get_db());
    let brand = repo.create(BrandCreate { name, image }).await?;

    Ok((StatusCode::CREATED, ok(brand, "Brand created successfully")))
}

/// PUT /api/brands/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Brand>>> {
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

    let repo = BrandRepository::new(state.get_db());
    let brand = repo.update(&id, BrandUpdate { name, image }).await?;
    Ok(ok(brand, "Brand updated successfully"))
}

/// DELETE /api/brands/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = BrandRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(ok_message("Brand deleted successfully"))
}
