//! Banner API Handlers
//!
//! Everything on a banner is optional. A create without an image stores an
//! empty string, which the storefront treats as "no image".

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use crate::api::multipart::MultipartForm;
use crate::core::ServerState;
use crate::db::models::{Banner, BannerCreate, BannerUpdate};
use crate::db::repository::BannerRepository;
use crate::utils::validation::{MAX_TITLE_LEN, MAX_URL_LEN, validate_optional_text};
use crate::utils::{ApiResponse, AppError, AppResult, ok, ok_message};

/// Upload folder for banner images
const IMAGE_FOLDER: &str = "banners";

/// GET /api/banners
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Banner>>>> {
    let repo = BannerRepository::new(state.get_db());
    let banners = repo.find_all().await?;
    Ok(ok(banners, "Banners fetched successfully"))
}

/// GET /api/banners/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Banner>>> {
    let repo = BannerRepository::new(state.get_db());
    let banner = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Banner not found"))?;
    Ok(ok(banner, "Banner fetched successfully"))
}

/// POST /api/banners
pub async fn create(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<Banner>>)> {
    let form = MultipartForm::parse(multipart).await?;

    let sub_title = optional_text(&form, "subTitle", MAX_TITLE_LEN)?;
    let main_title = optional_text(&form, "mainTitle", MAX_TITLE_LEN)?;
    let link = optional_text(&form, "link", MAX_URL_LEN)?;

    let image = match form.file("image") {
        Some(file) => state
            .image_store()
            .store(IMAGE_FOLDER, &file.filename, &file.bytes)?,
        None => String::new(),
    };

    let repo = BannerRepository::new(state.get_db());
    let banner = repo
        .create(BannerCreate {
            image,
            sub_title,
            main_title,
            link,
        })
        .await?;

    Ok((StatusCode::CREATED, ok(banner, "Banner created successfully")))
}

/// PUT /api/banners/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Banner>>> {
    let form = MultipartForm::parse(multipart).await?;

    let sub_title = optional_text(&form, "subTitle", MAX_TITLE_LEN)?;
    let main_title = optional_text(&form, "mainTitle", MAX_TITLE_LEN)?;
    let link = optional_text(&form, "link", MAX_URL_LEN)?;

    let image = match form.file("image") {
        Some(file) => Some(
            state
                .image_store()
                .store(IMAGE_FOLDER, &file.filename, &file.bytes)?,
        ),
        None => None,
    };

    let repo = BannerRepository::new(state.get_db());
    let banner = repo
        .update(
            &id,
            BannerUpdate {
                sub_title,
                main_title,
                link,
                image,
            },
        )
        .await?;
    Ok(ok(banner, "Banner updated successfully"))
}

/// DELETE /api/banners/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = BannerRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(ok_message("Banner deleted successfully"))
}

fn optional_text(
    form: &MultipartForm,
    field: &str,
    max_len: usize,
) -> AppResult<Option<String>> {
    let value = form.field(field);
    validate_optional_text(value, field, max_len)?;
    Ok(value.map(|v| v.trim().to_string()))
}
