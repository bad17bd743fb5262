//! Uploaded Image Serving
//!
//! Serves the files written by the image store under `/uploads/...`. These
//! paths sit outside `/api/` so the auth middleware never challenges them.

use axum::{
    Router,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/uploads/{folder}/{filename}", get(serve))
}

/// GET /uploads/{folder}/{filename}
///
/// The store only ever writes JPEG, so the content type is fixed. Path
/// traversal is rejected by [`ImageStore::resolve`].
///
/// [`ImageStore::resolve`]: crate::services::ImageStore::resolve
async fn serve(
    State(state): State<ServerState>,
    Path((folder, filename)): Path<(String, String)>,
) -> AppResult<Response> {
    let path = state.image_store().resolve(&folder, &filename)?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::internal(format!("Failed to read image: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/jpeg"),
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
        ],
        bytes,
    )
        .into_response())
}
