//! Image Store
//!
//! Stores uploaded images on the local filesystem. Every accepted image is
//! re-encoded to JPEG and named by the SHA-256 of the encoded bytes, so
//! re-uploading identical content lands on the same file and the same URL.

use crate::utils::{AppError, AppResult};
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported upload formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for stored images (85% keeps product photos presentable
/// while controlling file size)
const JPEG_QUALITY: u8 = 85;

/// Filesystem-backed image store rooted at the work directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    uploads_dir: PathBuf,
}

impl ImageStore {
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
        }
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    /// Validate, re-encode and persist an uploaded image.
    ///
    /// `folder` groups images by resource ("products", "categories", ...).
    /// Returns the public URL path of the stored file.
    pub fn store(&self, folder: &str, original_name: &str, data: &[u8]) -> AppResult<String> {
        if data.is_empty() {
            return Err(AppError::validation("Empty file provided"));
        }
        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::validation(format!(
                "File too large. Maximum size is {}MB",
                MAX_FILE_SIZE / 1024 / 1024
            )));
        }

        let ext = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase())
            .ok_or_else(|| {
                AppError::validation(format!("Invalid file extension for: {original_name}"))
            })?;
        if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
            return Err(AppError::validation(format!(
                "Unsupported file format '{}'. Supported: {}",
                ext,
                SUPPORTED_FORMATS.join(", ")
            )));
        }

        let compressed = reencode_jpeg(data)?;

        let hash = {
            let mut hasher = Sha256::new();
            hasher.update(&compressed);
            hex::encode(hasher.finalize())
        };
        let filename = format!("{hash}.jpg");

        let dir = self.uploads_dir.join(folder);
        std::fs::create_dir_all(&dir)
            .map_err(|e| AppError::internal(format!("Failed to create upload directory: {e}")))?;

        let path = dir.join(&filename);
        if path.exists() {
            tracing::info!(
                original_name = %original_name,
                file = %filename,
                "Duplicate image content, reusing existing file"
            );
        } else {
            std::fs::write(&path, &compressed)
                .map_err(|e| AppError::internal(format!("Failed to save file: {e}")))?;
            tracing::info!(
                original_name = %original_name,
                size = %compressed.len(),
                file = %filename,
                "Image stored"
            );
        }

        Ok(format!("/uploads/{folder}/{filename}"))
    }

    /// Resolve a stored file, rejecting anything that escapes the uploads
    /// directory.
    pub fn resolve(&self, folder: &str, filename: &str) -> AppResult<PathBuf> {
        if folder.contains(['/', '\\', '.']) || filename.contains(['/', '\\']) || filename.starts_with('.') {
            return Err(AppError::validation("Invalid file path"));
        }
        let path = self.uploads_dir.join(folder).join(filename);
        if !path.is_file() {
            return Err(AppError::not_found("Image not found"));
        }
        Ok(path)
    }
}

/// Decode the upload and re-encode as RGB JPEG
fn reencode_jpeg(data: &[u8]) -> AppResult<Vec<u8>> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {e}")))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {e}")))?;
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn sample_png() -> Vec<u8> {
        let img = RgbImage::from_fn(8, 8, |x, y| image::Rgb([x as u8 * 30, y as u8 * 30, 120]));
        let mut buffer = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn stores_and_deduplicates_by_content() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path());

        let data = sample_png();
        let url1 = store.store("products", "photo.png", &data).unwrap();
        let url2 = store.store("products", "renamed.PNG", &data).unwrap();

        assert!(url1.starts_with("/uploads/products/"));
        assert!(url1.ends_with(".jpg"));
        // Same bytes land on the same URL regardless of the upload name
        assert_eq!(url1, url2);

        let filename = url1.rsplit('/').next().unwrap();
        assert!(tmp.path().join("products").join(filename).is_file());
    }

    #[test]
    fn rejects_unsupported_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path());
        let err = store.store("products", "document.gif", &sample_png());
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn rejects_non_image_payload() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path());
        let err = store.store("products", "fake.jpg", b"definitely not an image");
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn rejects_oversized_payload() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path());
        let big = vec![0u8; MAX_FILE_SIZE + 1];
        let err = store.store("products", "big.jpg", &big);
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn resolve_blocks_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path());
        assert!(store.resolve("products", "../secret.jpg").is_err());
        assert!(store.resolve("..", "secret.jpg").is_err());
        assert!(store.resolve("products", ".hidden").is_err());
    }
}
