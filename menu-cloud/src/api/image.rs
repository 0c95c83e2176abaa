//! Image upload API: owner uploads logo / category / item images
//!
//! POST /api/tenant/images: multipart upload → validate → downscale → JPEG → SHA256 → disk
//!
//! Images stored at: {images_dir}/{tenant_id}/{hash}.jpg, served under /images

use axum::{Extension, Json, extract::Multipart, extract::State};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use sha2::{Digest, Sha256};
use std::io::Cursor;

use shared::error::{AppError, ErrorCode};

use crate::auth::TenantIdentity;
use crate::state::AppState;

/// Maximum upload size (10MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

const JPEG_QUALITY: u8 = 85;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Upload response
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ImageUploadResponse {
    pub hash: String,
    /// Public path, usable as `logo_url` / `image_url`
    pub url: String,
}

/// Decode, scale down so the longest edge is at most `max_dimension`, re-encode as JPEG.
pub fn optimize(data: &[u8], max_dimension: u32) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data).map_err(|e| {
        AppError::with_message(ErrorCode::InvalidImageFile, format!("Invalid image: {e}"))
    })?;

    let img = if img.width() > max_dimension || img.height() > max_dimension {
        img.resize(max_dimension, max_dimension, FilterType::Lanczos3)
    } else {
        img
    };

    let mut buffer = Vec::new();
    let rgb_img = img.to_rgb8();
    let mut cursor = Cursor::new(&mut buffer);
    let encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
    rgb_img.write_with_encoder(encoder).map_err(|e| {
        AppError::with_message(
            ErrorCode::ImageProcessingFailed,
            format!("Image compression failed: {e}"),
        )
    })?;
    Ok(buffer)
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

pub async fn upload_image(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    mut multipart: Multipart,
) -> Result<Json<ImageUploadResponse>, AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut original_filename: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::with_message(ErrorCode::InvalidRequest, format!("Multipart error: {e}"))
    })? {
        if field.name() == Some("file") {
            original_filename = field.file_name().map(|s| s.to_string());
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        AppError::with_message(
                            ErrorCode::InvalidRequest,
                            format!("Read error: {e}"),
                        )
                    })?
                    .to_vec(),
            );
            break;
        }
    }

    let data = file_data.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!("File too large: {} bytes (max {MAX_FILE_SIZE})", data.len()),
        ));
    }

    let filename = original_filename.unwrap_or_default();
    let ext = std::path::Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!("Unsupported format: {ext}. Supported: png, jpg, jpeg, webp"),
        ));
    }

    let max_dimension = state.image_max_dimension;
    let jpeg = tokio::task::spawn_blocking(move || optimize(&data, max_dimension))
        .await
        .map_err(|e| {
            tracing::error!("Image task failed: {e}");
            AppError::new(ErrorCode::ImageProcessingFailed)
        })??;

    let hash = sha256_hex(&jpeg);
    let dir = state.images_dir.join(&identity.tenant_id);
    let path = dir.join(format!("{hash}.jpg"));

    // Content-addressed: an existing file already holds these bytes
    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        let write = async {
            tokio::fs::create_dir_all(&dir).await?;
            tokio::fs::write(&path, &jpeg).await
        };
        write.await.map_err(|e| {
            tracing::error!(hash = %hash, error = %e, "Image write failed");
            AppError::new(ErrorCode::FileStorageFailed)
        })?;
    }

    tracing::info!(
        tenant_id = %identity.tenant_id,
        hash = %hash,
        bytes = jpeg.len(),
        "Image stored"
    );

    Ok(Json(ImageUploadResponse {
        url: format!("/images/{}/{hash}.jpg", identity.tenant_id),
        hash,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn test_optimize_scales_longest_edge() {
        let jpeg = optimize(&png(2400, 1200), 1200).unwrap();
        let out = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((out.width(), out.height()), (1200, 600));
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_optimize_keeps_small_images() {
        let jpeg = optimize(&png(300, 200), 1200).unwrap();
        let out = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((out.width(), out.height()), (300, 200));
    }

    #[test]
    fn test_optimize_rejects_garbage() {
        let err = optimize(b"definitely not an image", 1200).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidImageFile);
    }

    #[test]
    fn test_hash_is_stable() {
        assert_eq!(sha256_hex(b"abc").len(), 64);
        assert_eq!(sha256_hex(b"abc"), sha256_hex(b"abc"));
    }
}
