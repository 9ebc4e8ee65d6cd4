//! Avatar processing: crop-fill to a square PNG and store it under a
//! name derived from the owner's email.

use std::io::Cursor;
use std::sync::Arc;

use bytes::Bytes;
use image::ImageFormat;
use image::imageops::FilterType;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use contactbook_core::config::AvatarConfig;
use contactbook_core::error::{AppError, ErrorKind};
use contactbook_core::result::AppResult;
use contactbook_core::traits::storage::StorageProvider;

/// Number of hex characters of the email digest used as the file name.
const NAME_LEN: usize = 12;

/// Where an avatar landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAvatar {
    /// Path relative to the storage root.
    pub path: String,
    /// Public URL with a cache-busting version parameter.
    pub url: String,
}

/// Resizes uploaded images and writes them through a storage provider.
#[derive(Debug, Clone)]
pub struct AvatarProcessor {
    config: AvatarConfig,
    storage: Arc<dyn StorageProvider>,
}

impl AvatarProcessor {
    pub fn new(config: AvatarConfig, storage: Arc<dyn StorageProvider>) -> Self {
        Self { config, storage }
    }

    /// Storage path for the avatar of `email`. The same email always maps
    /// to the same path, so a new upload replaces the previous one.
    pub fn avatar_path(&self, email: &str) -> String {
        format!("avatars/{}/{}.png", self.config.prefix, avatar_name(email))
    }

    /// Crop `data` to the configured square size, store it as PNG and
    /// return its location.
    pub async fn store(&self, email: &str, data: Bytes) -> AppResult<StoredAvatar> {
        if data.is_empty() {
            return Err(AppError::validation("Avatar file is empty"));
        }
        if data.len() > self.config.max_upload_bytes {
            return Err(AppError::validation(format!(
                "Avatar exceeds the {} byte upload limit",
                self.config.max_upload_bytes
            )));
        }

        let size = self.config.size;
        let png = tokio::task::spawn_blocking(move || render_square_png(&data, size))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Avatar task panicked", e))??;

        let path = self.avatar_path(email);
        self.storage.write(&path, Bytes::from(png)).await?;

        let url = format!(
            "{}/{}?v={}",
            self.config.public_base_url.trim_end_matches('/'),
            path,
            chrono::Utc::now().timestamp()
        );
        info!(path = %path, "Avatar stored");
        Ok(StoredAvatar { path, url })
    }
}

/// First [`NAME_LEN`] hex characters of the SHA-256 of `email`.
pub fn avatar_name(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    let mut hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    hex.truncate(NAME_LEN);
    hex
}

fn render_square_png(data: &[u8], size: u32) -> AppResult<Vec<u8>> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::with_source(ErrorKind::Validation, "Unsupported image file", e))?;
    debug!(width = img.width(), height = img.height(), "Decoded avatar upload");

    let square = img.resize_to_fill(size, size, FilterType::Lanczos3);
    let mut buf = Cursor::new(Vec::new());
    square
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to encode avatar", e))?;
    Ok(buf.into_inner())
}
