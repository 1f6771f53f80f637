use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use std::sync::Arc;
use thiserror::Error;

use super::storage_client::{object_path_from_public_url, ObjectStorage, StorageError, UploadOptions};
use crate::utils::sanitize_for_log;

const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];
const DEFAULT_EXTENSION: &str = "jpg";
const CACHE_CONTROL_SECONDS: &str = "3600";

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Invalid file type '{0}'. Please upload a JPEG, PNG or WebP image")]
    InvalidFileType(String),

    #[error("Upload failed: {0}")]
    Storage(#[from] StorageError),
}

/// An image pulled out of a multipart form.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub fn is_allowed_image_type(content_type: &str) -> bool {
    let content_type = content_type.trim().to_ascii_lowercase();
    ALLOWED_IMAGE_TYPES.contains(&content_type.as_str())
}

/// Lowercased extension of `file_name`, `jpg` when there is none.
pub fn file_extension(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// `<prefix>_<unix millis>_<8 random lowercase alphanumerics>.<ext>`
pub fn generate_object_name(prefix: &str, file_name: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!(
        "{}_{}_{}.{}",
        prefix,
        Utc::now().timestamp_millis(),
        suffix,
        file_extension(file_name)
    )
}

/// Uploads images into one public bucket, creating the bucket on first use.
#[derive(Clone)]
pub struct ImageUploader {
    storage: Arc<dyn ObjectStorage>,
    bucket: String,
    prefix: String,
}

impl ImageUploader {
    pub fn new(storage: Arc<dyn ObjectStorage>, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            storage,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Creates the bucket as public if it is missing. Failures are logged and
    /// swallowed; the upload that follows reports any real problem.
    async fn ensure_bucket(&self) {
        match self.storage.list_buckets().await {
            Ok(buckets) => {
                if buckets.iter().any(|b| b.name == self.bucket || b.id == self.bucket) {
                    return;
                }
                tracing::info!("🪣 Bucket '{}' not found, creating it", self.bucket);
                if let Err(e) = self.storage.create_bucket(&self.bucket, true).await {
                    tracing::warn!("⚠️ Could not create bucket '{}': {}", self.bucket, e);
                }
            }
            Err(e) => {
                tracing::warn!("⚠️ Could not list buckets, trying upload anyway: {}", e);
            }
        }
    }

    /// Validates, uploads and returns the public URL of the stored object.
    pub async fn upload(&self, file: ImageFile) -> Result<String, UploadError> {
        if !is_allowed_image_type(&file.content_type) {
            tracing::warn!(
                "Rejected upload '{}' with content type '{}'",
                sanitize_for_log(&file.file_name),
                sanitize_for_log(&file.content_type)
            );
            return Err(UploadError::InvalidFileType(file.content_type));
        }

        self.ensure_bucket().await;

        let object_name = generate_object_name(&self.prefix, &file.file_name);
        let options = UploadOptions {
            content_type: file.content_type.to_ascii_lowercase(),
            cache_control: CACHE_CONTROL_SECONDS.to_string(),
            upsert: true,
        };

        self.storage
            .upload(&self.bucket, &object_name, file.bytes, &options)
            .await?;

        tracing::info!("📤 Uploaded {} to bucket '{}'", object_name, self.bucket);
        Ok(self.storage.public_url(&self.bucket, &object_name))
    }

    /// Removes the object behind `url` if it lives in this bucket.
    /// Never fails; a leftover object is only logged.
    pub async fn remove_by_url(&self, url: &str) {
        let Some(path) = object_path_from_public_url(url, &self.bucket) else {
            return;
        };
        match self.storage.remove(&self.bucket, &[path.clone()]).await {
            Ok(()) => tracing::info!("🗑️ Removed {} from bucket '{}'", path, self.bucket),
            Err(e) => tracing::warn!("⚠️ Failed to remove {} from bucket '{}': {}", path, self.bucket, e),
        }
    }
}

#[derive(Error, Debug)]
pub enum ImageResolveError {
    #[error("An image is required")]
    Missing,

    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Image URL to persist on save.
///
/// With a new file the upload result wins; if that upload fails while editing
/// a record that already has an image, the old URL is kept. Creating without
/// any usable image is an error.
pub async fn resolve_image_url(
    uploader: &ImageUploader,
    file: Option<ImageFile>,
    existing: Option<&str>,
) -> Result<String, ImageResolveError> {
    let existing = existing.filter(|url| !url.trim().is_empty());

    match (file, existing) {
        (Some(file), existing) => match uploader.upload(file).await {
            Ok(url) => Ok(url),
            Err(e) => match existing {
                Some(url) => {
                    tracing::warn!("⚠️ Image upload failed, keeping existing image: {}", e);
                    Ok(url.to_string())
                }
                None => Err(ImageResolveError::Upload(e)),
            },
        },
        (None, Some(url)) => Ok(url.to_string()),
        (None, None) => Err(ImageResolveError::Missing),
    }
}
