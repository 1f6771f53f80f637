mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::RecordingStorage;
use zoi_rentals::services::upload_service::ImageResolveError;
use zoi_rentals::services::{resolve_image_url, ImageFile, ImageUploader, UploadError};

fn image(content_type: &str, file_name: &str) -> ImageFile {
    ImageFile {
        file_name: file_name.to_string(),
        content_type: content_type.to_string(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    }
}

fn uploader(storage: &Arc<RecordingStorage>) -> ImageUploader {
    ImageUploader::new(storage.clone(), "blog-images", "blog")
}

#[tokio::test]
async fn test_text_file_rejected_before_any_storage_call() {
    let storage = Arc::new(RecordingStorage::default());

    let result = uploader(&storage).upload(image("text/plain", "notes.txt")).await;

    assert!(matches!(result, Err(UploadError::InvalidFileType(_))));
    assert_eq!(storage.call_count(), 0);
}

#[tokio::test]
async fn test_png_creates_missing_bucket_and_uploads() {
    let storage = Arc::new(RecordingStorage::default());

    let url = uploader(&storage)
        .upload(image("image/png", "Sunset At Baga.PNG"))
        .await
        .unwrap();

    assert_eq!(*storage.buckets.read().await, vec!["blog-images".to_string()]);

    let uploads = storage.uploads.read().await;
    assert_eq!(uploads.len(), 1);
    let upload = &uploads[0];
    assert_eq!(upload.bucket, "blog-images");
    assert!(upload.path.starts_with("blog_"));
    assert!(upload.path.ends_with(".png"));
    assert_eq!(upload.cache_control, "3600");
    assert!(upload.upsert);
    assert_eq!(
        url,
        format!("{}/storage/v1/object/public/blog-images/{}", common::STORAGE_BASE, upload.path)
    );
}

#[tokio::test]
async fn test_existing_bucket_is_not_recreated() {
    let storage = Arc::new(RecordingStorage::default());
    storage.buckets.write().await.push("blog-images".to_string());

    uploader(&storage).upload(image("image/webp", "a.webp")).await.unwrap();

    assert_eq!(storage.buckets.read().await.len(), 1);
    assert_eq!(storage.uploads.read().await.len(), 1);
}

#[tokio::test]
async fn test_bucket_listing_failure_is_not_fatal() {
    let storage = Arc::new(RecordingStorage::default());
    storage.fail_list.store(true, Ordering::SeqCst);

    let result = uploader(&storage).upload(image("IMAGE/JPEG", "car")).await;

    let url = result.unwrap();
    assert!(url.ends_with(".jpg"));
    assert_eq!(storage.uploads.read().await.len(), 1);
}

#[tokio::test]
async fn test_bucket_creation_failure_is_not_fatal() {
    let storage = Arc::new(RecordingStorage::default());
    storage.fail_create.store(true, Ordering::SeqCst);

    let url = uploader(&storage).upload(image("image/png", "a.png")).await.unwrap();

    assert!(storage.buckets.read().await.is_empty());
    assert_eq!(storage.uploads.read().await.len(), 1);
    assert!(url.contains("/blog-images/"));
}

#[tokio::test]
async fn test_edit_keeps_existing_image_when_upload_fails() {
    let storage = Arc::new(RecordingStorage::default());
    storage.fail_upload.store(true, Ordering::SeqCst);
    let existing = "https://storage.test/storage/v1/object/public/blog-images/old.png";

    let url = resolve_image_url(&uploader(&storage), Some(image("image/png", "new.png")), Some(existing))
        .await
        .unwrap();

    assert_eq!(url, existing);
}

#[tokio::test]
async fn test_create_without_image_is_blocked() {
    let storage = Arc::new(RecordingStorage::default());

    let missing = resolve_image_url(&uploader(&storage), None, None).await;
    assert!(matches!(missing, Err(ImageResolveError::Missing)));

    storage.fail_upload.store(true, Ordering::SeqCst);
    let failed = resolve_image_url(&uploader(&storage), Some(image("image/png", "a.png")), None).await;
    assert!(matches!(failed, Err(ImageResolveError::Upload(UploadError::Storage(_)))));
}

#[tokio::test]
async fn test_remove_by_url_only_touches_own_bucket() {
    let storage = Arc::new(RecordingStorage::default());
    let uploader = uploader(&storage);

    uploader
        .remove_by_url("https://images.unsplash.com/photo-123")
        .await;
    uploader
        .remove_by_url("https://storage.test/storage/v1/object/public/blog-images/blog_1_abc.png")
        .await;

    assert_eq!(
        *storage.removed.read().await,
        vec!["blog-images/blog_1_abc.png".to_string()]
    );
}

#[tokio::test]
async fn test_remove_failure_is_swallowed() {
    let storage = Arc::new(RecordingStorage::default());
    storage.fail_remove.store(true, Ordering::SeqCst);

    uploader(&storage)
        .remove_by_url("https://storage.test/storage/v1/object/public/blog-images/blog_1_abc.png")
        .await;

    assert_eq!(storage.call_count(), 1);
    assert!(storage.removed.read().await.is_empty());
}
