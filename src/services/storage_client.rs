// ============================================================================
// Object storage client (Supabase-compatible storage REST API)
// ============================================================================
//
// Endpoints used:
//   GET    /storage/v1/bucket                      list buckets
//   POST   /storage/v1/bucket                      create bucket
//   POST   /storage/v1/object/{bucket}/{path}      upload (x-upsert)
//   DELETE /storage/v1/object/{bucket}             remove objects by prefix
//   public /storage/v1/object/public/{bucket}/{path}
//
// ============================================================================

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::StorageConfig;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage API error ({0}): {1}")]
    Api(StatusCode, String),

    #[error("Storage authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid storage configuration: {0}")]
    Config(String),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub public: bool,
}

#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub content_type: String,
    /// Seconds, sent as the `cache-control` header value.
    pub cache_control: String,
    pub upsert: bool,
}

/// Seam over the storage service so uploads can be tested without a network.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>>;

    async fn create_bucket(&self, name: &str, public: bool) -> StorageResult<()>;

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        options: &UploadOptions,
    ) -> StorageResult<()>;

    /// Pure string construction; never touches the network.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    async fn remove(&self, bucket: &str, paths: &[String]) -> StorageResult<()>;
}

pub struct SupabaseStorage {
    http_client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStorage {
    pub fn new(config: &StorageConfig) -> StorageResult<Self> {
        if config.service_key.trim().is_empty() {
            return Err(StorageError::Config("service key is required".to_string()));
        }
        Url::parse(&config.base_url)
            .map_err(|e| StorageError::Config(format!("invalid base URL: {}", e)))?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.base_url, path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
    }

    async fn check_success(response: Response) -> StorageResult<Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StorageError::Auth(error_text)),
                _ => Err(StorageError::Api(status, error_text)),
            };
        }

        Ok(response)
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>> {
        let response = self
            .authorized(self.http_client.get(self.endpoint("bucket")))
            .send()
            .await?;
        let response = Self::check_success(response).await?;
        Ok(response.json().await?)
    }

    async fn create_bucket(&self, name: &str, public: bool) -> StorageResult<()> {
        let response = self
            .authorized(self.http_client.post(self.endpoint("bucket")))
            .json(&json!({ "id": name, "name": name, "public": public }))
            .send()
            .await?;
        Self::check_success(response).await?;
        Ok(())
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        options: &UploadOptions,
    ) -> StorageResult<()> {
        let url = self.endpoint(&format!("object/{}/{}", bucket, path));
        let response = self
            .authorized(self.http_client.post(url))
            .header(reqwest::header::CONTENT_TYPE, &options.content_type)
            .header(reqwest::header::CACHE_CONTROL, format!("max-age={}", options.cache_control))
            .header("x-upsert", if options.upsert { "true" } else { "false" })
            .body(bytes)
            .send()
            .await?;
        Self::check_success(response).await?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        public_object_url(&self.base_url, bucket, path)
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> StorageResult<()> {
        let response = self
            .authorized(self.http_client.delete(self.endpoint(&format!("object/{}", bucket))))
            .json(&json!({ "prefixes": paths }))
            .send()
            .await?;
        Self::check_success(response).await?;
        Ok(())
    }
}

pub fn public_object_url(base_url: &str, bucket: &str, path: &str) -> String {
    format!(
        "{}/storage/v1/object/public/{}/{}",
        base_url.trim_end_matches('/'),
        bucket,
        path
    )
}

/// Object path inside `bucket` for a URL produced by [`public_object_url`],
/// or `None` when the URL points somewhere else.
pub fn object_path_from_public_url(url: &str, bucket: &str) -> Option<String> {
    let marker = format!("/storage/v1/object/public/{}/", bucket);
    let start = url.find(&marker)? + marker.len();
    let path = url[start..].split(['?', '#']).next().unwrap_or_default();
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: &str, url: &str) -> StorageConfig {
        StorageConfig {
            base_url: url.to_string(),
            service_key: key.to_string(),
            blog_bucket: "blog-images".to_string(),
            car_bucket: "car-images".to_string(),
        }
    }

    #[test]
    fn test_public_url_format() {
        assert_eq!(
            public_object_url("https://abc.supabase.co/", "blog-images", "blog_1_abcd1234.png"),
            "https://abc.supabase.co/storage/v1/object/public/blog-images/blog_1_abcd1234.png"
        );
    }

    #[test]
    fn test_object_path_round_trip() {
        let url = public_object_url("https://abc.supabase.co", "car-images", "car_1_x.webp");
        assert_eq!(
            object_path_from_public_url(&url, "car-images").as_deref(),
            Some("car_1_x.webp")
        );
        assert_eq!(object_path_from_public_url(&url, "blog-images"), None);
        assert_eq!(object_path_from_public_url("https://images.unsplash.com/photo", "car-images"), None);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert!(matches!(
            SupabaseStorage::new(&config("", "https://abc.supabase.co")),
            Err(StorageError::Config(_))
        ));
        assert!(matches!(
            SupabaseStorage::new(&config("key", "not a url")),
            Err(StorageError::Config(_))
        ));
    }

    #[test]
    fn test_client_builds_public_urls() {
        let storage = SupabaseStorage::new(&config("key", "https://abc.supabase.co/")).unwrap();
        assert_eq!(
            storage.public_url("car-images", "a.png"),
            "https://abc.supabase.co/storage/v1/object/public/car-images/a.png"
        );
    }
}
