use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("object already exists: {0}")]
    Conflict(String),
    #[error("{0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    /// `Cache-Control` value stored with the object.
    pub cache_control: String,
    pub content_type: String,
    /// Overwrite an existing object at the same key.
    pub upsert: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedObject {
    pub path: String,
}

/// Put/remove/public-URL capability over byte blobs keyed by `(bucket, key)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn remove(&self, bucket: &str, keys: &[String]) -> Result<(), StoreError>;

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        options: UploadOptions,
    ) -> Result<UploadedObject, StoreError>;

    /// `Ok(None)` when the store cannot produce a URL for the key.
    fn public_url(&self, bucket: &str, key: &str) -> Result<Option<String>, StoreError>;
}
