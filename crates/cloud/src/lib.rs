//! Object storage for uploaded menu and gallery images.
//!
//! Handlers depend on the [`ObjectStorage`] trait; [`s3::S3Storage`] is the
//! production implementation against any S3-compatible endpoint.

use async_trait::async_trait;
use serde::Serialize;

pub mod s3;

/// Error type for object storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Upload failed for '{key}': {message}")]
    Upload { key: String, message: String },

    #[error("Delete failed for '{key}': {message}")]
    Delete { key: String, message: String },

    #[error("Storage configuration error: {0}")]
    Config(String),
}

/// A stored object and the public URL it is served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredObject {
    pub key: String,
    pub url: String,
}

/// An S3-compatible bucket.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `key`, replacing any existing object.
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError>;

    /// Remove the object under `key`. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// The object key behind a public URL, if the URL points into this bucket.
    fn key_for_url(&self, url: &str) -> Option<String>;
}
