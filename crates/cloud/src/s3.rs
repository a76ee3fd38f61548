//! S3-compatible [`ObjectStorage`] backed by `aws-sdk-s3`.

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{BehaviorVersion, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use flamingo_core::storage::{key_from_public_url, public_base_url, DEFAULT_BUCKET};

use crate::{ObjectStorage, StorageError, StoredObject};

/// Default region when `S3_REGION` is not set.
const DEFAULT_REGION: &str = "us-east-1";

// ---------------------------------------------------------------------------
// S3Config
// ---------------------------------------------------------------------------

/// Connection settings for the image bucket.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible providers (path-style addressing).
    pub endpoint_url: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Overrides the public URL prefix derived from the endpoint.
    pub public_base_url: Option<String>,
}

impl S3Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable               | Required | Default         |
    /// |------------------------|----------|-----------------|
    /// | `S3_BUCKET`            | no       | `flamingo-cafe` |
    /// | `S3_REGION`            | no       | `us-east-1`     |
    /// | `S3_ENDPOINT_URL`      | no       | AWS             |
    /// | `S3_ACCESS_KEY_ID`     | no       | default chain   |
    /// | `S3_SECRET_ACCESS_KEY` | no       | default chain   |
    /// | `S3_PUBLIC_BASE_URL`   | no       | derived         |
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            bucket: non_empty("S3_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            region: non_empty("S3_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint_url: non_empty("S3_ENDPOINT_URL"),
            access_key_id: non_empty("S3_ACCESS_KEY_ID"),
            secret_access_key: non_empty("S3_SECRET_ACCESS_KEY"),
            public_base_url: non_empty("S3_PUBLIC_BASE_URL"),
        }
    }

    /// Public URL prefix for objects in the bucket (no trailing slash).
    pub fn resolved_public_base_url(&self) -> String {
        match &self.public_base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => public_base_url(self.endpoint_url.as_deref(), &self.bucket, &self.region),
        }
    }
}

// ---------------------------------------------------------------------------
// S3Storage
// ---------------------------------------------------------------------------

/// Image bucket client.
pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3Storage {
    /// Build a client from configuration.
    ///
    /// Static keys are used when both are configured; otherwise credentials
    /// come from the default AWS provider chain.
    pub async fn connect(config: &S3Config) -> Self {
        let region = Region::new(config.region.clone());

        let mut builder = match (&config.access_key_id, &config.secret_access_key) {
            (Some(key_id), Some(secret)) => aws_sdk_s3::config::Builder::new()
                .behavior_version(BehaviorVersion::latest())
                .region(region)
                .credentials_provider(Credentials::new(
                    key_id.clone(),
                    secret.clone(),
                    None,
                    None,
                    "flamingo-env",
                )),
            _ => {
                let shared = aws_config::defaults(BehaviorVersion::latest())
                    .region(region)
                    .load()
                    .await;
                aws_sdk_s3::config::Builder::from(&shared)
            }
        };

        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let public_base_url = config.resolved_public_base_url();
        tracing::info!(
            bucket = %config.bucket,
            endpoint = config.endpoint_url.as_deref().unwrap_or("aws"),
            public_base_url = %public_base_url,
            "Object storage configured",
        );

        Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            public_base_url,
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        tracing::info!(key, size, "Object uploaded");
        Ok(StoredObject {
            key: key.to_string(),
            url: self.public_url(key),
        })
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Delete {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        tracing::info!(key, "Object deleted");
        Ok(())
    }

    fn key_for_url(&self, url: &str) -> Option<String> {
        key_from_public_url(&self.public_base_url, url)
    }
}
