//! S3-compatible object storage client
//!
//! Uses rust-s3 for request signing; objects are never proxied through this
//! service, callers receive a presigned GET URL instead.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::info;

use crate::core::config::StorageConfig;
use crate::core::error::AppError;

/// Issues time-limited read URLs for private objects
#[async_trait]
pub trait SignedUrlIssuer: Send + Sync {
    async fn create_signed_url(
        &self,
        bucket: &str,
        path: &str,
        ttl_secs: u32,
    ) -> Result<String, AppError>;
}

/// MinIO/S3-compatible storage client
pub struct ObjectStorageClient {
    region: Region,
    credentials: Credentials,
}

impl ObjectStorageClient {
    pub fn new(config: &StorageConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create storage credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        info!(
            "Object storage client initialized for endpoint: {}, bucket: {}",
            config.endpoint, config.verification_bucket
        );

        Ok(Self {
            region,
            credentials,
        })
    }

    fn bucket(&self, name: &str) -> Result<Box<Bucket>, AppError> {
        let mut bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to open bucket '{}': {}", name, e)))?;

        // Path-style URLs (http://endpoint/bucket) work with MinIO and S3 alike
        bucket.set_path_style();
        Ok(bucket)
    }
}

#[async_trait]
impl SignedUrlIssuer for ObjectStorageClient {
    async fn create_signed_url(
        &self,
        bucket: &str,
        path: &str,
        ttl_secs: u32,
    ) -> Result<String, AppError> {
        let key = object_key(path).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid object path '{}'", path))
        })?;

        self.bucket(bucket)?
            .presign_get(key, ttl_secs, None)
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!(
                    "Failed to generate signed URL for '{}/{}': {}",
                    bucket, key, e
                ))
            })
    }
}

/// Object key for a stored path, without leading slashes; `None` when blank
pub fn object_key(path: &str) -> Option<&str> {
    let key = path.trim().trim_start_matches('/');
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}
