//! S3 client wrapper for image uploads.

use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::config::StorageConfig;

/// Client for the image bucket.
///
/// Cheap to clone; the inner SDK client is reference-counted.
#[derive(Clone)]
pub struct StorageClient {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl StorageClient {
    /// Build a client from the given configuration.
    ///
    /// Credentials come from the SDK's default chain (environment,
    /// profile, instance metadata). `force_path_style` is enabled when an
    /// endpoint override is set, as S3-compatible servers expect it.
    pub async fn connect(config: &StorageConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.clone(),
        }
    }

    /// Upload an object under the given key.
    pub async fn put_object(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        tracing::debug!(key, bucket = %self.bucket, "uploaded object");
        Ok(())
    }

    /// Delete an object. Missing keys are not an error on S3.
    pub async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
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

        tracing::debug!(key, bucket = %self.bucket, "deleted object");
        Ok(())
    }

    /// Public URL an uploaded key is served from.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

/// Errors from the storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The upload request failed.
    #[error("Failed to upload {key}: {message}")]
    Upload { key: String, message: String },

    /// The delete request failed.
    #[error("Failed to delete {key}: {message}")]
    Delete { key: String, message: String },
}
