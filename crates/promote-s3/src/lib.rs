//! AWS S3 implementation of the [`StorageClient`] gateway.
//!
//! Credentials, profiles, and region resolution go through the
//! `aws-config` provider chain (environment, shared config, SSO, IAM
//! roles). This crate only issues three calls: `ListObjectsV2` for the
//! existence check, `CopyObject` for the server-side copy, and
//! `GetBucketLocation` for region detection.

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::Client;
use tracing::{debug, info};

use promote_core::storage::{StorageClient, StorageError, StorageResult};

/// S3-backed storage client.
pub struct S3StorageClient {
    client: Client,
}

impl S3StorageClient {
    /// Wrap an already-configured SDK client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default provider chain, optionally pinned
    /// to a named profile and/or region.
    pub async fn from_env(profile: Option<&str>, region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(profile) = profile {
            info!(profile = %profile, "Using AWS profile");
            loader = loader.profile_name(profile);
        }
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;
        Self {
            client: Client::new(&config),
        }
    }

    fn map_error<E>(err: E) -> StorageError
    where
        E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    {
        let message = DisplayErrorContext(&err).to_string();
        match err.code() {
            Some("AccessDenied") | Some("403") => StorageError::AccessDenied(message),
            _ => StorageError::Backend(message),
        }
    }
}

#[async_trait]
impl StorageClient for S3StorageClient {
    /// Existence check via listing filtered to the exact key, so the
    /// check path only needs `s3:ListBucket`. The exact key always sorts
    /// first among keys sharing it as a prefix, so one result suffices.
    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        debug!(bucket = %bucket, key = %key, "Checking object existence");
        let response = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(key)
            .max_keys(1)
            .send()
            .await
            .map_err(Self::map_error)?;

        Ok(response
            .contents()
            .iter()
            .any(|object| object.key() == Some(key)))
    }

    /// Server-side copy within the bucket; content type and metadata are
    /// carried over by S3, the destination is overwritten unconditionally.
    async fn copy(
        &self,
        bucket: &str,
        source_key: &str,
        destination_key: &str,
    ) -> StorageResult<()> {
        debug!(
            bucket = %bucket,
            source_key = %source_key,
            destination_key = %destination_key,
            "Copying object"
        );
        self.client
            .copy_object()
            .bucket(bucket)
            .copy_source(format!("{}/{}", bucket, source_key))
            .key(destination_key)
            .send()
            .await
            .map_err(Self::map_error)?;

        Ok(())
    }

    /// `GetBucketLocation` reports no constraint for the default region.
    async fn detect_region(&self, bucket: &str) -> StorageResult<String> {
        let response = self
            .client
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .map_err(Self::map_error)?;

        let region = match response.location_constraint() {
            Some(constraint) if !constraint.as_str().is_empty() => constraint.as_str().to_string(),
            _ => "us-east-1".to_string(),
        };
        info!(bucket = %bucket, region = %region, "Detected bucket region");
        Ok(region)
    }
}
