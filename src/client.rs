use tracing::{error, info};

use crate::{
    adapters,
    config::StorageConfig,
    model::{
        error::StoreError,
        object::{
            DeleteResult, ObjectListing, Operation, PresignedUrl, PresignedUrlRequest,
            StorageTarget,
        },
    },
    util,
};

/// Thin client over a single bucket. Holds no per-call state, so one instance
/// can be shared between concurrent callers.
pub struct ObjectStorageClient {
    client: Box<dyn adapters::adapter::ObjectAdapter>,
    bucket: String,
}

impl ObjectStorageClient {
    /// Validates `config` before building the S3 client; nothing is sent.
    pub async fn connect(config: &StorageConfig) -> Result<Self, StoreError> {
        config.validate()?;

        let bucket = config.bucket_name()?;

        let client = adapters::s3::build_client(config).await;
        info!(bucket=bucket, region=%config.region, "connected");

        Ok(Self::new(Box::new(client), bucket))
    }

    pub fn new(client: Box<dyn adapters::adapter::ObjectAdapter>, bucket: &str) -> Self {
        Self {
            client,
            bucket: bucket.to_string(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub async fn generate_download_url(
        &self,
        key: &str,
        expiry_seconds: Option<u64>,
    ) -> Result<PresignedUrl, StoreError> {
        let expiry_seconds = expiry_seconds.unwrap_or(util::key::DOWNLOAD_EXPIRY_SECONDS);
        info!(key=key, expiry_seconds=expiry_seconds, "called");

        util::key::validate_key(key).map_err(StoreError::into_signing)?;
        util::key::validate_expiry(expiry_seconds)?;

        let request = PresignedUrlRequest {
            target: self.target(key),
            operation: Operation::Read,
            content_type: None,
            expiry_seconds,
        };

        self.presign(&request).await
    }

    pub async fn generate_upload_url(
        &self,
        filename: &str,
        content_type: &str,
        expiry_seconds: Option<u64>,
    ) -> Result<PresignedUrl, StoreError> {
        let expiry_seconds = expiry_seconds.unwrap_or(util::key::UPLOAD_EXPIRY_SECONDS);
        info!(filename=filename, content_type=content_type, expiry_seconds=expiry_seconds, "called");

        let key = util::key::upload_key(filename).map_err(StoreError::into_signing)?;
        util::key::validate_expiry(expiry_seconds)?;

        if content_type.trim().is_empty() {
            return Err(StoreError::Signing(format!(
                "content type is empty for: {}",
                key
            )));
        }

        let request = PresignedUrlRequest {
            target: self.target(&key),
            operation: Operation::Write,
            content_type: Some(content_type.to_string()),
            expiry_seconds,
        };

        self.presign(&request).await
    }

    /// `"/"` lists from the bucket root. Only the first page is returned.
    pub async fn list_objects(&self, prefix: &str) -> Result<ObjectListing, StoreError> {
        info!(prefix=prefix, "called");

        let listing = self
            .client
            .list_objects(&self.bucket, util::key::normalize_prefix(prefix))
            .await
            .inspect_err(|err| error!(error_message=%err, error_group="list_objects"))?;

        info!(count=listing.objects.len(), is_truncated=listing.is_truncated, "listed");
        Ok(listing)
    }

    /// Deletes `uploads/user-upload/<filename>`. A missing object is not an error.
    pub async fn delete_object(&self, filename: &str) -> Result<DeleteResult, StoreError> {
        info!(filename=filename, "called");

        let key = util::key::upload_key(filename)?;

        self.client
            .delete_object(&self.bucket, &key)
            .await
            .inspect_err(|err| error!(error_message=%err, error_group="delete_object"))
    }

    fn target(&self, key: &str) -> StorageTarget {
        StorageTarget {
            bucket: self.bucket.clone(),
            key: key.to_string(),
        }
    }

    async fn presign(&self, request: &PresignedUrlRequest) -> Result<PresignedUrl, StoreError> {
        self.client
            .presign(request)
            .await
            .inspect_err(|err| error!(error_message=%err, error_group="presign"))
    }
}
