use std::time::Duration;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{
    config::Credentials,
    error::{DisplayErrorContext, ProvideErrorMetadata},
    presigning::{PresignedRequest, PresigningConfig},
    primitives::DateTime,
};
use futures::{future::BoxFuture, FutureExt};
use time::OffsetDateTime;
use tracing::debug;

use crate::{
    adapters,
    config::StorageConfig,
    model::{
        error::StoreError,
        object::{
            DeleteResult, ObjectListing, ObjectSummary, Operation, PresignedUrl,
            PresignedUrlRequest,
        },
    },
};

const CREDENTIALS_SOURCE: &str = "objecturl";

/// Builds an S3 client bound to the configured region and static credentials.
/// A custom endpoint switches the client to path-style addressing.
pub async fn build_client(config: &StorageConfig) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        config.credentials.access_key_id(),
        config.credentials.secret_access_key(),
        None,
        None,
        CREDENTIALS_SOURCE,
    );

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .credentials_provider(credentials);

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.endpoint_url.is_some())
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}

fn to_presigned_url(presigned: PresignedRequest, expiry_seconds: u64) -> PresignedUrl {
    PresignedUrl {
        url: presigned.uri().to_string(),
        method: presigned.method().to_string(),
        headers: presigned
            .headers()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        expiry_seconds,
    }
}

fn to_offset_date_time(date_time: &DateTime) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(date_time.as_nanos()).ok()
}

impl adapters::adapter::ObjectAdapter for aws_sdk_s3::Client {
    fn presign<'a>(
        &'a self,
        request: &'a PresignedUrlRequest,
    ) -> BoxFuture<'a, Result<PresignedUrl, StoreError>> {
        async move {
            let target = &request.target;
            debug!(method=request.operation.method(), key=target.key.as_str(), "presigning");
            let presigning_config = PresigningConfig::builder()
                .expires_in(Duration::from_secs(request.expiry_seconds))
                .build()
                .map_err(|err| {
                    StoreError::Signing(format!(
                        "invalid presigning config for: {}, {}",
                        target.key, err
                    ))
                })?;

            let presigned = match request.operation {
                Operation::Read => self
                    .get_object()
                    .bucket(&target.bucket)
                    .key(&target.key)
                    .presigned(presigning_config)
                    .await
                    .map_err(|err| {
                        StoreError::Signing(format!(
                            "failed to presign get_object at: {}, {}",
                            target.key,
                            DisplayErrorContext(&err)
                        ))
                    })?,
                Operation::Write => self
                    .put_object()
                    .bucket(&target.bucket)
                    .key(&target.key)
                    .set_content_type(request.content_type.clone())
                    .presigned(presigning_config)
                    .await
                    .map_err(|err| {
                        StoreError::Signing(format!(
                            "failed to presign put_object at: {}, {}",
                            target.key,
                            DisplayErrorContext(&err)
                        ))
                    })?,
            };

            Ok(to_presigned_url(presigned, request.expiry_seconds))
        }
        .boxed()
    }

    fn list_objects<'a>(
        &'a self,
        bucket: &'a str,
        prefix: Option<&'a str>,
    ) -> BoxFuture<'a, Result<ObjectListing, StoreError>> {
        async move {
            let lo = self
                .list_objects_v2()
                .bucket(bucket)
                .set_prefix(prefix.map(str::to_string))
                .send()
                .await
                .map_err(|err| {
                    StoreError::Remote(format!(
                        "failed to list_objects at: {}, {}",
                        prefix.unwrap_or("/"),
                        DisplayErrorContext(&err)
                    ))
                })?;

            let objects = lo
                .contents()
                .iter()
                .map(|o| ObjectSummary {
                    key: o.key().unwrap_or("").to_string(),
                    size: o.size().unwrap_or(0),
                    last_modified: o.last_modified().and_then(to_offset_date_time),
                })
                .collect();

            Ok(ObjectListing {
                objects,
                is_truncated: lo.is_truncated().unwrap_or(false),
            })
        }
        .boxed()
    }

    fn delete_object<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
    ) -> BoxFuture<'a, Result<DeleteResult, StoreError>> {
        async move {
            let out = match self.delete_object().bucket(bucket).key(key).send().await {
                Ok(out) => out,
                Err(err) => {
                    // S3 answers 204 for missing keys; some compatible services 404 instead.
                    if let Some(svc_err) = err.as_service_error() {
                        if svc_err.code() == Some("NoSuchKey") {
                            debug!(key=key, "object already absent");
                            return Ok(DeleteResult {
                                key: key.to_string(),
                                ..Default::default()
                            });
                        }
                    }

                    return Err(StoreError::Remote(format!(
                        "failed to delete_object: {}, {}",
                        key,
                        DisplayErrorContext(&err)
                    )));
                }
            };

            Ok(DeleteResult {
                key: key.to_string(),
                delete_marker: out.delete_marker(),
                version_id: out.version_id().map(str::to_string),
            })
        }
        .boxed()
    }
}
