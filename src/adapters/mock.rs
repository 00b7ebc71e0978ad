use std::{
    collections::BTreeMap,
    sync::Mutex,
};

use futures::future::{self, BoxFuture, FutureExt};

use crate::{
    adapters,
    model::{
        error::StoreError,
        object::{DeleteResult, ObjectListing, ObjectSummary, PresignedUrl, PresignedUrlRequest},
    },
};

/// In-memory bucket keyed by object key. `offline` makes every remote call fail.
#[derive(Default)]
pub struct MockClient {
    pub objects: Mutex<BTreeMap<String, i64>>,
    pub offline: bool,
}

impl MockClient {
    pub fn with_objects(keys: &[(&str, i64)]) -> Self {
        Self {
            objects: Mutex::new(keys.iter().map(|(k, s)| (k.to_string(), *s)).collect()),
            offline: false,
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Default::default()
        }
    }
}

impl adapters::adapter::ObjectAdapter for MockClient {
    fn presign<'a>(
        &'a self,
        request: &'a PresignedUrlRequest,
    ) -> BoxFuture<'a, Result<PresignedUrl, StoreError>> {
        let headers = request
            .content_type
            .iter()
            .map(|ct| ("content-type".to_string(), ct.clone()))
            .collect();

        future::ready(Ok(PresignedUrl {
            url: format!(
                "https://{}.mock.invalid/{}?X-Amz-Expires={}",
                request.target.bucket, request.target.key, request.expiry_seconds
            ),
            method: request.operation.method().to_string(),
            headers,
            expiry_seconds: request.expiry_seconds,
        }))
        .boxed()
    }

    fn list_objects<'a>(
        &'a self,
        _bucket: &'a str,
        prefix: Option<&'a str>,
    ) -> BoxFuture<'a, Result<ObjectListing, StoreError>> {
        if self.offline {
            return future::ready(Err(StoreError::Remote("mock is offline".to_string()))).boxed();
        }

        let objects = self
            .objects
            .lock()
            .expect("failed to acquire `objects` guard")
            .iter()
            .filter(|(key, _)| prefix.map_or(true, |p| key.starts_with(p)))
            .map(|(key, size)| ObjectSummary {
                key: key.clone(),
                size: *size,
                last_modified: None,
            })
            .collect();

        future::ready(Ok(ObjectListing {
            objects,
            is_truncated: false,
        }))
        .boxed()
    }

    fn delete_object<'a>(
        &'a self,
        _bucket: &'a str,
        key: &'a str,
    ) -> BoxFuture<'a, Result<DeleteResult, StoreError>> {
        if self.offline {
            return future::ready(Err(StoreError::Remote("mock is offline".to_string()))).boxed();
        }

        self.objects
            .lock()
            .expect("failed to acquire `objects` guard")
            .remove(key);

        future::ready(Ok(DeleteResult {
            key: key.to_string(),
            ..Default::default()
        }))
        .boxed()
    }
}
