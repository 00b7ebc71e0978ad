use futures::future::BoxFuture;

use crate::model::{
    error::StoreError,
    object::{DeleteResult, ObjectListing, PresignedUrlRequest, PresignedUrl},
};

/// Backend seam for `ObjectStorageClient`. Each call is one independent
/// request; implementations hold no per-call state.
pub trait ObjectAdapter: Send + Sync {
    fn presign<'a>(
        &'a self,
        request: &'a PresignedUrlRequest,
    ) -> BoxFuture<'a, Result<PresignedUrl, StoreError>>;

    /// Returns a single page; continuation tokens are not followed.
    fn list_objects<'a>(
        &'a self,
        bucket: &'a str,
        prefix: Option<&'a str>,
    ) -> BoxFuture<'a, Result<ObjectListing, StoreError>>;

    /// Deleting a missing key succeeds.
    fn delete_object<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
    ) -> BoxFuture<'a, Result<DeleteResult, StoreError>>;
}
