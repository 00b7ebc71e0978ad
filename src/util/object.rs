use crate::model::error::StoreError;

/// Accepts either a bare bucket name or an `s3://` URI.
pub fn parse_bucket(bucket_uri: &str) -> Result<&str, StoreError> {
    let bucket = match bucket_uri.split_once("://") {
        Some(("s3", rest)) => rest.trim_end_matches('/'),
        Some((scheme, _)) => {
            return Err(StoreError::Configuration(format!(
                "unsupported bucket scheme `{}` in: {}",
                scheme, bucket_uri
            )))
        }
        None => bucket_uri,
    };

    if bucket.is_empty() || bucket.contains('/') {
        return Err(StoreError::Configuration(format!(
            "failed to parse bucket of: {}",
            bucket_uri
        )));
    }

    Ok(bucket)
}
