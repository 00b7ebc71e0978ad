use crate::model::error::StoreError;

pub const UPLOAD_PREFIX: &str = "uploads/user-upload";

pub const DOWNLOAD_EXPIRY_SECONDS: u64 = 20;
pub const UPLOAD_EXPIRY_SECONDS: u64 = 900;
/// SigV4 refuses anything longer than seven days.
pub const MAX_EXPIRY_SECONDS: u64 = 604_800;

const MAX_KEY_LEN: usize = 1024;

pub fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey("key is empty".to_string()));
    }

    if key.len() > MAX_KEY_LEN {
        return Err(StoreError::InvalidKey(format!(
            "key exceeds {} bytes: {}",
            MAX_KEY_LEN,
            key.len()
        )));
    }

    if key.chars().any(char::is_control) {
        return Err(StoreError::InvalidKey(format!(
            "key contains control characters: {:?}",
            key
        )));
    }

    Ok(())
}

pub fn validate_filename(filename: &str) -> Result<(), StoreError> {
    validate_key(filename)?;

    if filename.contains('/') {
        return Err(StoreError::InvalidKey(format!(
            "filename must not contain `/`: {}",
            filename
        )));
    }

    Ok(())
}

pub fn upload_key(filename: &str) -> Result<String, StoreError> {
    validate_filename(filename)?;

    Ok(format!("{}/{}", UPLOAD_PREFIX, filename))
}

/// `"/"` and `""` both mean the bucket root.
pub fn normalize_prefix(prefix: &str) -> Option<&str> {
    match prefix {
        "" | "/" => None,
        p => Some(p),
    }
}

pub fn validate_expiry(expiry_seconds: u64) -> Result<(), StoreError> {
    if expiry_seconds == 0 || expiry_seconds > MAX_EXPIRY_SECONDS {
        return Err(StoreError::Signing(format!(
            "expiry must be within 1..={} seconds, got: {}",
            MAX_EXPIRY_SECONDS, expiry_seconds
        )));
    }

    Ok(())
}
