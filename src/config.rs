use std::fmt;

use tracing::debug;

use crate::{model::error::StoreError, util};

pub const ACCESS_KEY_ENV: &str = "ACCESSKEYID";
pub const SECRET_KEY_ENV: &str = "SECRET_KEY";
pub const REGION_ENV: &str = "REGION";
pub const BUCKET_ENV: &str = "BUCKET";
pub const ENDPOINT_URL_ENV: &str = "ENDPOINT_URL";

pub const DEFAULT_REGION: &str = "ap-south-1";
pub const DEFAULT_BUCKET: &str = "aws-s3-private-bucket-swaroop";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
}

impl Credentials {
    /// Unset and empty values are both treated as missing.
    pub fn new(
        access_key_id: Option<String>,
        secret_access_key: Option<String>,
    ) -> Result<Self, StoreError> {
        let access_key_id = access_key_id.filter(|v| !v.is_empty()).ok_or_else(|| {
            StoreError::Configuration(format!("{} is not defined", ACCESS_KEY_ENV))
        })?;
        let secret_access_key = secret_access_key.filter(|v| !v.is_empty()).ok_or_else(|| {
            StoreError::Configuration(format!("{} is not defined", SECRET_KEY_ENV))
        })?;

        Ok(Self {
            access_key_id,
            secret_access_key,
        })
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    pub credentials: Credentials,
    pub region: String,
    pub bucket: String,
    /// Set for S3-compatible services; switches to path-style addressing.
    pub endpoint_url: Option<String>,
}

impl StorageConfig {
    pub fn new(credentials: Credentials, region: &str, bucket: &str) -> Self {
        Self {
            credentials,
            region: region.to_string(),
            bucket: bucket.to_string(),
            endpoint_url: None,
        }
    }

    /// Loads `.env` when present, then reads the process environment.
    pub fn from_env() -> Result<Self, StoreError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path=%path.display(), "loaded env file"),
            Err(err) => debug!(error_message=%err, "no env file loaded"),
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::new(lookup(ACCESS_KEY_ENV), lookup(SECRET_KEY_ENV))?;
        let region = lookup(REGION_ENV)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        let bucket = lookup(BUCKET_ENV)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BUCKET.to_string());

        let mut config = Self::new(credentials, &region, &bucket);
        config.endpoint_url = lookup(ENDPOINT_URL_ENV).filter(|v| !v.is_empty());

        Ok(config)
    }

    /// Replaces the bucket; parsing is deferred to `bucket_name`.
    pub fn with_bucket(mut self, bucket_uri: &str) -> Self {
        self.bucket = bucket_uri.to_string();
        self
    }

    /// The bucket with any `s3://` scheme stripped.
    pub fn bucket_name(&self) -> Result<&str, StoreError> {
        util::object::parse_bucket(&self.bucket)
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: &str) -> Self {
        self.endpoint_url = Some(endpoint_url.to_string());
        self
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.region.trim().is_empty() {
            return Err(StoreError::Configuration("region is empty".to_string()));
        }

        self.bucket_name()?;

        if let Some(endpoint) = &self.endpoint_url {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(StoreError::Configuration(format!(
                    "endpoint url must be http(s): {}",
                    endpoint
                )));
            }
        }

        Ok(())
    }
}
