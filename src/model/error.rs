use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("remote error: {0}")]
    Remote(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),
}

impl StoreError {
    /// Signing requests report bad keys as signing failures.
    pub fn into_signing(self) -> Self {
        match self {
            StoreError::InvalidKey(message) => StoreError::Signing(message),
            other => other,
        }
    }
}
