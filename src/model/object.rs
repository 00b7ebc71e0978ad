use std::fmt;

use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

impl Operation {
    pub fn method(&self) -> &'static str {
        match self {
            Operation::Read => "GET",
            Operation::Write => "PUT",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageTarget {
    pub bucket: String,
    pub key: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresignedUrlRequest {
    pub target: StorageTarget,
    pub operation: Operation,
    /// Only meaningful for `Operation::Write`.
    pub content_type: Option<String>,
    pub expiry_seconds: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresignedUrl {
    pub url: String,
    pub method: String,
    /// Headers the caller must send along with the request, already signed.
    pub headers: Vec<(String, String)>,
    pub expiry_seconds: u64,
}

impl PresignedUrl {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for PresignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectListing {
    pub objects: Vec<ObjectSummary>,
    /// Set when the service holds more pages; they are never fetched.
    pub is_truncated: bool,
}

impl ObjectListing {
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteResult {
    pub key: String,
    pub delete_marker: Option<bool>,
    pub version_id: Option<String>,
}
