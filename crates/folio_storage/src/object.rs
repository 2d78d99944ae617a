//! Stored object descriptors and key validation.

use folio_error::{FolioResult, StorageError, StorageErrorKind};

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct StoredObject {
    /// Bucket the object was written to
    bucket: String,
    /// Key inside the bucket
    key: String,
    /// Size of the stored payload
    size_bytes: u64,
    /// MIME type recorded with the object
    content_type: String,
    /// Backend name (e.g. "supabase", "filesystem")
    storage_backend: &'static str,
}

impl StoredObject {
    /// Describe an object that has just been written.
    pub fn new(
        bucket: impl Into<String>,
        key: impl Into<String>,
        size_bytes: u64,
        content_type: impl Into<String>,
        storage_backend: &'static str,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            size_bytes,
            content_type: content_type.into(),
            storage_backend,
        }
    }
}

/// Reject bucket names or keys that could escape their namespace.
///
/// Segments are separated by `/`; empty segments, `.` and `..` are refused,
/// as are backslashes and control characters.
///
/// # Examples
///
/// ```
/// use folio_storage::validate_key;
///
/// assert!(validate_key("fetch-1700000000000-k3j2.png").is_ok());
/// assert!(validate_key("2024/cover.jpg").is_ok());
/// assert!(validate_key("../etc/passwd").is_err());
/// assert!(validate_key("").is_err());
/// ```
#[track_caller]
pub fn validate_key(key: &str) -> FolioResult<()> {
    let invalid = key.is_empty()
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        || key.chars().any(|c| c == '\\' || c.is_control());

    if invalid {
        return Err(StorageError::new(StorageErrorKind::InvalidKey(key.to_string())).into());
    }
    Ok(())
}
