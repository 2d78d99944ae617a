//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// An object already exists under the key and upserts are disabled
    #[display("Object already exists: {}", _0)]
    AlreadyExists(String),
    /// Bucket or object key is not usable
    #[display("Invalid object key: {}", _0)]
    InvalidKey(String),
    /// Remote storage rejected the upload
    #[display("Upload rejected ({}): {}", status, message)]
    Rejected {
        /// HTTP status returned by the storage API
        status: u16,
        /// Response body or reason
        message: String,
    },
    /// Storage backend is unavailable
    #[display("Storage unavailable: {}", _0)]
    Unavailable(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use folio_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::AlreadyExists("articles/a.png".to_string()));
/// assert!(format!("{}", err).contains("already exists"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
