//! Per-asset rehosting errors.

/// Reasons a single media reference was left unrehosted.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum AssetErrorKind {
    /// Only http(s) references are rehosted
    #[display("Not an http(s) reference")]
    NotHttp,
    /// The download request failed before a response arrived
    #[display("Download failed: {}", _0)]
    Download(String),
    /// The asset host answered with a non-success status
    #[display("Download returned status {}", _0)]
    Status(u16),
    /// The storage backend refused the upload
    #[display("Upload failed: {}", _0)]
    Upload(String),
}

/// Asset error with location tracking.
///
/// # Examples
///
/// ```
/// use folio_error::{AssetError, AssetErrorKind};
///
/// let err = AssetError::new(AssetErrorKind::Status(403));
/// assert!(format!("{}", err).contains("403"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Asset Error: {} at line {} in {}", kind, line, file)]
pub struct AssetError {
    /// The kind of error that occurred
    pub kind: AssetErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AssetError {
    /// Create a new asset error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AssetErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
