//! Top-level error wrapper types.

use crate::{AssetError, ConfigError, FetchError, StorageError};

/// Every error condition a Folio crate can surface.
///
/// # Examples
///
/// ```
/// use folio_error::{FolioError, StorageError, StorageErrorKind};
///
/// let storage_err = StorageError::new(StorageErrorKind::Unavailable("timed out".to_string()));
/// let err: FolioError = storage_err.into();
/// assert!(format!("{}", err).contains("Storage Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FolioErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Object storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Rendition could not be fetched
    #[from(FetchError)]
    Fetch(FetchError),
    /// A single asset could not be rehosted
    #[from(AssetError)]
    Asset(AssetError),
}

/// Folio error with kind discrimination.
///
/// # Examples
///
/// ```
/// use folio_error::{ConfigError, FolioErrorKind, FolioResult};
///
/// fn might_fail() -> FolioResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), FolioErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Folio Error: {}", _0)]
pub struct FolioError(Box<FolioErrorKind>);

impl FolioError {
    /// Create a new error from a kind.
    pub fn new(kind: FolioErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FolioErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to FolioErrorKind
impl<T> From<T> for FolioError
where
    T: Into<FolioErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Folio operations.
pub type FolioResult<T> = std::result::Result<T, FolioError>;
