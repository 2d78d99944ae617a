//! Content fetcher errors.
//!
//! A fetch error aborts the whole article request and is reported to the
//! caller as a 500.

/// Reasons a rendition could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FetchErrorKind {
    /// The source URL could not be parsed
    #[display("Invalid source URL: {}", _0)]
    InvalidUrl(String),
    /// The request never produced a response
    #[display("Request failed: {}", _0)]
    Transport(String),
    /// The upstream service answered with a non-success status
    #[display("Upstream returned status {}", _0)]
    Status(u16),
    /// The response body could not be read as text
    #[display("Unreadable response body: {}", _0)]
    Body(String),
    /// The page was fetched but its content could not be located
    #[display("Content not found: {}", _0)]
    ContentNotFound(String),
}

/// Fetch error with location tracking.
///
/// # Examples
///
/// ```
/// use folio_error::{FetchError, FetchErrorKind};
///
/// let err = FetchError::new(FetchErrorKind::Status(503));
/// assert_eq!(err.kind, FetchErrorKind::Status(503));
/// assert!(format!("{}", err).contains("503"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Fetch Error: {} at line {} in {}", kind, line, file)]
pub struct FetchError {
    /// The kind of error that occurred
    pub kind: FetchErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl FetchError {
    /// Create a new fetch error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: FetchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
