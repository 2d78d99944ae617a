//! Error types for the Folio workspace.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! Two errors matter to the article pipeline: [`FetchError`] aborts a request,
//! while [`AssetError`] only ever describes a single skipped image.
//!
//! # Examples
//!
//! ```
//! use folio_error::{FetchError, FetchErrorKind, FolioResult};
//!
//! fn fetch_rendition() -> FolioResult<String> {
//!     Err(FetchError::new(FetchErrorKind::Status(502)))?
//! }
//!
//! match fetch_rendition() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod config;
mod error;
mod fetch;
mod storage;

pub use asset::{AssetError, AssetErrorKind};
pub use config::ConfigError;
pub use error::{FolioError, FolioErrorKind, FolioResult};
pub use fetch::{FetchError, FetchErrorKind};
pub use storage::{StorageError, StorageErrorKind};
