//! Public object storage for rehosted article assets.
//!
//! The article pipeline only ever needs two things from storage: write an
//! object under a fresh key, then learn the public URL it is served from.
//! [`ObjectStorage`] captures exactly that, with two backends:
//!
//! - [`SupabaseStorage`]: the Supabase Storage REST API
//! - [`FileSystemStorage`]: a local directory fronted by a static file server
//!
//! A storage client is built once at process start and shared behind an
//! `Arc<dyn ObjectStorage>`.
//!
//! # Example
//!
//! ```rust
//! use folio_storage::{FileSystemStorage, ObjectStorage};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = FileSystemStorage::new("/tmp/folio", "http://localhost:8080/files")?;
//! let stored = storage
//!     .upload("articles", "fetch-1-abc.png", b"\x89PNG", "image/png")
//!     .await?;
//! assert_eq!(stored.key(), "fetch-1-abc.png");
//!
//! let url = storage.public_url("articles", "fetch-1-abc.png")?;
//! assert_eq!(url, "http://localhost:8080/files/articles/fetch-1-abc.png");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod object;
mod storage;
mod supabase;

pub use filesystem::FileSystemStorage;
pub use folio_error::{StorageError, StorageErrorKind};
pub use object::{StoredObject, validate_key};
pub use storage::ObjectStorage;
pub use supabase::SupabaseStorage;
