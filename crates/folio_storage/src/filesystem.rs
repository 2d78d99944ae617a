//! Filesystem-backed object storage.
//!
//! Objects are written under `{base_path}/{bucket}/{key}` and are expected to
//! be served by a static file server rooted at `base_path`.

use crate::{ObjectStorage, StoredObject, validate_key};
use folio_error::{FolioResult, StorageError, StorageErrorKind};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;

/// Filesystem storage backend.
///
/// # Example Structure
///
/// ```text
/// /var/folio/media/
/// └── articles/
///     ├── fetch-1700000000000-0k9x2m4a.png
///     └── fetch-1700000000042-p1q8z7c3.jpg
/// ```
///
/// # Features
///
/// - **No overwrites**: writing to an existing key fails with `AlreadyExists`
/// - **Atomic writes**: a private temp file is hard-linked into place, so readers
///   never see partial objects and concurrent writers cannot clobber each other
pub struct FileSystemStorage {
    base_path: PathBuf,
    public_base_url: String,
}

impl FileSystemStorage {
    /// Create a new filesystem storage backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `base_path` - Root directory for stored objects
    /// * `public_base_url` - URL prefix the root directory is served under
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip_all)]
    pub fn new(
        base_path: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
    ) -> FolioResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        tracing::info!(
            path = %base_path.display(),
            public_base_url = %public_base_url,
            "Created filesystem storage"
        );
        Ok(Self {
            base_path,
            public_base_url,
        })
    }

    fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.base_path.join(bucket).join(key)
    }
}

#[async_trait::async_trait]
impl ObjectStorage for FileSystemStorage {
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> FolioResult<StoredObject> {
        validate_key(bucket)?;
        validate_key(key)?;

        let path = self.object_path(bucket, key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let temp_path = temp_path_for(&path);
        let written = write_new(&temp_path, data).await;
        let published = match written {
            Ok(()) => publish(&temp_path, &path, bucket, key).await,
            Err(e) => Err(e),
        };
        if let Err(e) = tokio::fs::remove_file(&temp_path).await {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!(
                    path = %temp_path.display(),
                    error = %e,
                    "Failed to remove temp file"
                );
            }
        }
        published?;

        tracing::debug!(path = %path.display(), size = data.len(), "Stored object");

        Ok(StoredObject::new(
            bucket,
            key,
            data.len() as u64,
            content_type,
            self.backend_name(),
        ))
    }

    fn public_url(&self, bucket: &str, key: &str) -> FolioResult<String> {
        validate_key(bucket)?;
        validate_key(key)?;
        Ok(format!("{}/{}/{}", self.public_base_url, bucket, key))
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Per-write temp path next to the final object.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(
        ".{}.{}.tmp",
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    PathBuf::from(name)
}

async fn write_new(path: &Path, data: &[u8]) -> Result<(), StorageError> {
    let write_error = |e: std::io::Error| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    };

    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(write_error)?;
    file.write_all(data).await.map_err(write_error)?;
    file.sync_all().await.map_err(write_error)?;
    Ok(())
}

/// Link the finished temp file into place. Never replaces an existing object.
async fn publish(
    temp_path: &Path,
    path: &Path,
    bucket: &str,
    key: &str,
) -> Result<(), StorageError> {
    tokio::fs::hard_link(temp_path, path).await.map_err(|e| {
        if e.kind() == ErrorKind::AlreadyExists {
            StorageError::new(StorageErrorKind::AlreadyExists(format!("{}/{}", bucket, key)))
        } else {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "link {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        }
    })
}
