//! Storage trait definition.

use crate::StoredObject;
use folio_error::FolioResult;

/// Trait for pluggable public object storage backends.
#[async_trait::async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `data` under `bucket`/`key`.
    ///
    /// Implementations must not overwrite an existing object; a key collision
    /// is reported as [`StorageErrorKind::AlreadyExists`](crate::StorageErrorKind).
    ///
    /// # Arguments
    ///
    /// * `bucket` - Bucket (top-level namespace) to write into
    /// * `key` - Object key inside the bucket
    /// * `data` - Raw object bytes
    /// * `content_type` - MIME type recorded with the object
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> FolioResult<StoredObject>;

    /// Public URL an object is served from.
    ///
    /// This is a pure computation; it does not check that the object exists.
    fn public_url(&self, bucket: &str, key: &str) -> FolioResult<String>;

    /// Short backend name used in logs.
    fn backend_name(&self) -> &'static str;
}
