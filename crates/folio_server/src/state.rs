//! Process-wide collaborators, built once at startup.

use crate::{FolioConfig, StorageBackend, StorageSettings};
use folio_error::{ConfigError, FolioResult};
use folio_ingest::{ArticlePipeline, AssetRehoster};
use folio_storage::{FileSystemStorage, ObjectStorage, SupabaseStorage};
use std::sync::Arc;

/// Construct the configured storage backend.
///
/// # Errors
///
/// Returns an error if Supabase credentials are missing or the filesystem
/// root cannot be created.
pub fn build_storage(
    settings: &StorageSettings,
    client: reqwest::Client,
) -> FolioResult<Arc<dyn ObjectStorage>> {
    match settings.backend() {
        StorageBackend::Supabase => {
            let url = settings
                .supabase_url()
                .as_deref()
                .ok_or_else(|| ConfigError::new("storage.supabase_url is not set"))?;
            let key = settings
                .supabase_key()
                .as_deref()
                .ok_or_else(|| ConfigError::new("storage.supabase_key is not set"))?;
            Ok(Arc::new(SupabaseStorage::with_client(url, key, client)?))
        }
        StorageBackend::Filesystem => Ok(Arc::new(FileSystemStorage::new(
            settings.base_path(),
            settings.public_base_url().clone(),
        )?)),
    }
}

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<ArticlePipeline>,
}

impl AppState {
    /// Wrap an already assembled pipeline.
    pub fn new(pipeline: ArticlePipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Build storage, rehoster and pipeline from configuration.
    ///
    /// `client` is shared by the reader, the WeChat fetcher, image downloads
    /// and Supabase uploads.
    pub fn from_config(config: &FolioConfig, client: reqwest::Client) -> FolioResult<Self> {
        let storage = build_storage(config.storage(), client.clone())?;
        tracing::info!(
            backend = storage.backend_name(),
            bucket = %config.rehost().bucket(),
            "Storage ready"
        );

        let rehoster = AssetRehoster::new(client.clone(), storage, config.rehost().clone());
        let pipeline = ArticlePipeline::with_reader(
            client,
            config.reader().clone(),
            rehoster,
            config.article().clone(),
        );
        Ok(Self::new(pipeline))
    }

    /// Get the ingestion pipeline.
    pub fn pipeline(&self) -> &ArticlePipeline {
        &self.pipeline
    }
}
