//! Bounded fan-out download and re-upload of image references.

use crate::naming::{derive_extension, object_key};
use crate::{BROWSER_USER_AGENT, RehostReport, RehostedAsset};
use folio_error::{AssetError, AssetErrorKind, ConfigError};
use folio_storage::ObjectStorage;
use futures::{StreamExt, stream};
use reqwest::header;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

/// Settings for the asset rehoster.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct RehostSettings {
    /// Bucket every rehosted image is written to
    bucket: String,

    /// Maximum number of references processed at once within one request
    concurrency: usize,

    /// Extension used when none can be derived from the URL
    default_extension: String,

    /// Leading component of generated object keys
    key_prefix: String,

    /// Content type recorded when the image host sends none
    default_content_type: String,

    /// User-Agent sent with image downloads
    user_agent: String,
}

impl Default for RehostSettings {
    fn default() -> Self {
        Self {
            bucket: "articles".to_string(),
            concurrency: 4,
            default_extension: "jpg".to_string(),
            key_prefix: "fetch".to_string(),
            default_content_type: "image/jpeg".to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl RehostSettings {
    /// Check the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero concurrency or an empty bucket.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::new("rehost.concurrency must be at least 1"));
        }
        if self.bucket.is_empty() {
            return Err(ConfigError::new("rehost.bucket must not be empty"));
        }
        Ok(())
    }
}

/// Copies third-party images into owned storage.
///
/// Each reference is handled independently: a failed download or upload is
/// recorded in the [`RehostReport`] and never affects its siblings.
#[derive(Clone)]
pub struct AssetRehoster {
    client: reqwest::Client,
    storage: Arc<dyn ObjectStorage>,
    settings: RehostSettings,
}

impl AssetRehoster {
    /// Create a rehoster writing through `storage`.
    pub fn new(
        client: reqwest::Client,
        storage: Arc<dyn ObjectStorage>,
        settings: RehostSettings,
    ) -> Self {
        tracing::debug!(
            backend = storage.backend_name(),
            bucket = %settings.bucket,
            concurrency = settings.concurrency,
            "Creating asset rehoster"
        );
        Self {
            client,
            storage,
            settings,
        }
    }

    /// Get the rehoster settings.
    pub fn settings(&self) -> &RehostSettings {
        &self.settings
    }

    /// Rehost every reference, at most `concurrency` at a time.
    ///
    /// Returns once all references have settled. Completion order is
    /// unspecified.
    #[instrument(skip(self, references), fields(count = references.len()))]
    pub async fn rehost_all(&self, references: &[String], referer: &str) -> RehostReport {
        let width = self.settings.concurrency.max(1);

        let outcomes: Vec<(String, Result<RehostedAsset, AssetError>)> =
            stream::iter(references.iter().cloned())
                .map(|reference| async move {
                    let outcome = self.rehost_one(&reference, referer).await;
                    (reference, outcome)
                })
                .buffer_unordered(width)
                .collect()
                .await;

        let mut assets = Vec::new();
        let mut failures = Vec::new();
        for (reference, outcome) in outcomes {
            match outcome {
                Ok(asset) => assets.push(asset),
                Err(e) => {
                    tracing::warn!(
                        reference = %reference,
                        error = %e.kind,
                        "Image left on original host"
                    );
                    failures.push((reference, e));
                }
            }
        }

        tracing::info!(
            rehosted = assets.len(),
            failed = failures.len(),
            "Rehosting finished"
        );
        RehostReport::new(assets, failures)
    }

    /// Download one image and upload it under a fresh key.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetError`] for non-http references, failed or
    /// unsuccessful downloads, and storage failures.
    #[instrument(skip(self))]
    pub async fn rehost_one(
        &self,
        reference: &str,
        referer: &str,
    ) -> Result<RehostedAsset, AssetError> {
        if !(reference.starts_with("http://") || reference.starts_with("https://")) {
            return Err(AssetError::new(AssetErrorKind::NotHttp));
        }

        let mut request = self
            .client
            .get(reference)
            .header(header::USER_AGENT, &self.settings.user_agent);
        if !referer.is_empty() {
            request = request.header(header::REFERER, referer);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AssetError::new(AssetErrorKind::Download(e.to_string())))?;

        if !response.status().is_success() {
            return Err(AssetError::new(AssetErrorKind::Status(
                response.status().as_u16(),
            )));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(self.settings.default_content_type.as_str())
            .to_string();

        let data = response
            .bytes()
            .await
            .map_err(|e| AssetError::new(AssetErrorKind::Download(e.to_string())))?;

        let extension = derive_extension(reference, &self.settings.default_extension);
        let key = object_key(&self.settings.key_prefix, &extension);

        self.storage
            .upload(&self.settings.bucket, &key, &data, &content_type)
            .await
            .map_err(|e| AssetError::new(AssetErrorKind::Upload(e.to_string())))?;

        let public_url = self
            .storage
            .public_url(&self.settings.bucket, &key)
            .map_err(|e| AssetError::new(AssetErrorKind::Upload(e.to_string())))?;

        tracing::debug!(key = %key, size = data.len(), "Image rehosted");
        Ok(RehostedAsset::new(reference, key, public_url, content_type))
    }
}
