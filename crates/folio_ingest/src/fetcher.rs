//! Content fetching through a reader service.

use crate::Rendition;
use folio_error::{FetchError, FetchErrorKind};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Desktop browser identity sent to hosts that block obvious scrapers.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Source of page renditions.
#[async_trait::async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch a markdown rendition of `source_url`.
    ///
    /// # Errors
    ///
    /// Any failure here aborts the article request.
    async fn fetch(&self, source_url: &str) -> Result<Rendition, FetchError>;
}

/// Reader service settings.
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
pub struct ReaderSettings {
    /// Prefix the source URL is appended to (e.g. `https://r.jina.ai/`)
    base_url: String,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://r.jina.ai/".to_string(),
        }
    }
}

/// Client for a "prefix the URL" reader service such as Jina Reader.
///
/// `GET {base_url}{source_url}` answers with a plain-text rendition that
/// starts with `Title:`, `URL Source:` and `Markdown Content:` header lines.
#[derive(Debug, Clone)]
pub struct ReaderClient {
    settings: ReaderSettings,
    client: reqwest::Client,
}

impl ReaderClient {
    /// Create a reader client sharing `client`'s connection pool.
    pub fn new(settings: ReaderSettings, client: reqwest::Client) -> Self {
        tracing::debug!(base_url = %settings.base_url, "Creating reader client");
        Self { settings, client }
    }

    /// URL the rendition of `source_url` is requested from.
    pub fn reader_url(&self, source_url: &str) -> String {
        format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            source_url
        )
    }
}

#[async_trait::async_trait]
impl ContentFetcher for ReaderClient {
    #[instrument(skip(self))]
    async fn fetch(&self, source_url: &str) -> Result<Rendition, FetchError> {
        let url = self.reader_url(source_url);
        tracing::debug!("Requesting rendition from {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Reader request failed: {}", e);
            FetchError::new(FetchErrorKind::Transport(e.to_string()))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Reader returned error: {}", status);
            return Err(FetchError::new(FetchErrorKind::Status(status.as_u16())));
        }

        let text = response.text().await.map_err(|e| {
            tracing::error!("Failed to read reader response: {}", e);
            FetchError::new(FetchErrorKind::Body(e.to_string()))
        })?;

        tracing::debug!(bytes = text.len(), "Rendition received");
        Ok(Rendition::reader(text))
    }
}
