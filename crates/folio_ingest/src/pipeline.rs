//! End-to-end article ingestion.

use crate::{
    AssetRehoster, ContentFetcher, Document, ReaderClient, ReaderSettings, RehostReport,
    Rendition, RenditionSource, WECHAT_REFERER, WeChatFetcher, extract_references,
    extract_title, first_image, is_wechat_url, rewrite_references, strip_headers,
};
use folio_error::{FetchError, FetchErrorKind};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Article-level settings.
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
pub struct ArticleSettings {
    /// Title used when the rendition carries none
    untitled_title: String,

    /// Parse WeChat article pages directly instead of using the reader
    wechat_direct: bool,
}

impl Default for ArticleSettings {
    fn default() -> Self {
        Self {
            untitled_title: "未命名文章".to_string(),
            wechat_direct: true,
        }
    }
}

/// Fetch → extract → rehost → rewrite → assemble.
///
/// Holds no per-request state; one pipeline serves every request.
#[derive(Clone)]
pub struct ArticlePipeline {
    reader: Arc<dyn ContentFetcher>,
    wechat: Arc<dyn ContentFetcher>,
    rehoster: AssetRehoster,
    settings: ArticleSettings,
}

impl ArticlePipeline {
    /// Assemble a pipeline from its collaborators.
    pub fn new(
        reader: Arc<dyn ContentFetcher>,
        wechat: Arc<dyn ContentFetcher>,
        rehoster: AssetRehoster,
        settings: ArticleSettings,
    ) -> Self {
        Self {
            reader,
            wechat,
            rehoster,
            settings,
        }
    }

    /// Standard wiring: Jina-style reader plus direct WeChat parsing, all
    /// sharing one HTTP connection pool.
    pub fn with_reader(
        client: reqwest::Client,
        reader: ReaderSettings,
        rehoster: AssetRehoster,
        settings: ArticleSettings,
    ) -> Self {
        Self::new(
            Arc::new(ReaderClient::new(reader, client.clone())),
            Arc::new(WeChatFetcher::new(client)),
            rehoster,
            settings,
        )
    }

    /// Ingest the article at `source_url`.
    ///
    /// # Errors
    ///
    /// Only a failure to obtain the rendition is an error. Images that cannot
    /// be rehosted stay on their original host and are logged.
    #[instrument(skip(self))]
    pub async fn ingest(&self, source_url: &str) -> Result<Document, FetchError> {
        let parsed = Url::parse(source_url)
            .map_err(|e| FetchError::new(FetchErrorKind::InvalidUrl(e.to_string())))?;

        let wechat = is_wechat_url(source_url);
        let rendition = self.fetch_rendition(source_url, wechat).await?;

        let (title, body) = match rendition.source() {
            RenditionSource::Reader => {
                (extract_title(rendition.text()), strip_headers(rendition.text()))
            }
            RenditionSource::WeChat => (rendition.title().clone(), rendition.text().clone()),
        };

        let mut references = extract_references(&body);
        if let Some(cover) = rendition.cover() {
            if !references.contains(cover) {
                references.push(cover.clone());
            }
        }

        let referer = if wechat {
            WECHAT_REFERER.to_string()
        } else {
            parsed.origin().ascii_serialization()
        };

        let report = if references.is_empty() {
            RehostReport::default()
        } else {
            self.rehoster.rehost_all(&references, &referer).await
        };

        let body = rewrite_references(&body, report.replacements());
        let cover = cover_reference(&rendition, &report, &body);
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.settings.untitled_title.clone());

        info!(
            source = %rendition.source(),
            images = references.len(),
            rehosted = report.assets().len(),
            failed = report.failures().len(),
            "Article ingested"
        );

        Ok(Document::new(source_url, title, body, cover))
    }

    async fn fetch_rendition(
        &self,
        source_url: &str,
        wechat: bool,
    ) -> Result<Rendition, FetchError> {
        if wechat && self.settings.wechat_direct {
            match self.wechat.fetch(source_url).await {
                Ok(rendition) => return Ok(rendition),
                Err(e) => warn!(error = %e.kind, "WeChat parser failed, falling back to reader"),
            }
        }
        self.reader.fetch(source_url).await
    }
}

/// Metadata cover (rehosted when possible), else the first image in the body.
fn cover_reference(rendition: &Rendition, report: &RehostReport, body: &str) -> Option<String> {
    match rendition.cover() {
        Some(cover) => Some(report.public_url_for(cover).unwrap_or(cover.as_str()).to_string()),
        None => first_image(body),
    }
}
