//! Data carried through the pipeline.

use folio_error::AssetError;

/// Where a rendition came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RenditionSource {
    /// Markdown produced by the reader service, with `Title:`-style headers
    #[display("reader")]
    Reader,
    /// Markdown converted from a WeChat article page
    #[display("wechat")]
    WeChat,
}

/// Text extraction of a page before any image has been rehosted.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct Rendition {
    text: String,
    title: Option<String>,
    cover: Option<String>,
    source: RenditionSource,
}

impl Rendition {
    /// Raw reader output. Title and cover are derived from the text later.
    pub fn reader(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: None,
            cover: None,
            source: RenditionSource::Reader,
        }
    }

    /// A rendition whose title and cover came from page metadata.
    pub fn wechat(text: impl Into<String>, title: String, cover: Option<String>) -> Self {
        Self {
            text: text.into(),
            title: Some(title),
            cover,
            source: RenditionSource::WeChat,
        }
    }
}

/// The finished article returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct Document {
    source_url: String,
    title: String,
    body: String,
    cover_reference: Option<String>,
}

impl Document {
    /// Assemble a document.
    pub fn new(
        source_url: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        cover_reference: Option<String>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            title: title.into(),
            body: body.into(),
            cover_reference,
        }
    }
}

/// One image copied into owned storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct RehostedAsset {
    original_reference: String,
    storage_key: String,
    public_url: String,
    content_type: String,
}

impl RehostedAsset {
    /// Record a completed rehost.
    pub fn new(
        original_reference: impl Into<String>,
        storage_key: impl Into<String>,
        public_url: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            original_reference: original_reference.into(),
            storage_key: storage_key.into(),
            public_url: public_url.into(),
            content_type: content_type.into(),
        }
    }
}

/// Outcome of rehosting a batch of references.
///
/// Successes and failures are kept apart. Failed references still take part
/// in rewriting, mapped to themselves, so a successful reference that is a
/// prefix of a failed one cannot corrupt it.
#[derive(Debug, Default, derive_getters::Getters)]
pub struct RehostReport {
    assets: Vec<RehostedAsset>,
    failures: Vec<(String, AssetError)>,
}

impl RehostReport {
    /// Build a report from already separated outcomes.
    pub fn new(assets: Vec<RehostedAsset>, failures: Vec<(String, AssetError)>) -> Self {
        Self { assets, failures }
    }

    /// `(original, replacement)` pairs for every attempted reference.
    ///
    /// Successful references map to their public URL, failed ones to
    /// themselves.
    pub fn replacements(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assets
            .iter()
            .map(|a| (a.original_reference.as_str(), a.public_url.as_str()))
            .chain(
                self.failures
                    .iter()
                    .map(|(reference, _)| (reference.as_str(), reference.as_str())),
            )
    }

    /// Public URL of `reference`, if it was rehosted.
    pub fn public_url_for(&self, reference: &str) -> Option<&str> {
        self.assets
            .iter()
            .find(|a| a.original_reference == reference)
            .map(|a| a.public_url.as_str())
    }

    /// Total number of references attempted.
    pub fn attempted(&self) -> usize {
        self.assets.len() + self.failures.len()
    }
}
