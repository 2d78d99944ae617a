//! Article ingestion and image rehosting.
//!
//! A single request flows through the pipeline in one linear pass:
//!
//! ```text
//! fetch rendition ──► extract references ──► rehost (bounded fan-out)
//!                                                   │
//!            Document ◄── assemble ◄── rewrite ◄────┘
//! ```
//!
//! - [`ContentFetcher`]: obtains a markdown rendition of the page, either via a
//!   reader service ([`ReaderClient`]) or, for WeChat articles, by parsing the
//!   page directly ([`WeChatFetcher`])
//! - [`extract_references`]: collects unique embedded image URLs
//! - [`AssetRehoster`]: downloads each image with a spoofed `Referer` and
//!   uploads it to [`ObjectStorage`](folio_storage::ObjectStorage)
//! - [`rewrite_references`]: points the text at the rehosted copies
//! - [`ArticlePipeline`]: ties it together and picks title and cover
//!
//! Individual image failures never fail the request; only the content fetch
//! can.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assemble;
mod document;
mod extract;
mod fetcher;
mod naming;
mod pipeline;
mod rehost;
mod rewrite;
mod wechat;

pub use assemble::{extract_title, strip_headers};
pub use document::{Document, RehostReport, RehostedAsset, Rendition, RenditionSource};
pub use extract::{extract_references, first_image};
pub use fetcher::{BROWSER_USER_AGENT, ContentFetcher, ReaderClient, ReaderSettings};
pub use folio_error::{AssetError, AssetErrorKind, FetchError, FetchErrorKind};
pub use naming::{ALLOWED_EXTENSIONS, derive_extension, object_key};
pub use pipeline::{ArticlePipeline, ArticleSettings};
pub use rehost::{AssetRehoster, RehostSettings};
pub use rewrite::rewrite_references;
pub use wechat::{WECHAT_REFERER, WeChatFetcher, is_wechat_url, parse_wechat_html};
