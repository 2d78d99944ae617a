//! Direct parsing of WeChat official-account articles.
//!
//! WeChat pages are not readable through generic reader services, so they are
//! fetched directly and the `js_content` block is converted to markdown with a
//! handful of substitutions. Images live in `data-src` attributes and are
//! served from a CDN that checks the `Referer`.

use crate::{BROWSER_USER_AGENT, ContentFetcher, Rendition};
use folio_error::{FetchError, FetchErrorKind};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::instrument;

/// Referer accepted by the WeChat image CDN.
pub const WECHAT_REFERER: &str = "https://mp.weixin.qq.com/";

const WECHAT_HOST: &str = "mp.weixin.qq.com";
const FALLBACK_TITLE: &str = "微信文章";

static TITLE_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"var msg_title = "(.+?)";"#).expect("valid title pattern"));
static TITLE_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta property="og:title" content="(.+?)""#).expect("valid og:title pattern")
});
static COVER_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"var msg_cdn_url = "(.+?)";"#).expect("valid cover pattern"));
static COVER_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta property="og:image" content="(.+?)""#).expect("valid og:image pattern")
});
static CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="rich_media_content ?" id="js_content"[^>]*>(.*?)</div>"#)
        .expect("valid content pattern")
});
static IMG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img[^>]+data-src="([^"]+)"[^>]*>"#).expect("valid img pattern")
});
static P_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<p[^>]*>").expect("valid paragraph pattern"));
static BR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<br\s*/?>").expect("valid br pattern"));
static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

/// True for links to WeChat official-account articles.
pub fn is_wechat_url(url: &str) -> bool {
    url.contains(WECHAT_HOST)
}

fn first_capture(html: &str, patterns: [&Regex; 2]) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| re.captures(html))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Convert a WeChat article page into a rendition.
///
/// # Errors
///
/// Returns `ContentNotFound` when the page has no `js_content` block (deleted
/// articles, captcha pages).
///
/// # Examples
///
/// ```
/// use folio_ingest::parse_wechat_html;
///
/// let html = r#"<script>var msg_title = "Hello";</script>
/// <div class="rich_media_content " id="js_content"><p>Hi &amp; bye</p></div>"#;
/// let rendition = parse_wechat_html(html).unwrap();
/// assert_eq!(rendition.title().as_deref(), Some("Hello"));
/// assert_eq!(rendition.text(), "Hi & bye");
/// ```
pub fn parse_wechat_html(html: &str) -> Result<Rendition, FetchError> {
    let title = first_capture(html, [&TITLE_VAR, &TITLE_META])
        .map(|t| t.replace(r"\x26amp;", "&"))
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());
    let cover = first_capture(html, [&COVER_VAR, &COVER_META]);

    let raw = CONTENT
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            FetchError::new(FetchErrorKind::ContentNotFound(
                "js_content block missing".to_string(),
            ))
        })?;

    // Images first, so the tag stripping below cannot remove them
    let text = IMG.replace_all(raw, |caps: &Captures| {
        format!("\n\n![image]({})\n\n", &caps[1])
    });
    let text = P_OPEN.replace_all(&text, "\n").replace("</p>", "\n");
    let text = BR.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, "");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");

    Ok(Rendition::wechat(text.trim(), title, cover))
}

/// Fetches WeChat article pages directly.
#[derive(Debug, Clone)]
pub struct WeChatFetcher {
    client: reqwest::Client,
}

impl WeChatFetcher {
    /// Create a fetcher sharing `client`'s connection pool.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ContentFetcher for WeChatFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, source_url: &str) -> Result<Rendition, FetchError> {
        let response = self
            .client
            .get(source_url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .map_err(|e| FetchError::new(FetchErrorKind::Transport(e.to_string())))?;

        if !response.status().is_success() {
            return Err(FetchError::new(FetchErrorKind::Status(
                response.status().as_u16(),
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::new(FetchErrorKind::Body(e.to_string())))?;

        parse_wechat_html(&html)
    }
}
