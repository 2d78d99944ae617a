//! Tests for direct WeChat article parsing.

use folio_ingest::{
    ContentFetcher, FetchErrorKind, RenditionSource, WeChatFetcher, is_wechat_url,
    parse_wechat_html,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

fn article_html() -> String {
    r#"<!DOCTYPE html>
<html>
<head>
<meta property="og:title" content="Meta Title">
<meta property="og:image" content="https://mmbiz.qpic.cn/cover/0?wx_fmt=jpeg">
<script>
var msg_title = "Rust \x26amp; Friends";
var msg_cdn_url = "https://mmbiz.qpic.cn/cover/640?wx_fmt=png";
</script>
</head>
<body>
<div class="rich_media_content " id="js_content" style="visibility: hidden;">
<section><p style="text-align:center">First&nbsp;paragraph &lt;b&gt;</p>
<img class="rich_pages" data-src="https://mmbiz.qpic.cn/a/640?wx_fmt=png" data-type="png">
<p>Second<br/>line</p></section>
</div>
<div id="js_pc_qr_code">footer</div>
</body>
</html>"#
        .to_string()
}

#[test]
fn test_detects_wechat_links() {
    assert!(is_wechat_url("https://mp.weixin.qq.com/s/AbCdEf"));
    assert!(!is_wechat_url("https://example.com/post"));
}

#[test]
fn test_parses_metadata() {
    let rendition = parse_wechat_html(&article_html()).unwrap();

    assert_eq!(*rendition.source(), RenditionSource::WeChat);
    assert_eq!(rendition.title().as_deref(), Some("Rust & Friends"));
    assert_eq!(
        rendition.cover().as_deref(),
        Some("https://mmbiz.qpic.cn/cover/640?wx_fmt=png")
    );
}

#[test]
fn test_converts_body_to_markdown() {
    let rendition = parse_wechat_html(&article_html()).unwrap();
    let text = rendition.text();

    assert!(text.starts_with("First paragraph <b>"));
    assert!(text.contains("![image](https://mmbiz.qpic.cn/a/640?wx_fmt=png)"));
    assert!(text.contains("Second\nline"));
    assert!(!text.contains("<p"));
    assert!(!text.contains("<section>"));
    assert!(!text.contains("footer"));
}

#[test]
fn test_meta_tags_used_when_script_vars_missing() {
    let html = r#"<meta property="og:title" content="Meta Title">
<meta property="og:image" content="https://mmbiz.qpic.cn/cover/0">
<div class="rich_media_content" id="js_content">body</div>"#;

    let rendition = parse_wechat_html(html).unwrap();
    assert_eq!(rendition.title().as_deref(), Some("Meta Title"));
    assert_eq!(rendition.cover().as_deref(), Some("https://mmbiz.qpic.cn/cover/0"));
    assert_eq!(rendition.text(), "body");
}

#[test]
fn test_fallback_title_and_missing_cover() {
    let html = r#"<div class="rich_media_content" id="js_content">body</div>"#;
    let rendition = parse_wechat_html(html).unwrap();
    assert_eq!(rendition.title().as_deref(), Some("微信文章"));
    assert_eq!(*rendition.cover(), None);
}

#[test]
fn test_missing_content_block_is_an_error() {
    let err = parse_wechat_html("<html><body>verify you are human</body></html>").unwrap_err();
    assert!(matches!(err.kind, FetchErrorKind::ContentNotFound(_)));
}

#[tokio::test]
async fn test_fetcher_sends_browser_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s/abc"))
        .and(header("user-agent", folio_ingest::BROWSER_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html()))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = WeChatFetcher::new(reqwest::Client::new());
    let rendition = fetcher
        .fetch(&format!("{}/s/abc", server.uri()))
        .await
        .unwrap();
    assert_eq!(rendition.title().as_deref(), Some("Rust & Friends"));
}

#[tokio::test]
async fn test_fetcher_reports_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = WeChatFetcher::new(reqwest::Client::new());
    let err = fetcher
        .fetch(&format!("{}/s/gone", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FetchErrorKind::Status(404));
}
