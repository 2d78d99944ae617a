//! Reader rendition header handling.

use regex::Regex;
use std::sync::LazyLock;

static TITLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Title:[ \t]*(.+)$").expect("valid title line pattern"));
static HEADER_LINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:Title|URL Source|Markdown Content):.*$")
        .expect("valid header line pattern")
});

/// Title from the first `Title: <value>` line, if present and non-blank.
///
/// # Examples
///
/// ```
/// use folio_ingest::extract_title;
///
/// assert_eq!(extract_title("Title: Foo\nbody").as_deref(), Some("Foo"));
/// assert_eq!(extract_title("no header"), None);
/// ```
pub fn extract_title(text: &str) -> Option<String> {
    TITLE_LINE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Remove the `Title:`, `URL Source:` and `Markdown Content:` lines and trim.
///
/// # Examples
///
/// ```
/// use folio_ingest::strip_headers;
///
/// let text = "Title: Foo\nURL Source: bar\n![x](http://h/a.png)";
/// assert_eq!(strip_headers(text), "![x](http://h/a.png)");
/// ```
pub fn strip_headers(text: &str) -> String {
    HEADER_LINES.replace_all(text, "").trim().to_string()
}
