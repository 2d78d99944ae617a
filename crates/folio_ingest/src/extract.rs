//! Embedded image reference extraction.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static MARKDOWN_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[.*?\]\((https?://.*?)\)").expect("valid markdown image pattern")
});

/// Collect the unique image URLs embedded as `![alt](http(s)://...)`.
///
/// Order of first occurrence is preserved.
///
/// # Examples
///
/// ```
/// use folio_ingest::extract_references;
///
/// let text = "![a](https://h/1.png) text ![b](https://h/2.png) ![c](https://h/1.png)";
/// assert_eq!(
///     extract_references(text),
///     vec!["https://h/1.png".to_string(), "https://h/2.png".to_string()]
/// );
/// assert!(extract_references("").is_empty());
/// ```
pub fn extract_references(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    MARKDOWN_IMAGE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|url| seen.insert(*url))
        .map(str::to_string)
        .collect()
}

/// First embedded image URL in `text`, if any.
pub fn first_image(text: &str) -> Option<String> {
    MARKDOWN_IMAGE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
