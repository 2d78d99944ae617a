//! Reference rewriting.

use regex::Regex;

/// Replace every literal occurrence of each original reference with its
/// rehosted URL.
///
/// All replacements happen in a single left-to-right pass, longest original
/// first at any position, so a reference that is a prefix of another (or that
/// appears inside a replacement URL) is never rewritten twice. A pair that
/// maps a reference to itself shields that reference from shorter originals.
///
/// # Examples
///
/// ```
/// use folio_ingest::rewrite_references;
///
/// let text = "![a](http://h/a.png) and again http://h/a.png";
/// let out = rewrite_references(text, [("http://h/a.png", "https://cdn/x.png")]);
/// assert_eq!(out, "![a](https://cdn/x.png) and again https://cdn/x.png");
/// ```
pub fn rewrite_references<'a>(
    text: &str,
    replacements: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> String {
    let mut pairs: Vec<(&str, &str)> = replacements
        .into_iter()
        .filter(|(original, _)| !original.is_empty())
        .collect();
    if pairs.is_empty() {
        return text.to_string();
    }
    pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let alternation = pairs
        .iter()
        .map(|(original, _)| regex::escape(original))
        .collect::<Vec<_>>()
        .join("|");

    match Regex::new(&alternation) {
        Ok(re) => re
            .replace_all(text, |caps: &regex::Captures| {
                let matched = &caps[0];
                pairs
                    .iter()
                    .find(|(original, _)| *original == matched)
                    .map(|(_, public)| public.to_string())
                    .unwrap_or_else(|| matched.to_string())
            })
            .into_owned(),
        Err(e) => {
            // Pattern too large for one automaton; scan for the longest match by hand
            tracing::debug!("Falling back to manual rewrite scan: {}", e);
            scan_longest_first(text, &pairs)
        }
    }
}

/// Leftmost-longest replacement without a compiled pattern.
///
/// `pairs` must be sorted longest original first.
fn scan_longest_first(text: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        match pairs.iter().find(|(original, _)| rest.starts_with(original)) {
            Some((original, public)) => {
                out.push_str(public);
                rest = &rest[original.len()..];
            }
            None => {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }
    out
}
