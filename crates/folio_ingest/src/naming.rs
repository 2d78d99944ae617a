//! Object key and extension derivation for rehosted images.

use rand::Rng;
use reqwest::Url;

/// Extensions kept as-is; anything else falls back to the default.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 10;

fn allowed(ext: &str) -> Option<String> {
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Pick a file extension for an image reference.
///
/// The WeChat CDN carries the format in a `wx_fmt` query parameter, which
/// wins over the path. Otherwise the extension of the last path segment is
/// used. Unknown or missing extensions become `default`.
///
/// # Examples
///
/// ```
/// use folio_ingest::derive_extension;
///
/// assert_eq!(derive_extension("https://h/img/a.PNG", "jpg"), "png");
/// assert_eq!(derive_extension("https://mmbiz.qpic.cn/x/640?wx_fmt=gif", "jpg"), "gif");
/// assert_eq!(derive_extension("https://h/img/a.svg", "jpg"), "jpg");
/// assert_eq!(derive_extension("https://h/img/photo", "jpg"), "jpg");
/// ```
pub fn derive_extension(reference: &str, default: &str) -> String {
    let Ok(url) = Url::parse(reference) else {
        return default.to_string();
    };

    if let Some(ext) = url
        .query_pairs()
        .find(|(k, _)| k == "wx_fmt")
        .and_then(|(_, v)| allowed(&v))
    {
        return ext;
    }

    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|segment| segment.rsplit_once('.'))
        .and_then(|(_, ext)| allowed(ext))
        .unwrap_or_else(|| default.to_string())
}

/// Generate a fresh object key: `{prefix}-{unix millis}-{random base36}.{ext}`.
///
/// Keys are never reused, so repeated ingestion of the same article writes
/// new objects.
pub fn object_key(prefix: &str, extension: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect();

    format!(
        "{}-{}-{}.{}",
        prefix,
        chrono::Utc::now().timestamp_millis(),
        suffix,
        extension
    )
}
