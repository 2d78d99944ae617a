//! Tests for extension derivation and object key generation.

use folio_ingest::{ALLOWED_EXTENSIONS, derive_extension, object_key};
use std::collections::HashSet;

#[test]
fn test_allowed_path_extensions_are_kept() {
    for ext in ALLOWED_EXTENSIONS {
        let url = format!("https://img.example/path/photo.{}", ext);
        assert_eq!(derive_extension(&url, "jpg"), ext);
    }
}

#[test]
fn test_extension_is_lowercased() {
    assert_eq!(derive_extension("https://img.example/A.WEBP", "jpg"), "webp");
}

#[test]
fn test_unknown_or_missing_extension_falls_back() {
    assert_eq!(derive_extension("https://img.example/a.bmp", "jpg"), "jpg");
    assert_eq!(derive_extension("https://img.example/a", "jpg"), "jpg");
    assert_eq!(derive_extension("https://img.example/", "png"), "png");
    assert_eq!(derive_extension("not a url", "jpg"), "jpg");
}

#[test]
fn test_query_string_does_not_leak_into_extension() {
    assert_eq!(
        derive_extension("https://img.example/a.png?width=640&fmt=x", "jpg"),
        "png"
    );
}

#[test]
fn test_wechat_format_parameter_wins() {
    let url = "https://mmbiz.qpic.cn/mmbiz_png/abc/640?wx_fmt=png&from=appmsg";
    assert_eq!(derive_extension(url, "jpg"), "png");

    let url = "https://mmbiz.qpic.cn/mmbiz_gif/abc/0.jpg?wx_fmt=gif";
    assert_eq!(derive_extension(url, "jpg"), "gif");

    // Unsupported wx_fmt falls through to the path
    let url = "https://mmbiz.qpic.cn/abc/0.jpeg?wx_fmt=other";
    assert_eq!(derive_extension(url, "jpg"), "jpeg");
}

#[test]
fn test_object_key_layout() {
    let key = object_key("fetch", "png");
    let (stem, ext) = key.rsplit_once('.').unwrap();
    assert_eq!(ext, "png");

    let parts: Vec<&str> = stem.split('-').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "fetch");
    assert!(parts[1].parse::<i64>().unwrap() > 1_600_000_000_000);
    assert_eq!(parts[2].len(), 10);
    assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
}

#[test]
fn test_object_keys_do_not_collide() {
    let keys: HashSet<String> = (0..1000).map(|_| object_key("fetch", "jpg")).collect();
    assert_eq!(keys.len(), 1000);
}
