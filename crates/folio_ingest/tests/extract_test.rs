//! Tests for reference extraction.

use folio_ingest::{extract_references, first_image};
use std::collections::HashSet;

#[test]
fn test_extract_deduplicates_preserving_first_occurrence() {
    let text = "\
![one](https://a.example/1.png)
para
![two](http://b.example/2.jpg) ![again](https://a.example/1.png)
![three](https://c.example/3.gif)";

    let refs = extract_references(text);
    assert_eq!(
        refs,
        vec![
            "https://a.example/1.png".to_string(),
            "http://b.example/2.jpg".to_string(),
            "https://c.example/3.gif".to_string(),
        ]
    );
}

#[test]
fn test_extract_never_returns_duplicates() {
    let inputs = [
        "",
        "no images at all",
        "![a](https://x/1.png)![a](https://x/1.png)![a](https://x/1.png)",
        "![a](https://x/1.png) ![b](https://x/2.png) ![c](https://x/1.png) ![d](https://x/2.png)",
        "[link](https://x/1.png) ![img](https://x/1.png)",
    ];

    for input in inputs {
        let refs = extract_references(input);
        let unique: HashSet<_> = refs.iter().collect();
        assert_eq!(unique.len(), refs.len(), "duplicates for {:?}", input);
    }
}

#[test]
fn test_extract_ignores_plain_links_and_relative_images() {
    let text = "[site](https://x/page) ![rel](/local/a.png) ![abs](https://x/b.png)";
    assert_eq!(extract_references(text), vec!["https://x/b.png".to_string()]);
}

#[test]
fn test_extract_empty_input() {
    assert!(extract_references("").is_empty());
    assert_eq!(first_image(""), None);
}

#[test]
fn test_first_image() {
    let text = "intro ![cover](https://x/cover.webp) ![b](https://x/b.png)";
    assert_eq!(first_image(text).as_deref(), Some("https://x/cover.webp"));
}
