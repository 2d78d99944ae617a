//! Configuration loading and validation tests.

use folio_server::{AppState, FolioConfig, StorageBackend, StorageSettings};
use std::io::Write;
use tempfile::TempDir;

#[test]
fn test_bundled_defaults() {
    let config = FolioConfig::bundled().unwrap();

    assert_eq!(*config.server().port(), 8080);
    assert_eq!(config.server().log_level(), "info");
    assert_eq!(config.reader().base_url(), "https://r.jina.ai/");
    assert_eq!(*config.storage().backend(), StorageBackend::Supabase);
    assert_eq!(config.rehost().bucket(), "articles");
    assert_eq!(*config.rehost().concurrency(), 4);
    assert_eq!(config.rehost().default_extension(), "jpg");
    assert_eq!(config.article().untitled_title(), "未命名文章");
    assert!(*config.article().wechat_direct());
}

#[test]
fn test_bundled_matches_struct_defaults() {
    let bundled = FolioConfig::bundled().unwrap();
    assert_eq!(bundled, FolioConfig::default());
}

#[test]
fn test_from_file_partial_overrides() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[server]
port = 3000

[storage]
backend = "filesystem"
base_path = "/var/lib/folio"

[rehost]
concurrency = 8
"#
    )
    .unwrap();

    let config = FolioConfig::from_file(file.path()).unwrap();

    assert_eq!(*config.server().port(), 3000);
    assert_eq!(config.server().host(), "0.0.0.0");
    assert_eq!(*config.storage().backend(), StorageBackend::Filesystem);
    assert_eq!(config.storage().base_path().to_str(), Some("/var/lib/folio"));
    assert_eq!(*config.rehost().concurrency(), 8);
    assert_eq!(config.rehost().bucket(), "articles");
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_file_missing_is_error() {
    assert!(FolioConfig::from_file("/nonexistent/folio.toml").is_err());
}

fn filesystem_config() -> FolioConfig {
    let storage = StorageSettings::default().with_backend(StorageBackend::Filesystem);
    FolioConfig::default().with_storage(storage)
}

#[test]
fn test_supabase_requires_credentials() {
    let config = FolioConfig::default();
    assert!(config.validate().is_err());

    let storage = StorageSettings::default()
        .with_supabase_url(Some("https://xyz.supabase.co".to_string()))
        .with_supabase_key(Some(String::new()));
    let config = config.with_storage(storage.clone());
    assert!(config.validate().is_err());

    let config = config.with_storage(storage.with_supabase_key(Some("service-key".to_string())));
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_concurrency_is_rejected() {
    let config = filesystem_config();
    let rehost = config.rehost().clone().with_concurrency(0);
    let config = config.with_rehost(rehost);

    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("concurrency"));
}

#[test]
fn test_zero_port_is_rejected() {
    let config = filesystem_config();
    let server = config.server().clone().with_port(0);
    let config = config.with_server(server);

    assert!(config.validate().is_err());
}

#[test]
fn test_state_from_filesystem_config() {
    let temp_dir = TempDir::new().unwrap();
    let storage = StorageSettings::default()
        .with_backend(StorageBackend::Filesystem)
        .with_base_path(temp_dir.path().join("media"));
    let config = FolioConfig::default().with_storage(storage);

    assert!(AppState::from_config(&config, reqwest::Client::new()).is_ok());
    assert!(temp_dir.path().join("media").is_dir());
}

#[test]
fn test_state_without_supabase_credentials_fails() {
    let config = FolioConfig::default();
    assert!(AppState::from_config(&config, reqwest::Client::new()).is_err());
}
