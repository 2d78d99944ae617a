//! Service configuration.
//!
//! Sources, in order of precedence (later sources override earlier):
//! 1. Bundled defaults (`folio.toml` shipped with the crate)
//! 2. `~/.config/folio/folio.toml`
//! 3. `./folio.toml`, or the file passed explicitly
//! 4. `FOLIO_*` environment variables, `__` separating sections
//!    (e.g. `FOLIO_REHOST__CONCURRENCY=8`)

use config::{Config, Environment, File, FileFormat};
use folio_error::{ConfigError, FolioError, FolioResult};
use folio_ingest::{ArticleSettings, ReaderSettings, RehostSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../folio.toml");

/// HTTP listener and logging settings.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct ServerSettings {
    /// Interface to bind
    host: String,
    /// Port to bind
    port: u16,
    /// Log filter used when `RUST_LOG` is unset
    log_level: String,
    /// Emit JSON-formatted logs
    json_logs: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Which storage backend receives rehosted images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Supabase Storage REST API
    #[default]
    Supabase,
    /// Local directory
    Filesystem,
}

/// Storage backend settings.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct StorageSettings {
    /// Selected backend
    backend: StorageBackend,
    /// Supabase project URL (e.g. `https://xyz.supabase.co`)
    supabase_url: Option<String>,
    /// Supabase API key
    supabase_key: Option<String>,
    /// Root directory for the filesystem backend
    base_path: PathBuf,
    /// URL the filesystem root is served under
    public_base_url: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            supabase_url: None,
            supabase_key: None,
            base_path: PathBuf::from("./media"),
            public_base_url: "http://localhost:8080/media".to_string(),
        }
    }
}

/// Top-level Folio configuration.
///
/// # Example
///
/// ```no_run
/// use folio_server::FolioConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FolioConfig::load(None)?;
/// println!("Listening on {}:{}", config.server().host(), config.server().port());
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    Default,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct FolioConfig {
    /// Listener and logging
    #[serde(default)]
    server: ServerSettings,
    /// Reader service
    #[serde(default)]
    reader: ReaderSettings,
    /// Storage backend
    #[serde(default)]
    storage: StorageSettings,
    /// Image rehosting
    #[serde(default)]
    rehost: RehostSettings,
    /// Article assembly
    #[serde(default)]
    article: ArticleSettings,
}

impl FolioConfig {
    /// Load configuration from a specific file path, without other sources.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> FolioResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Parse the bundled defaults alone.
    pub fn bundled() -> FolioResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to parse bundled configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: environment > file > home dir > bundled.
    ///
    /// When `path` is given it must exist; otherwise `./folio.toml` is used
    /// if present. Supabase credentials additionally fall back to the plain
    /// `SUPABASE_URL` and `SUPABASE_KEY` variables.
    #[instrument]
    pub fn load(path: Option<&Path>) -> FolioResult<Self> {
        debug!("Loading configuration with precedence: env > file > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/folio/folio.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("folio").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Self = builder
            .build()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        if config.storage.supabase_url.is_none() {
            config.storage.supabase_url = std::env::var("SUPABASE_URL").ok();
        }
        if config.storage.supabase_key.is_none() {
            config.storage.supabase_key = std::env::var("SUPABASE_KEY").ok();
        }

        Ok(config)
    }

    /// Check the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns an error for unusable rehost settings, a Supabase backend
    /// without credentials, or a port of zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rehost.validate()?;

        if self.server.port == 0 {
            return Err(ConfigError::new("server.port must not be 0"));
        }

        if self.storage.backend == StorageBackend::Supabase {
            let missing = |v: &Option<String>| v.as_deref().is_none_or(str::is_empty);
            if missing(&self.storage.supabase_url) || missing(&self.storage.supabase_key) {
                return Err(ConfigError::new(
                    "storage.supabase_url and storage.supabase_key are required for the supabase backend",
                ));
            }
        }

        Ok(())
    }
}
