//! HTTP surface for Folio article ingestion.
//!
//! Exposes a single ingestion endpoint plus a health check:
//!
//! - `GET /api/fetch-article?url=<source>` → `{ title, content, cover_image }`
//! - `GET /health` → `{ "status": "ok" }`
//!
//! Configuration is layered from bundled defaults, optional `folio.toml`
//! files and `FOLIO_*` environment variables; see [`FolioConfig::load`].
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_server::{AppState, FolioConfig, create_router};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FolioConfig::load(None)?;
//! let state = AppState::from_config(&config, reqwest::Client::new())?;
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod observability;
mod state;

pub use api::{ArticleResponse, ErrorResponse, FetchArticleQuery, create_router};
pub use config::{FolioConfig, ServerSettings, StorageBackend, StorageSettings};
pub use observability::init_logging;
pub use state::{AppState, build_storage};
