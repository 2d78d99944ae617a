//! Structured logging setup.

use crate::ServerSettings;
use folio_error::{ConfigError, FolioResult};
use tracing_subscriber::{
    EnvFilter,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `log_level`. JSON output is intended for
/// production log shipping; the default is human-readable with source
/// locations.
///
/// # Errors
///
/// Returns an error for an unparsable filter or if a subscriber is already
/// installed.
pub fn init_logging(settings: &ServerSettings) -> FolioResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings.log_level()))
        .map_err(|e| ConfigError::new(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = if *settings.json_logs() {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install subscriber: {}", e)))?;

    Ok(())
}
