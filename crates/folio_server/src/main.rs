use anyhow::Result;
use clap::Parser;
use folio_server::{AppState, FolioConfig, create_router, init_logging};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Folio article ingestion server", long_about = None)]
struct Args {
    /// Configuration file (default: ./folio.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind, overriding the configuration
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overriding the configuration
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = FolioConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        let server = config.server().clone().with_host(host);
        config = config.with_server(server);
    }
    if let Some(port) = args.port {
        let server = config.server().clone().with_port(port);
        config = config.with_server(server);
    }
    config.validate()?;

    init_logging(config.server())?;

    let client = reqwest::Client::builder().build()?;
    let state = AppState::from_config(&config, client)?;
    let app = create_router(state);

    let server = config.server();
    let listener = tokio::net::TcpListener::bind((server.host().as_str(), *server.port())).await?;
    info!(
        address = %listener.local_addr()?,
        reader = %config.reader().base_url(),
        concurrency = config.rehost().concurrency(),
        "Folio listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Folio stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
