//! terabox_relay server - serve the TeraBox share-link API.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use terabox_relay::{app, AppState, ShareListClient};

/// HTTP relay for resolving TeraBox share links into file metadata.
#[derive(Parser)]
#[command(name = "terabox_relay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Port to listen on (can also be set via PORT env var).
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let client = ShareListClient::new().context("Failed to build lookup client")?;
    let router = app(AppState { client });

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("TeraBox relay v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    axum::serve(listener, router)
        .await
        .context("Server error")?;

    Ok(())
}
