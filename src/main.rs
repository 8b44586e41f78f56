//! Device Portal
//!
//! Serves a single-page device portal built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser request
//!     ─────────────────▶ http::server ──▶ routing::Router ──▶ views::View
//!                             │                 │                  │
//!                             │            RouteTable         render HTML
//!                             │      (/ , /device/:id)             │
//!     Browser response        ▼                                    │
//!     ◀───────────────── http::response ◀──────────────────────────┘
//!
//!     Cross-cutting: config (+ hot reload), observability, lifecycle
//! ```

use std::path::PathBuf;

use clap::Parser;

use device_portal::config::{load_config, PortalConfig};
use device_portal::lifecycle::{self, Shutdown};
use device_portal::observability::logging;

#[derive(Parser)]
#[command(name = "device-portal")]
#[command(about = "QR scanner and device info portal", long_about = None)]
struct Cli {
    /// Path to a TOML config file; watched for changes.
    #[arg(short, long, env = "DEVICE_PORTAL_CONFIG")]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PortalConfig::default(),
    };

    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %cli.bind.as_deref().unwrap_or(&config.listener.bind_address),
        not_found = ?config.routing.not_found,
        "device-portal starting"
    );

    let shutdown = Shutdown::new();
    lifecycle::start(config, cli.config, cli.bind, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
