//! Startup orchestration.
//!
//! # Responsibilities
//! - Install the metrics exporter when enabled
//! - Build the application router
//! - Start the config watcher when a config file is in use
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: route table, bind and watcher errors are fatal
//! - A metrics exporter failure is logged, not fatal

use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::app;
use crate::config::{ConfigWatcher, PortalConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::routing::RouteTableError;

/// Error type for startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid route table: {0}")]
    Routes(#[from] RouteTableError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),

    #[error("failed to watch config file: {0}")]
    Watch(#[from] notify::Error),
}

/// Bring the portal up and serve until `shutdown` fires.
///
/// `bind_override` replaces `listener.bind_address` for this process only;
/// the server keeps the file's value so reloads compare like with like.
pub async fn start(
    config: PortalConfig,
    config_path: Option<PathBuf>,
    bind_override: Option<String>,
    shutdown: &Shutdown,
) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let router = app::build_router(&config.routing)?;
    tracing::info!(routes = router.table().len(), "Route table ready");

    // The watcher handle must outlive the server.
    let (_watcher, config_updates) = match &config_path {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let address = bind_override.unwrap_or_else(|| config.listener.bind_address.clone());
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    let server = HttpServer::new(config, router);
    server
        .run(listener, config_updates, shutdown.subscribe())
        .await?;

    Ok(())
}
