//! OS signal handling.

use tokio::sync::watch;

/// Resolve on Ctrl+C or once the portal's shutdown flag is set.
///
/// A dropped [`Shutdown`](crate::lifecycle::Shutdown) counts as a shutdown request.
pub async fn shutdown_signal(mut shutdown: watch::Receiver<bool>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => tracing::info!("Ctrl+C received"),
                Err(e) => {
                    // Without a signal handler only the flag can stop us.
                    tracing::error!(error = %e, "Failed to install Ctrl+C handler");
                    stop_requested(&mut shutdown).await;
                }
            }
        }
        _ = stop_requested(&mut shutdown) => tracing::info!("Shutdown requested"),
    }
}

async fn stop_requested(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}
