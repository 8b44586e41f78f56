//! Portal shutdown flag.
//!
//! Holds a single `bool` in a `watch` channel. Once triggered it stays
//! triggered, so a server or watcher that subscribes after [`Shutdown::trigger`]
//! still stops instead of waiting for a message it already missed.

use tokio::sync::watch;

/// Stop signal shared by the HTTP server and any other long-running task.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// A receiver for [`signals::shutdown_signal`](crate::lifecycle::signals::shutdown_signal).
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Ask every subscriber to stop. Calling it again is a no-op.
    pub fn trigger(&self) {
        if !self.tx.send_replace(true) {
            tracing::info!(subscribers = self.tx.receiver_count(), "Portal shutdown triggered");
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
