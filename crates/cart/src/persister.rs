//! Background writer for cart snapshots.
//!
//! Mutations hand the persister an encoded snapshot and return immediately.
//! A single worker task drains the queue and writes each snapshot in the
//! order it was enqueued, so overlapping writes cannot land out of order and
//! the stored value always ends up matching the latest enqueued cart.

use std::sync::Arc;

use go_marketplace_core::Product;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::snapshot;
use crate::storage::Storage;

enum Command {
    Write(String),
    Remove,
    Flush(oneshot::Sender<()>),
}

/// Handle to the snapshot writer task.
///
/// The task exits once every handle is dropped and the queue is drained.
#[derive(Debug, Clone)]
pub struct Persister {
    tx: mpsc::UnboundedSender<Command>,
}

impl Persister {
    /// Spawn the writer task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn spawn(storage: Arc<dyn Storage>, key: String) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(storage, key, rx));
        Self { tx }
    }

    /// Queue a snapshot of `products` for writing.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn persist(&self, products: &[Product]) {
        let encoded = match snapshot::encode(products) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "Failed to encode cart snapshot");
                return;
            }
        };

        if self.tx.send(Command::Write(encoded)).is_err() {
            warn!("Cart writer has stopped; snapshot dropped");
        }
    }

    /// Queue removal of the stored slot.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn discard(&self) {
        if self.tx.send(Command::Remove).is_err() {
            warn!("Cart writer has stopped; removal dropped");
        }
    }

    /// Wait until every snapshot queued before this call has been handled.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(ack_tx)).is_err() {
            return;
        }
        // A dropped sender means the worker is gone; nothing left to wait for
        let _ = ack_rx.await;
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Write(value) => f.debug_tuple("Write").field(&value.len()).finish(),
            Self::Remove => f.write_str("Remove"),
            Self::Flush(_) => f.write_str("Flush"),
        }
    }
}

async fn run(storage: Arc<dyn Storage>, key: String, mut rx: mpsc::UnboundedReceiver<Command>) {
    debug!(key = %key, "Cart writer started");

    while let Some(command) = rx.recv().await {
        match command {
            Command::Write(value) => match storage.set_item(&key, &value).await {
                Ok(()) => debug!(key = %key, bytes = value.len(), "Cart snapshot written"),
                Err(e) => warn!(key = %key, error = %e, "Failed to write cart snapshot"),
            },
            Command::Remove => match storage.remove_item(&key).await {
                Ok(()) => debug!(key = %key, "Stored cart removed"),
                Err(e) => warn!(key = %key, error = %e, "Failed to remove stored cart"),
            },
            Command::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }

    debug!(key = %key, "Cart writer stopped");
}
