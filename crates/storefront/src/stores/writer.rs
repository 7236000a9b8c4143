//! Ordered write queue for a single store.
//!
//! Every store owns one queue. A single worker task drains it and performs
//! writes one after another, so writes complete in the order the mutations
//! happened. Each entry is a full snapshot of the collection, so when
//! several snapshots are waiting only the newest needs to be written.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use tote_core::Collection;

use crate::storage::PersistenceAdapter;

enum WriteCommand<C> {
    Save(C),
    Flush(oneshot::Sender<()>),
}

/// Handle for enqueueing snapshot writes.
///
/// Dropping the last handle lets the worker finish the queued writes and exit.
pub(crate) struct WriteQueue<C> {
    key: &'static str,
    sender: mpsc::UnboundedSender<WriteCommand<C>>,
}

impl<C: Collection> WriteQueue<C> {
    /// Spawn the worker for `key` on the current Tokio runtime.
    pub(crate) fn spawn(adapter: PersistenceAdapter, key: &'static str) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(write_worker(adapter, key, receiver));
        Self { key, sender }
    }

    /// Queue a snapshot for writing. Never blocks.
    pub(crate) fn enqueue(&self, snapshot: C) {
        if self.sender.send(WriteCommand::Save(snapshot)).is_err() {
            warn!(key = self.key, "Write queue closed, dropping snapshot");
        }
    }

    /// Wait until every snapshot queued before this call has been written.
    pub(crate) async fn flush(&self) {
        let (done, finished) = oneshot::channel();
        if self.sender.send(WriteCommand::Flush(done)).is_err() {
            warn!(key = self.key, "Write queue closed, nothing to flush");
            return;
        }
        // The worker only drops the sender if it is shutting down.
        let _ = finished.await;
    }
}

async fn write_worker<C: Collection>(
    adapter: PersistenceAdapter,
    key: &'static str,
    mut receiver: mpsc::UnboundedReceiver<WriteCommand<C>>,
) {
    debug!(key, "Write queue started");

    let mut next = receiver.recv().await;
    while let Some(command) = next.take() {
        match command {
            WriteCommand::Save(mut snapshot) => {
                // Newer snapshots already waiting supersede this one.
                loop {
                    match receiver.try_recv() {
                        Ok(WriteCommand::Save(newer)) => snapshot = newer,
                        Ok(other) => {
                            next = Some(other);
                            break;
                        }
                        Err(_) => break,
                    }
                }
                adapter.save(key, &snapshot).await;
            }
            WriteCommand::Flush(done) => {
                let _ = done.send(());
            }
        }

        if next.is_none() {
            next = receiver.recv().await;
        }
    }

    debug!(key, "Write queue closed, worker exiting");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tote_core::{Cart, Product, ProductId, Quantity};

    use super::*;
    use crate::storage::MemoryStore;

    fn product(id: i64) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Product {id}"),
            "price": 1.5,
            "image": "https://fakestoreapi.com/img/1.jpg",
            "category": "electronics",
            "description": "",
            "rating": { "rate": 4.0, "count": 10 }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_flush_waits_for_latest_snapshot() {
        let store = MemoryStore::new();
        let queue: WriteQueue<Cart> =
            WriteQueue::spawn(PersistenceAdapter::new(Arc::new(store.clone())), "cart_items");

        let mut cart = Cart::new();
        for id in 1..=20 {
            cart.add(product(id), Quantity::ONE);
            queue.enqueue(cart.clone());
        }
        queue.flush().await;

        let stored: Cart = serde_json::from_str(&store.peek("cart_items").unwrap()).unwrap();
        assert_eq!(stored, cart);
        assert!(stored.contains(ProductId::new(20)));
    }

    #[tokio::test]
    async fn test_flush_with_nothing_queued_returns() {
        let queue: WriteQueue<Cart> =
            WriteQueue::spawn(PersistenceAdapter::new(Arc::new(MemoryStore::new())), "cart_items");
        queue.flush().await;
    }
}
