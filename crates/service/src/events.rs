//! Fan-out of "new photo" notifications to every open viewer stream.
//!
//! Delivery is at-most-once per connected subscriber with no replay. A
//! subscription unregisters itself when dropped, which is what happens when
//! the viewer's HTTP connection goes away.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Pending payloads held per viewer; further publishes to a full queue are dropped.
pub const SUBSCRIBER_QUEUE: usize = 16;

type Channels = HashMap<u64, mpsc::Sender<String>>;

#[derive(Default)]
pub struct Broadcaster {
    channels: Mutex<Channels>,
    next_id: AtomicU64,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    fn channels(&self) -> MutexGuard<'_, Channels> {
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new channel. The returned stream yields serialized payloads.
    pub fn subscribe(self: &Arc<Self>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(SUBSCRIBER_QUEUE);
        let count = {
            let mut channels = self.channels();
            channels.insert(id, tx);
            channels.len()
        };
        debug!(event = "subscriber_added", subscriber_id = id, subscribers = count);
        Subscription { id, rx, owner: Arc::downgrade(self) }
    }

    /// Remove a channel. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: u64) {
        let removed = self.channels().remove(&id).is_some();
        if removed {
            debug!(event = "subscriber_removed", subscriber_id = id);
        }
    }

    /// Write `payload` to every registered channel without waiting on any of them.
    /// Channels whose reader is gone or whose queue is full are skipped. Returns how many accepted it.
    pub fn publish(&self, payload: &serde_json::Value) -> usize {
        let data = payload.to_string();
        let channels = self.channels();
        let delivered = channels.values().filter(|tx| tx.try_send(data.clone()).is_ok()).count();
        info!(event = "photo_notification", subscribers = channels.len(), delivered);
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.channels().len()
    }

    /// Drop every channel; open streams end after draining what they already hold.
    pub fn close_all(&self) {
        let mut channels = self.channels();
        let closed = channels.len();
        channels.clear();
        info!(event = "broadcaster_closed", closed);
    }
}

/// Handle for one registered viewer.
pub struct Subscription {
    id: u64,
    rx: mpsc::Receiver<String>,
    owner: std::sync::Weak<Broadcaster>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Stream for Subscription {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(owner) = self.owner.upgrade() {
            owner.unsubscribe(self.id);
        }
    }
}
