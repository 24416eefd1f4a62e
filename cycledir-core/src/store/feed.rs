//! Broadcast of store mutations.

use tokio::sync::broadcast;

use crate::store::StoreChange;

/// Buffered changes per subscriber before the oldest are dropped.
pub const DEFAULT_CHANGE_BUFFER: usize = 64;

/// Fan-out of `StoreChange`s to any number of subscribers.
///
/// Slow subscribers lose the oldest changes and see `RecvError::Lagged`
/// on their next receive.
#[derive(Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<StoreChange>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        ChangeFeed { sender }
    }

    /// Publish a change. Having no subscribers is fine.
    pub fn publish(&self, change: StoreChange) {
        let receivers = self.sender.send(change).unwrap_or(0);
        tracing::trace!(receivers, "published store change");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        ChangeFeed::new(DEFAULT_CHANGE_BUFFER)
    }
}
