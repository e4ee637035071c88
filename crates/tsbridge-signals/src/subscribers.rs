//! Push subscriptions

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::trace;

/// Receiving side of a subscription; drop or close it to unsubscribe
pub type EventReceiver = mpsc::UnboundedReceiver<Value>;

/// Open subscriptions of one signal
#[derive(Debug, Default)]
pub(crate) struct Subscribers {
    senders: Vec<mpsc::UnboundedSender<Value>>,
}

impl Subscribers {
    /// Open a subscription whose first event is `snapshot`
    pub(crate) fn subscribe(&mut self, snapshot: Value) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        if tx.send(snapshot).is_ok() {
            self.senders.push(tx);
        }
        rx
    }

    /// Deliver an event to every open subscription, dropping closed ones
    pub(crate) fn notify(&mut self, event: &Value) {
        let before = self.senders.len();
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
        let closed = before - self.senders.len();
        if closed > 0 {
            trace!(closed, "Dropped closed subscriptions");
        }
    }

    pub(crate) fn len(&mut self) -> usize {
        self.senders.retain(|tx| !tx.is_closed());
        self.senders.len()
    }

    /// Close every subscription
    pub(crate) fn close(&mut self) {
        self.senders.clear();
    }
}

#[cfg(test)]
#[path = "subscribers/subscribers_tests.rs"]
mod subscribers_tests;
