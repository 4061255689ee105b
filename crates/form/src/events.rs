//! Change notifications (in-process pub/sub).
//!
//! - No async
//! - Best-effort fan-out; subscribers that went away are dropped on publish
//! - Notifications carry no payload: read the store for the new values

use std::sync::{Mutex, mpsc};
use std::time::Duration;

/// What changed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// The draft was replaced or edited.
    StateChanged,
    /// The validation error mapping was recomputed or set.
    ValidationChanged,
    /// Loading flag, error message or success message changed.
    StatusChanged,
}

/// A subscription to store notifications.
///
/// Messages arrive in publish order. Each subscription gets its own copy of
/// every notification.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: mpsc::Receiver<M>,
}

impl<M> Subscription<M> {
    fn new(receiver: mpsc::Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Everything published so far and not yet received.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

#[derive(Debug)]
pub(crate) struct Notifier<M> {
    subscribers: Mutex<Vec<mpsc::Sender<M>>>,
}

impl<M> Default for Notifier<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<M: Clone> Notifier<M> {
    pub(crate) fn publish(&self, message: M) {
        let Ok(mut subs) = self.subscribers.lock() else {
            tracing::warn!("store notifier lock poisoned; dropping notification");
            return;
        };
        subs.retain(|tx| tx.send(message.clone()).is_ok());
    }

    pub(crate) fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // A poisoned lock still yields a subscription; it just stays silent.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}
