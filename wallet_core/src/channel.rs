//! Publish/subscribe channels backing the adapter's event streams.
//!
//! Two replay policies:
//! - [`EventChannel`]: hot, no replay. Subscribers see only events published
//!   after they subscribed (balance, tip height, transaction batches).
//! - [`LatestValueChannel`]: hot, latest value. A new subscriber first
//!   receives the current value, then every later publication in order
//!   (adapter state, sync progress).
//!
//! Both are single-producer from the adapter's point of view and safe for
//! any number of concurrent subscribers. A subscriber that falls more than
//! `capacity` events behind receives [`RecvError::Lagged`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
pub use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// Receiving end of an [`EventChannel`].
pub type EventReceiver<T> = broadcast::Receiver<T>;

/// Fan-out channel without replay.
#[derive(Debug)]
pub struct EventChannel<T> {
    tx: broadcast::Sender<T>,
}

impl<T: Clone> EventChannel<T> {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Deliver to current subscribers. Nobody listening is not an error.
    pub fn publish(&self, value: T) {
        let _ = self.tx.send(value);
    }

    pub fn subscribe(&self) -> EventReceiver<T> {
        self.tx.subscribe()
    }
}

/// Fan-out channel that hands the current value to new subscribers.
#[derive(Debug)]
pub struct LatestValueChannel<T> {
    latest: Mutex<T>,
    tx: broadcast::Sender<T>,
}

impl<T: Clone> LatestValueChannel<T> {
    pub fn new(initial: T, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            latest: Mutex::new(initial),
            tx,
        }
    }

    pub fn current(&self) -> T {
        self.lock().clone()
    }

    /// Replace the current value and deliver it to subscribers.
    pub fn publish(&self, value: T) {
        let mut latest = self.lock();
        *latest = value.clone();
        let _ = self.tx.send(value);
    }

    /// Compute the next value from the current one; publish only when
    /// `step` returns `Some`. Returns whether a value was published.
    pub fn update(&self, step: impl FnOnce(&T) -> Option<T>) -> bool {
        let mut latest = self.lock();
        match step(&latest) {
            Some(next) => {
                *latest = next.clone();
                let _ = self.tx.send(next);
                true
            }
            None => false,
        }
    }

    /// Subscribe; the receiver yields the current value first.
    pub fn subscribe(&self) -> LatestValueReceiver<T> {
        // Holding the lock keeps a concurrent publish from landing between
        // the snapshot and the subscription.
        let latest = self.lock();
        LatestValueReceiver {
            initial: Some(latest.clone()),
            rx: self.tx.subscribe(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, T> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Receiving end of a [`LatestValueChannel`].
#[derive(Debug)]
pub struct LatestValueReceiver<T> {
    initial: Option<T>,
    rx: broadcast::Receiver<T>,
}

impl<T: Clone> LatestValueReceiver<T> {
    pub async fn recv(&mut self) -> Result<T, RecvError> {
        if let Some(value) = self.initial.take() {
            return Ok(value);
        }
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
        if let Some(value) = self.initial.take() {
            return Ok(value);
        }
        self.rx.try_recv()
    }
}
