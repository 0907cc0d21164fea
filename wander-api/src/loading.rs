//! Request activity signal for loading indicators.
//!
//! Every request made through an [`ApiClient`](crate::ApiClient) emits
//! [`LoadingEvent::Started`] before it is sent and [`LoadingEvent::Finished`]
//! once it settles, whether it succeeded or failed. Subscribers should treat
//! the events as hints: a lagging receiver may miss some, and a retried
//! request produces a second pair.

use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingEvent {
    Started,
    Finished,
}

#[derive(Debug, Clone)]
pub struct LoadingSignal {
    tx: broadcast::Sender<LoadingEvent>,
}

impl LoadingSignal {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LoadingEvent> {
        self.tx.subscribe()
    }

    pub fn emit(&self, event: LoadingEvent) {
        // No subscribers is fine
        let _ = self.tx.send(event);
    }

    /// Emit `Started` now and `Finished` when the guard is dropped
    pub fn begin(&self) -> LoadingGuard {
        self.emit(LoadingEvent::Started);
        LoadingGuard {
            signal: self.clone(),
        }
    }
}

impl Default for LoadingSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[must_use = "dropping the guard immediately emits Finished"]
pub struct LoadingGuard {
    signal: LoadingSignal,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.signal.emit(LoadingEvent::Finished);
    }
}
