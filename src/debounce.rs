//! Cancellable debounce timer.
//!
//! Each [`Debouncer::schedule`] aborts the pending task, if any, and starts a
//! new one that waits out the delay before computing. A generation counter
//! guards the publish step so a computation that was already running when a
//! newer query arrived can never overwrite the newer result.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::trace;

/// Default delay between the last keystroke and the computation.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Delays a computation until input pauses, publishing the latest value.
pub struct Debouncer<T> {
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    tx: watch::Sender<Option<T>>,
}

impl<T: Send + Sync + 'static> Debouncer<T> {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
            tx,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Receiver for published values. `None` means cleared.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.tx.subscribe()
    }

    /// True while a scheduled computation has not fired yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Schedule `compute(input)` after the delay, cancelling any pending run.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn schedule<I, F>(&mut self, input: I, compute: F)
    where
        I: Send + 'static,
        F: FnOnce(I) -> T + Send + 'static,
    {
        self.cancel();

        let generation = self.generation.load(Ordering::SeqCst);
        let current = Arc::clone(&self.generation);
        let tx = self.tx.clone();
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }
            let value = compute(input);
            if current.load(Ordering::SeqCst) == generation {
                tx.send_replace(Some(value));
            } else {
                trace!(generation, "Discarded stale debounced result");
            }
        }));
    }

    /// Abort the pending computation, if any. Published values are kept.
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Abort the pending computation and clear the published value.
    pub fn clear(&mut self) {
        self.cancel();
        self.tx.send_replace(None);
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
