//! Loading indicator reference counting
//!
//! Any number of components may report "loading started" and "loading
//! ended". The indicator stays visible while at least one load is
//! outstanding. Each update (counter change plus visibility change) runs as
//! one critical section under the FIFO mutex.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;

use crate::mutex::AsyncMutex;

/// Whatever shows or hides the loading overlay
pub trait LoadingIndicator: Send + Sync {
    fn set_visible(&self, visible: bool);
}

pub struct LoadingCounter {
    mutex: AsyncMutex,
    count: Arc<Mutex<usize>>,
    indicator: Arc<dyn LoadingIndicator>,
}

impl LoadingCounter {
    pub fn new(indicator: Arc<dyn LoadingIndicator>) -> Self {
        Self {
            mutex: AsyncMutex::new(),
            count: Arc::new(Mutex::new(0)),
            indicator,
        }
    }

    /// A load started: bump the count and show the indicator
    pub async fn start(&self) {
        let _guard = self.mutex.lock().await;

        let count = {
            let mut count = self.count.lock();
            *count += 1;
            *count
        };
        self.indicator.set_visible(true);

        tracing::debug!(count, "Loading started");
    }

    /// A load ended: drop the count (never below zero) and hide the
    /// indicator once nothing is outstanding
    pub async fn end(&self) {
        let _guard = self.mutex.lock().await;
        self.decrement();
    }

    /// Run `work` with the indicator shown for its duration.
    ///
    /// The matching `end` also happens when `work` panics or the returned
    /// future is dropped early; in that case it runs immediately, outside
    /// the FIFO queue.
    pub async fn track<F>(&self, work: F) -> F::Output
    where
        F: Future,
    {
        self.start().await;
        let pending = PendingEnd {
            counter: Some(self),
        };
        let output = work.await;
        pending.finish().await;
        output
    }

    fn decrement(&self) {
        let count = {
            let mut count = self.count.lock();
            if *count == 0 {
                tracing::warn!("Loading ended without a matching start");
            }
            *count = count.saturating_sub(1);
            *count
        };
        if count == 0 {
            self.indicator.set_visible(false);
        }

        tracing::debug!(count, "Loading ended");
    }

    pub fn count(&self) -> usize {
        *self.count.lock()
    }
}

/// Balances a `start` made by `track` if the tracked work never finishes
struct PendingEnd<'a> {
    counter: Option<&'a LoadingCounter>,
}

impl PendingEnd<'_> {
    async fn finish(mut self) {
        if let Some(counter) = self.counter {
            counter.end().await;
        }
        self.counter = None;
    }
}

impl Drop for PendingEnd<'_> {
    fn drop(&mut self) {
        if let Some(counter) = self.counter.take() {
            tracing::debug!("Tracked load abandoned");
            counter.decrement();
        }
    }
}

impl Clone for LoadingCounter {
    fn clone(&self) -> Self {
        Self {
            mutex: self.mutex.clone(),
            count: Arc::clone(&self.count),
            indicator: Arc::clone(&self.indicator),
        }
    }
}
