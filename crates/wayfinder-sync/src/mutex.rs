//! FIFO async mutex
//!
//! Holders form a chain of oneshot channels. `lock()` swaps a fresh receiver
//! into the head of the chain and waits on the one it replaced, so queue
//! position is fixed at call time rather than at first poll.
//!
//! A waiter that gives up before acquiring forwards its predecessor's
//! receiver to its successor, which keeps the chain intact.
//!
//! Leaking a guard (e.g. with `std::mem::forget`) stalls every later caller.

use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

enum Handoff {
    /// Previous holder is done
    Released,
    /// Previous waiter was dropped; wait on its predecessor instead
    Forward(oneshot::Receiver<Handoff>),
}

pub struct AsyncMutex {
    /// Receiver the next `lock()` call will wait on
    head: Arc<Mutex<oneshot::Receiver<Handoff>>>,
}

impl AsyncMutex {
    pub fn new() -> Self {
        let (tx, rx) = oneshot::channel();
        // Receiver was just created, so this cannot fail
        let _ = tx.send(Handoff::Released);

        Self {
            head: Arc::new(Mutex::new(rx)),
        }
    }

    /// Queue for the lock.
    ///
    /// The returned future resolves once every earlier caller has released.
    pub fn lock(&self) -> LockFuture {
        let (tx, rx) = oneshot::channel();
        let previous = std::mem::replace(&mut *self.head.lock(), rx);

        LockFuture {
            waiting_on: Some(previous),
            release: Some(tx),
        }
    }
}

impl Default for AsyncMutex {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for AsyncMutex {
    fn clone(&self) -> Self {
        Self {
            head: Arc::clone(&self.head),
        }
    }
}

impl std::fmt::Debug for AsyncMutex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncMutex").finish_non_exhaustive()
    }
}

/// Pending place in the queue, resolved by `AsyncMutex::lock`
#[must_use = "futures do nothing unless awaited"]
pub struct LockFuture {
    waiting_on: Option<oneshot::Receiver<Handoff>>,
    release: Option<oneshot::Sender<Handoff>>,
}

impl Future for LockFuture {
    type Output = MutexGuard;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        loop {
            let rx = this
                .waiting_on
                .as_mut()
                .expect("LockFuture polled after completion");

            match Pin::new(rx).poll(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(Handoff::Forward(next))) => {
                    this.waiting_on = Some(next);
                }
                // A sender dropped without a handoff counts as a release
                Poll::Ready(Ok(Handoff::Released)) | Poll::Ready(Err(_)) => {
                    this.waiting_on = None;
                    return Poll::Ready(MutexGuard {
                        release: this.release.take(),
                    });
                }
            }
        }
    }
}

impl Drop for LockFuture {
    fn drop(&mut self) {
        if let (Some(waiting_on), Some(release)) = (self.waiting_on.take(), self.release.take()) {
            let _ = release.send(Handoff::Forward(waiting_on));
        }
    }
}

/// Exclusive access; the next waiter proceeds when this is dropped
#[must_use = "dropping the guard releases the lock immediately"]
pub struct MutexGuard {
    release: Option<oneshot::Sender<Handoff>>,
}

impl MutexGuard {
    /// Release explicitly. Equivalent to dropping the guard.
    pub fn release(self) {}
}

impl Drop for MutexGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            // No successor yet is fine: the receiver sits in the chain head
            let _ = release.send(Handoff::Released);
        }
    }
}
