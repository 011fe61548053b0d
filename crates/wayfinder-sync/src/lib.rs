//! Wayfinder Synchronization
//!
//! - `AsyncMutex`: waiters are served strictly in the order `lock()` was
//!   called; the lock is released when the guard is dropped
//! - `LoadingCounter`: reference-counted loading indicator whose updates run
//!   one at a time under an `AsyncMutex`

mod loading;
mod mutex;

pub use loading::{LoadingCounter, LoadingIndicator};
pub use mutex::{AsyncMutex, LockFuture, MutexGuard};
