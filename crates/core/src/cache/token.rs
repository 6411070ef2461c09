//! Explicit cancellation for in-flight cache reads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation token handed to a read task when it starts.
///
/// Cancellation is cooperative and best-effort: cancelling a token does
/// not abort the underlying network request, it only guarantees the
/// result is discarded. The read task must check [`is_cancelled`] before
/// committing its result into the cache.
///
/// [`is_cancelled`]: CancellationToken::is_cancelled
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a new, live token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the token as cancelled.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns true if the token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns true if both tokens belong to the same read.
    ///
    /// Clones share the underlying flag, so identity follows the flag,
    /// not the handle.
    pub fn same_read(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}
