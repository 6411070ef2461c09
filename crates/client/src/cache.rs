//! In-memory query cache with explicit read cancellation.
//!
//! The cache is a key-value store with LRU eviction plus bookkeeping for
//! in-flight reads. Every read task registers a [`CancellationToken`]
//! before it suspends; committing the result goes back through the cache,
//! which discards it if the token was cancelled in the meantime. A
//! speculative write cancels all outstanding reads for its key, snapshots
//! the previous value, computes the new one from the current value, and
//! installs it inside a single critical section, so no interleaving read
//! or concurrent staging can observe a half-applied state, clobber the
//! speculative value with stale data, or build on a stale base.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use todosync_core::cache::{Cache, CancellationToken, Result};

/// Cache internals guarded by one lock.
///
/// A single lock over both maps is what makes `stage` atomic with
/// respect to `commit_read`.
#[derive(Debug)]
struct Inner {
    /// Main key-value store with LRU eviction.
    store: LruCache<String, Vec<u8>>,
    /// Cancellation tokens for reads currently in flight, per key.
    inflight: HashMap<String, Vec<CancellationToken>>,
}

/// In-memory query cache.
///
/// Thread-safe via `Arc<RwLock<_>>`; clones share the same storage.
#[derive(Debug, Clone)]
pub struct QueryCache {
    inner: Arc<RwLock<Inner>>,
}

impl QueryCache {
    /// Creates a new query cache with LRU eviction.
    ///
    /// # Panics
    ///
    /// Panics if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).expect("max_entries must be > 0");
        Self {
            inner: Arc::new(RwLock::new(Inner {
                store: LruCache::new(capacity),
                inflight: HashMap::new(),
            })),
        }
    }

    /// Registers a new read for `key` and returns its token.
    ///
    /// The read task must hold on to the token and pass it back to
    /// [`commit_read`]; a `stage` on the same key in the meantime
    /// cancels it.
    ///
    /// [`commit_read`]: QueryCache::commit_read
    pub async fn begin_read(&self, key: &str) -> CancellationToken {
        let token = CancellationToken::new();
        let mut inner = self.inner.write().await;
        inner
            .inflight
            .entry(key.to_string())
            .or_default()
            .push(token.clone());
        token
    }

    /// Commits a read result into the cache unless its token was
    /// cancelled. Returns true if the value was committed.
    pub async fn commit_read(&self, key: &str, value: &[u8], token: &CancellationToken) -> bool {
        let mut inner = self.inner.write().await;

        // Deregister this read whether or not it commits
        let drained = match inner.inflight.get_mut(key) {
            Some(tokens) => {
                tokens.retain(|t| !t.same_read(token));
                tokens.is_empty()
            }
            None => false,
        };
        if drained {
            inner.inflight.remove(key);
        }

        if token.is_cancelled() {
            tracing::trace!(key, "Discarding cancelled read result");
            return false;
        }

        inner.store.put(key.to_string(), value.to_vec());
        true
    }

    /// Stages a speculative write: cancels all outstanding reads for
    /// `key`, snapshots the current value, applies `update` to it, and
    /// installs the result, all in one critical section. The write lock
    /// is held across the read-modify-write, so concurrent stagings
    /// serialize and each one builds on the other's value rather than a
    /// stale base. Returns the snapshot for rollback; an `Err` from
    /// `update` leaves the stored value untouched.
    pub async fn stage_with<E>(
        &self,
        key: &str,
        update: impl FnOnce(Option<&[u8]>) -> std::result::Result<Vec<u8>, E>,
    ) -> std::result::Result<Option<Vec<u8>>, E> {
        let mut inner = self.inner.write().await;

        // Cancel before writing, so a late-arriving read cannot
        // overwrite the speculative value
        if let Some(tokens) = inner.inflight.remove(key) {
            for token in &tokens {
                token.cancel();
            }
            tracing::trace!(key, cancelled = tokens.len(), "Cancelled in-flight reads");
        }

        let snapshot = inner.store.peek(key).cloned();
        let value = update(snapshot.as_deref())?;
        inner.store.put(key.to_string(), value);
        Ok(snapshot)
    }
}

#[async_trait]
impl Cache for QueryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut inner = self.inner.write().await;
        Ok(inner.store.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.store.put(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.store.pop(key);
        Ok(())
    }
}
