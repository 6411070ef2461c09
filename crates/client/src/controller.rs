//! Optimistic mutation controller.
//!
//! Coordinates a speculative cache update with an eventual remote
//! confirmation. A submission moves through a fixed sequence:
//!
//! 1. Pending entry (optimistic mode only): cancel in-flight reads for
//!    the todos key, snapshot the current cache value, and write the
//!    speculative collection, all in one atomic staging step.
//! 2. The remote append runs after the simulated latency delay. A
//!    caller-requested simulated error fails here without ever reaching
//!    the server.
//! 3. On failure the snapshot is restored; on success the speculative
//!    value is left in place.
//! 4. Settlement: the key is invalidated and refetched unconditionally,
//!    reconciling the cache with the authoritative store.
//!
//! Mutation errors never propagate past this module; the caller sees a
//! [`SubmitOutcome`], the cache sees a rollback.

use std::sync::Arc;
use std::time::Duration;

use todosync_core::cache::{deserialize_todos, serialize_todos, todos_key, Cache};
use todosync_core::Todo;

use crate::cache::QueryCache;
use crate::error::{ClientError, Result};
use crate::remote::RemoteTodos;

/// How a submission settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The remote append confirmed the todo.
    Appended(Todo),
    /// The mutation failed and the cache was rolled back to its
    /// pre-submission snapshot.
    RolledBack,
}

impl SubmitOutcome {
    /// Returns true if the submission was confirmed by the store.
    pub fn is_appended(&self) -> bool {
        matches!(self, Self::Appended(_))
    }
}

/// Optimistic mutation controller over a query cache and a remote store.
pub struct MutationController<R: RemoteTodos> {
    remote: Arc<R>,
    cache: QueryCache,
    /// Artificial delay before every remote call, simulating traffic time.
    latency: Duration,
    /// When false, the cache is left untouched between submission and
    /// settlement: no speculative write, no snapshot.
    optimistic: bool,
}

impl<R: RemoteTodos> MutationController<R> {
    /// Creates a controller with optimistic updates enabled.
    pub fn new(remote: Arc<R>, cache: QueryCache, latency: Duration) -> Self {
        Self {
            remote,
            cache,
            latency,
            optimistic: true,
        }
    }

    /// Sets whether submissions write speculatively before confirmation.
    pub fn with_optimistic(mut self, optimistic: bool) -> Self {
        self.optimistic = optimistic;
        self
    }

    /// The cache this controller writes through.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Returns the currently visible collection, if the cache holds one.
    ///
    /// `None` means no read has committed since the last invalidation
    /// (the "loading" state).
    pub async fn visible_todos(&self) -> Result<Option<Vec<Todo>>> {
        let key = todos_key();
        match self.cache.get(&key).await? {
            Some(bytes) => Ok(Some(deserialize_todos(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Submits a new todo.
    ///
    /// `id` must be unique per call (caller-generated); `simulate_error`
    /// forces the failure path without contacting the store. Mutation
    /// failures are absorbed into the returned [`SubmitOutcome`]; only
    /// local serialization problems surface as `Err`.
    pub async fn submit(
        &self,
        title: impl Into<String>,
        id: impl Into<String>,
        simulate_error: bool,
    ) -> Result<SubmitOutcome> {
        let todo = Todo::new(id, title);
        let key = todos_key();

        // Pending entry: stage the speculative collection. The cache
        // cancels outstanding reads, reads the current value, and writes
        // the extended collection in one critical section, so concurrent
        // submissions build on each other's entries instead of a stale
        // base.
        let staged = if self.optimistic {
            let pending = todo.clone();
            let snapshot = self
                .cache
                .stage_with(&key, move |current| {
                    let mut todos = match current {
                        Some(bytes) => deserialize_todos(bytes)?,
                        None => Vec::new(),
                    };
                    todos.push(pending);
                    serialize_todos(&todos)
                })
                .await?;
            tracing::debug!(todo_id = %todo.id, "Staged speculative write");
            Some(snapshot)
        } else {
            None
        };

        // Simulate traffic time, then run the mutation
        tokio::time::sleep(self.latency).await;
        let result = if simulate_error {
            Err(ClientError::SimulatedFailure)
        } else {
            self.remote.append(&todo).await
        };

        let outcome = match result {
            Ok(confirmed) => {
                tracing::debug!(todo_id = %confirmed.id, "Append confirmed");
                SubmitOutcome::Appended(confirmed)
            }
            Err(err) => {
                tracing::warn!(todo_id = %todo.id, error = %err, "Mutation failed, rolling back");
                if let Some(snapshot) = staged {
                    self.restore(&key, snapshot).await?;
                }
                SubmitOutcome::RolledBack
            }
        };

        // Settle: always reconcile with the authoritative store
        self.settle(&key).await;

        Ok(outcome)
    }

    /// Restores the cache to its pre-submission snapshot.
    ///
    /// An absent snapshot means the cache held nothing before the
    /// speculative write; restore to the empty collection so the pending
    /// entry disappears either way.
    async fn restore(&self, key: &str, snapshot: Option<Vec<u8>>) -> Result<()> {
        let bytes = match snapshot {
            Some(bytes) => bytes,
            None => serialize_todos(&[])?,
        };
        self.cache.set(key, &bytes).await?;
        Ok(())
    }

    /// Invalidate-and-refetch: discards the cached collection and re-runs
    /// the read operation. Refresh failures are logged, not surfaced; the
    /// next read will try again.
    async fn settle(&self, key: &str) {
        if let Err(err) = self.cache.invalidate(key).await {
            tracing::warn!(error = %err, "Failed to invalidate cache on settle");
        }
        if let Err(err) = self.refresh().await {
            tracing::warn!(error = %err, "Settle refresh failed");
        }
    }

    /// The read operation: fetches the authoritative collection and
    /// commits it into the cache, unless a speculative write cancelled
    /// this read while it was in flight.
    ///
    /// Returns the fetched collection if it was committed, `None` if the
    /// result was discarded.
    pub async fn refresh(&self) -> Result<Option<Vec<Todo>>> {
        let key = todos_key();
        let token = self.cache.begin_read(&key).await;

        // Simulate traffic time before the remote call
        tokio::time::sleep(self.latency).await;
        let todos = self.remote.list().await?;
        let bytes = serialize_todos(&todos)?;

        if self.cache.commit_read(&key, &bytes, &token).await {
            Ok(Some(todos))
        } else {
            tracing::trace!("Refresh result discarded after cancellation");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    /// In-process stand-in for the remote store.
    struct MockRemote {
        todos: RwLock<Vec<Todo>>,
        fail_appends: AtomicBool,
    }

    impl MockRemote {
        fn new() -> Self {
            Self {
                todos: RwLock::new(Vec::new()),
                fail_appends: AtomicBool::new(false),
            }
        }

        fn with_todos(todos: Vec<Todo>) -> Self {
            Self {
                todos: RwLock::new(todos),
                fail_appends: AtomicBool::new(false),
            }
        }

        fn fail_appends(&self) {
            self.fail_appends.store(true, Ordering::SeqCst);
        }

        async fn stored(&self) -> Vec<Todo> {
            self.todos.read().await.clone()
        }
    }

    #[async_trait]
    impl RemoteTodos for MockRemote {
        async fn list(&self) -> Result<Vec<Todo>> {
            Ok(self.todos.read().await.clone())
        }

        async fn append(&self, todo: &Todo) -> Result<Todo> {
            if self.fail_appends.load(Ordering::SeqCst) {
                return Err(ClientError::ServerError {
                    status: 500,
                    message: "injected failure".to_string(),
                });
            }
            self.todos.write().await.push(todo.clone());
            Ok(todo.clone())
        }
    }

    const LATENCY: Duration = Duration::from_millis(100);

    fn controller(remote: Arc<MockRemote>) -> MutationController<MockRemote> {
        MutationController::new(remote, QueryCache::new(64), LATENCY)
    }

    /// Prime the cache with the store's current state, the way a page
    /// load would.
    async fn primed(remote: Arc<MockRemote>) -> MutationController<MockRemote> {
        let controller = controller(remote);
        controller.refresh().await.unwrap();
        controller
    }

    #[tokio::test]
    async fn test_successful_submit_reconciles_with_store() {
        let remote = Arc::new(MockRemote::new());
        let controller = primed(remote.clone()).await;

        let outcome = controller.submit("Buy milk", "id-1", false).await.unwrap();

        assert!(outcome.is_appended());
        let visible = controller.visible_todos().await.unwrap().unwrap();
        assert_eq!(visible, remote.stored().await);
        assert_eq!(visible, vec![Todo::new("id-1", "Buy milk")]);
    }

    #[tokio::test]
    async fn test_speculative_entry_visible_before_settlement() {
        let remote = Arc::new(MockRemote::with_todos(vec![Todo::new("id-0", "existing")]));
        let controller = Arc::new(primed(remote).await);

        let submitting = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.submit("Buy milk", "id-1", false).await })
        };

        // Sample the cache while the mutation is still pending
        tokio::time::sleep(LATENCY / 2).await;
        let visible = controller.visible_todos().await.unwrap().unwrap();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[1], Todo::new("id-1", "Buy milk"));

        submitting.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_simulated_error_rolls_back_to_snapshot() {
        let remote = Arc::new(MockRemote::with_todos(vec![Todo::new("id-0", "existing")]));
        let controller = Arc::new(primed(remote.clone()).await);
        let before = controller.visible_todos().await.unwrap().unwrap();

        let submitting = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.submit("Doomed", "id-1", true).await })
        };

        // The speculative entry shows up first...
        tokio::time::sleep(LATENCY / 2).await;
        let visible = controller.visible_todos().await.unwrap().unwrap();
        assert_eq!(visible.len(), 2);

        // ...then the rollback restores the snapshot exactly
        let outcome = submitting.await.unwrap().unwrap();
        assert_eq!(outcome, SubmitOutcome::RolledBack);
        let after = controller.visible_todos().await.unwrap().unwrap();
        assert_eq!(after, before);

        // The store never saw the submission
        assert!(remote.stored().await.iter().all(|t| t.id != "id-1"));
    }

    #[tokio::test]
    async fn test_transport_failure_takes_same_rollback_path() {
        let remote = Arc::new(MockRemote::new());
        let controller = primed(remote.clone()).await;
        remote.fail_appends();

        let outcome = controller.submit("Buy milk", "id-1", false).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::RolledBack);
        let visible = controller.visible_todos().await.unwrap().unwrap();
        assert!(visible.is_empty());
        assert!(remote.stored().await.is_empty());
    }

    #[tokio::test]
    async fn test_rollback_with_empty_pre_submission_cache() {
        let remote = Arc::new(MockRemote::new());
        // No priming: the cache holds nothing before the submission
        let controller = controller(remote);

        let outcome = controller.submit("Doomed", "id-1", true).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::RolledBack);
        let visible = controller.visible_todos().await.unwrap().unwrap();
        assert!(visible.is_empty());
    }

    #[tokio::test]
    async fn test_non_optimistic_submit_leaves_cache_untouched_until_settle() {
        let remote = Arc::new(MockRemote::with_todos(vec![Todo::new("id-0", "existing")]));
        let controller = primed(remote.clone()).await.with_optimistic(false);
        let before = controller.visible_todos().await.unwrap().unwrap();
        let controller = Arc::new(controller);

        let submitting = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.submit("Buy milk", "id-1", false).await })
        };

        // Stale list stays visible while the mutation is pending
        tokio::time::sleep(LATENCY / 2).await;
        let visible = controller.visible_todos().await.unwrap().unwrap();
        assert_eq!(visible, before);

        // After settlement the new entry is present
        submitting.await.unwrap().unwrap();
        let after = controller.visible_todos().await.unwrap().unwrap();
        assert_eq!(after, remote.stored().await);
        assert_eq!(after.len(), 2);
    }

    #[tokio::test]
    async fn test_non_optimistic_failure_needs_no_rollback() {
        let remote = Arc::new(MockRemote::with_todos(vec![Todo::new("id-0", "existing")]));
        let controller = primed(remote.clone()).await.with_optimistic(false);
        let before = controller.visible_todos().await.unwrap().unwrap();

        let outcome = controller.submit("Doomed", "id-1", true).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::RolledBack);
        let after = controller.visible_todos().await.unwrap().unwrap();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_overlapping_submissions_keep_speculative_entries() {
        let remote = Arc::new(MockRemote::new());
        let controller = Arc::new(primed(remote.clone()).await);

        let first = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.submit("first", "id-1", false).await })
        };

        // Second submission begins while the first is still pending
        tokio::time::sleep(LATENCY / 2).await;
        let second = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.submit("second", "id-2", false).await })
        };

        // Both speculative entries are visible mid-flight
        tokio::time::sleep(LATENCY / 4).await;
        let visible = controller.visible_todos().await.unwrap().unwrap();
        assert!(visible.iter().any(|t| t.id == "id-1"));
        assert!(visible.iter().any(|t| t.id == "id-2"));

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        // Final reconciliation: both entries, in append order
        let settled = controller.visible_todos().await.unwrap().unwrap();
        assert_eq!(settled, remote.stored().await);
        assert_eq!(settled.len(), 2);
        assert_eq!(settled[0].id, "id-1");
        assert_eq!(settled[1].id, "id-2");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_simultaneous_submissions_all_stay_visible() {
        const SUBMISSIONS: usize = 32;
        let remote = Arc::new(MockRemote::new());
        let controller = Arc::new(primed(remote.clone()).await);
        let barrier = Arc::new(tokio::sync::Barrier::new(SUBMISSIONS));

        let mut handles = Vec::new();
        for i in 0..SUBMISSIONS {
            let controller = Arc::clone(&controller);
            let barrier = Arc::clone(&barrier);
            handles.push(tokio::spawn(async move {
                barrier.wait().await;
                controller
                    .submit(format!("todo {i}"), format!("id-{i}"), false)
                    .await
            }));
        }

        // Sample mid-flight: every staging built on the previous one, so
        // no speculative entry may be missing
        tokio::time::sleep(LATENCY / 2).await;
        let visible = controller.visible_todos().await.unwrap().unwrap();
        assert_eq!(visible.len(), SUBMISSIONS);

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let settled = controller.visible_todos().await.unwrap().unwrap();
        assert_eq!(settled, remote.stored().await);
        assert_eq!(settled.len(), SUBMISSIONS);
    }

    #[tokio::test]
    async fn test_late_stale_read_cannot_overwrite_speculative_write() {
        let remote = Arc::new(MockRemote::with_todos(vec![Todo::new("id-0", "existing")]));
        let controller = primed(remote.clone()).await;
        let key = todos_key();

        // A read of the pre-submission state is in flight when the
        // submission begins; its token gets cancelled by the stage
        let stale_token = controller.cache().begin_read(&key).await;
        let stale_bytes = serialize_todos(&remote.stored().await).unwrap();

        let outcome = controller.submit("Buy milk", "id-1", false).await.unwrap();
        assert!(outcome.is_appended());

        // The late-arriving result is discarded, not committed
        let committed = controller
            .cache()
            .commit_read(&key, &stale_bytes, &stale_token)
            .await;
        assert!(!committed);

        let visible = controller.visible_todos().await.unwrap().unwrap();
        assert_eq!(visible, remote.stored().await);
        assert_eq!(visible.len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_commits_authoritative_state() {
        let remote = Arc::new(MockRemote::with_todos(vec![
            Todo::new("id-0", "a"),
            Todo::new("id-1", "b"),
        ]));
        let controller = controller(remote.clone());

        let fetched = controller.refresh().await.unwrap();

        assert_eq!(fetched, Some(remote.stored().await));
        let visible = controller.visible_todos().await.unwrap().unwrap();
        assert_eq!(visible.len(), 2);
    }
}
