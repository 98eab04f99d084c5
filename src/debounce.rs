//! Per-key trailing debounce on the tokio runtime.
//!
//! DESIGN
//! ======
//! Each key owns at most one pending task. Scheduling again for the same
//! key aborts the previous task, so a burst of drags on one element ends
//! in exactly one save carrying the last position. Different keys never
//! cancel each other. Dropping the debouncer aborts everything still
//! pending so no save fires for a board that is no longer open.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Default)]
pub struct Debouncer {
    pending: HashMap<String, JoinHandle<()>>,
}

impl Debouncer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay`, replacing any task pending for `key`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, key: &str, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.prune();
        if let Some(previous) = self.pending.remove(key) {
            previous.abort();
            debug!(key, "debounced task superseded");
        }

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        self.pending.insert(key.to_owned(), handle);
    }

    /// Abort the task pending for `key`. Returns whether one was pending.
    pub fn cancel(&mut self, key: &str) -> bool {
        self.prune();
        match self.pending.remove(key) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }

    /// Number of keys with a task that has not finished yet.
    pub fn pending(&mut self) -> usize {
        self.prune();
        self.pending.len()
    }

    fn prune(&mut self) {
        self.pending.retain(|_, handle| !handle.is_finished());
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
