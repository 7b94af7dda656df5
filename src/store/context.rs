//! store::context
//!
//! Per-call options for lifecycle operations.
//!
//! The original-style ambient flags (commit requested, git ops
//! suppressed, pending commit message) are carried as an explicit value
//! threaded down the call chain instead of global state. Contexts are
//! cheap to clone; builders return modified copies.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::queue::CommitQueue;
use crate::store::StoreError;

/// Options for a single lifecycle call.
#[derive(Clone, Default)]
pub struct OpContext {
    no_commit: bool,
    no_git_ops: bool,
    commit_message: Option<String>,
    queue: Option<Arc<CommitQueue>>,
    cancel: Option<Arc<AtomicBool>>,
}

impl OpContext {
    /// A context with defaults: auto-commit on, git ops enabled, inline
    /// commit execution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable the automatic commit for this call.
    pub fn without_commit(mut self) -> Self {
        self.no_commit = true;
        self
    }

    /// Suppress all git bookkeeping for this call.
    ///
    /// Used by callers batching many entries: staging and committing
    /// per entry would interleave add+commit pairs, which git does not
    /// support. The caller commits once after the batch.
    pub fn with_no_git_ops(mut self) -> Self {
        self.no_git_ops = true;
        self
    }

    /// Set the commit message for this call.
    pub fn with_commit_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = Some(message.into());
        self
    }

    /// Defer commits to a serializing queue instead of running inline.
    pub fn with_queue(mut self, queue: Arc<CommitQueue>) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Attach a cancellation flag. Raising it makes the next engine step
    /// fail with [`StoreError::Cancelled`].
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Whether an automatic commit is requested for this call.
    pub fn commit(&self) -> bool {
        !self.no_commit
    }

    /// Whether git bookkeeping is suppressed for this call.
    pub fn no_git_ops(&self) -> bool {
        self.no_git_ops
    }

    /// The commit message for this call, or `default` if none was set.
    pub fn commit_message_or(&self, default: &str) -> String {
        self.commit_message
            .clone()
            .unwrap_or_else(|| default.to_string())
    }

    /// The commit queue, if one is in scope.
    pub fn queue(&self) -> Option<&Arc<CommitQueue>> {
        self.queue.as_ref()
    }

    /// Whether the cancellation flag has been raised.
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Fail with [`StoreError::Cancelled`] if the flag is raised.
    pub fn ensure_active(&self) -> Result<(), StoreError> {
        if self.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        Ok(())
    }
}
