//! store::error
//!
//! Error taxonomy for the entry lifecycle engine.
//!
//! The engine retries nothing. Exactly two conditions are recovered
//! locally by callers inside this crate ([`StoreError::MeaninglessWrite`]
//! becomes a warning, a degraded parse becomes a note); everything else is
//! fatal to the enclosing call and carries enough context to identify the
//! operation and the path that failed.

use thiserror::Error;

/// Errors from lifecycle operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A recursive move or copy was requested.
    #[error("recursive operations are not supported")]
    UnsupportedOperation,

    /// A trailing-slash destination already exists as a plain file.
    #[error("destination {0:?} already exists as a file")]
    DestinationConflict(String),

    /// Delete or prune target does not exist.
    #[error("entry not found")]
    NotFound,

    /// The destination already holds the intended value; nothing was
    /// written. Treated as success-with-warning by move and copy.
    #[error("no need to write: the secret is already there with the right value")]
    MeaninglessWrite,

    /// The per-call cancellation flag was raised.
    #[error("operation cancelled")]
    Cancelled,

    /// A storage or git collaborator failed.
    #[error("failed to {op} {target:?}: {err:#}")]
    Backend {
        /// What the engine was doing.
        op: &'static str,
        /// The entry name or path pair involved.
        target: String,
        /// The collaborator's error chain.
        err: anyhow::Error,
    },
}

impl StoreError {
    /// Wrap a collaborator failure with operation context.
    pub fn backend(op: &'static str, target: impl Into<String>, err: anyhow::Error) -> Self {
        StoreError::Backend {
            op,
            target: target.into(),
            err,
        }
    }
}
