//! store::backend
//!
//! Collaborator contracts for the lifecycle engine.
//!
//! # Design
//!
//! The engine mutates nothing directly. All filesystem and git effects go
//! through [`Storage`]; all encryption goes through [`Codec`]. Both are
//! narrow seams so the engine can be driven by a real encrypted backend,
//! the filesystem reference backend, or an instrumented in-memory double.
//!
//! Paths are logical, slash-separated strings relative to the store root;
//! platform path handling is the implementation's concern.
//!
//! # Error convention
//!
//! Fallible methods return `anyhow::Result`. The engine wraps every
//! failure with operation context before surfacing it, so implementations
//! only describe what went wrong, not where in the lifecycle it happened.

use anyhow::Result;

/// Storage backend for a single store: a file tree plus best-effort git
/// bookkeeping layered on it.
///
/// Implementations own mutual exclusion for the tree and the git index;
/// the engine performs no locking of its own.
pub trait Storage: Send + Sync {
    /// Whether `path` exists (as a file or a directory).
    fn exists(&self, path: &str) -> bool;

    /// Whether `path` is a directory.
    fn is_dir(&self, path: &str) -> bool;

    /// Read the raw stored bytes at `path`.
    fn get(&self, path: &str) -> Result<Vec<u8>>;

    /// Write raw bytes at `path`, creating parents as needed.
    fn set(&self, path: &str, value: &[u8]) -> Result<()>;

    /// Move or copy the raw file at `from` to `to` without decoding it.
    ///
    /// With `delete_source` the source is removed (a rename); without it
    /// the source is left untouched (a copy).
    fn rename(&self, from: &str, to: &str, delete_source: bool) -> Result<()>;

    /// Remove the single file at `path`.
    fn delete(&self, path: &str) -> Result<()>;

    /// Remove the entire subtree rooted at `tree`.
    fn prune(&self, tree: &str) -> Result<()>;

    /// Stage paths in git. Best-effort: backends without git support
    /// return `Ok`.
    fn try_add(&self, paths: &[String]) -> Result<()>;

    /// Commit staged changes. Best-effort, like [`try_add`].
    ///
    /// [`try_add`]: Storage::try_add
    fn try_commit(&self, message: &str) -> Result<()>;

    /// Push to a remote. Empty `remote`/`branch` mean the defaults.
    fn try_push(&self, remote: &str, branch: &str) -> Result<()>;
}

/// Encryption transform for stored entries.
///
/// Recipient *policy* stays outside this crate: the engine passes through
/// the recipient set it was constructed with and never inspects it.
pub trait Codec: Send + Sync {
    /// Physical file suffix for entries encoded by this codec, without
    /// the leading dot.
    fn ext(&self) -> &str;

    /// Decrypt stored bytes into plaintext.
    fn decode(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;

    /// Encrypt plaintext for the given recipients.
    fn encode(&self, plaintext: &[u8], recipients: &[String]) -> Result<Vec<u8>>;
}

/// Identity codec: stores plaintext as-is.
///
/// Used by tests and by the reference CLI; real deployments plug in an
/// encrypting codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainCodec;

impl Codec for PlainCodec {
    fn ext(&self) -> &str {
        "txt"
    }

    fn decode(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        Ok(ciphertext.to_vec())
    }

    fn encode(&self, plaintext: &[u8], _recipients: &[String]) -> Result<Vec<u8>> {
        Ok(plaintext.to_vec())
    }
}
