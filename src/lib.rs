//! Passgrove - entry lifecycle for an encrypted, git-versioned secret store
//!
//! Each secret lives as an individually-encrypted file inside a directory
//! tree; directory structure carries meaning (entry names, mount points).
//! Passgrove implements the lifecycle of those entries: move, copy,
//! delete, and subtree prune, with git bookkeeping around every mutation.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to the store)
//! - [`store`] - The lifecycle engine and its collaborator traits
//! - [`secrets`] - Secret model and the format resolver
//! - [`queue`] - Serialized deferred execution for git commits
//! - [`config`] - Per-store configuration schema and loading
//! - [`ui`] - Output utilities
//!
//! # Correctness invariants
//!
//! 1. The fast path never decrypts: a direct move/copy preserves stored
//!    ciphertext byte for byte
//! 2. The resolver always yields a usable secret; degraded parses are
//!    signalled, never swallowed
//! 3. Git add for one entry never interleaves with a batch commit
//! 4. Partial move failure leaves the entry at both paths; retrying the
//!    move converges

pub mod cli;
pub mod config;
pub mod queue;
pub mod secrets;
pub mod store;
pub mod ui;
