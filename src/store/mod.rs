//! store
//!
//! The entry lifecycle engine and its collaborator seams.
//!
//! # Modules
//!
//! - [`lifecycle`] - copy/move/delete/prune over a storage backend
//! - [`backend`] - the [`Storage`] and [`Codec`] collaborator traits
//! - [`context`] - explicit per-call options ([`OpContext`])
//! - [`error`] - the [`StoreError`] taxonomy
//! - [`fs`] - filesystem reference backend (no git layer)
//! - [`inmem`] - instrumented in-memory backend for tests
//!
//! # Design principles
//!
//! - The engine owns branching logic only; every effect goes through a
//!   collaborator trait
//! - Per-call flags travel in an explicit context value, never globals
//! - No retries, no rollback: failures surface with operation context

pub mod backend;
pub mod context;
pub mod error;
pub mod fs;
pub mod inmem;
pub mod lifecycle;

pub use backend::{Codec, PlainCodec, Storage};
pub use context::OpContext;
pub use error::StoreError;
pub use fs::FsStorage;
pub use inmem::InMemStorage;
pub use lifecycle::Store;
