//! store::lifecycle
//!
//! The entry lifecycle engine: copy, move, delete, and prune.
//!
//! # Two-tier design
//!
//! Copy and move first attempt a storage-level rename of the raw
//! encrypted file (the fast path). It preserves ciphertext untouched: no
//! re-encryption, no plaintext in memory. When the backend cannot
//! represent the operation as a raw byte copy - typically because source
//! and destination do not share an effective recipient set - the engine
//! falls back to decode, re-encode through [`Store::set`], and (for move)
//! a trailing delete.
//!
//! # Git bookkeeping
//!
//! Every mutation stages the touched paths. Whether a commit follows is
//! decided per call ([`OpContext`]); whether a push follows the commit is
//! decided by `core.autopush`. Commits can be deferred to a serializing
//! queue so that concurrent bulk operations never interleave add+commit
//! pairs.
//!
//! # Partial failure
//!
//! A move whose fallback write succeeded but whose delete failed leaves
//! the entry at both paths. That duplicate state is the documented
//! recovery point: retrying the move re-copies (a meaningless write,
//! warned and ignored) and re-attempts the delete. There is no rollback.

use std::sync::Arc;

use crate::config::Config;
use crate::queue::{Task, Ticket};
use crate::secrets::{self, Secret};
use crate::ui::{self, Verbosity};

use super::backend::{Codec, Storage};
use super::context::OpContext;
use super::error::StoreError;

/// One secret store: a storage backend, a codec, and configuration.
///
/// Stores hold no per-entry state; every operation works off the backend's
/// current file tree. Safe to share across threads.
pub struct Store {
    storage: Arc<dyn Storage>,
    codec: Arc<dyn Codec>,
    config: Config,
    recipients: Vec<String>,
    verbosity: Verbosity,
}

impl Store {
    /// Create a store over the given collaborators.
    pub fn new(storage: Arc<dyn Storage>, codec: Arc<dyn Codec>, config: Config) -> Self {
        Self {
            storage,
            codec,
            config,
            recipients: Vec::new(),
            verbosity: Verbosity::Normal,
        }
    }

    /// Set the effective recipient set handed to the codec on writes.
    pub fn with_recipients(mut self, recipients: Vec<String>) -> Self {
        self.recipients = recipients;
        self
    }

    /// Set output verbosity for warnings and debug traces.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Physical storage path for a logical entry name.
    pub fn passfile(&self, name: &str) -> String {
        format!("{}.{}", name, self.codec.ext())
    }

    /// Copy one entry to another location.
    ///
    /// Tries a raw ciphertext copy first; falls back to decode and
    /// re-encode when the backend refuses, so the destination ends up
    /// encrypted for the right recipient set.
    pub fn copy(&self, ctx: &OpContext, from: &str, to: &str) -> Result<(), StoreError> {
        if self.storage.is_dir(from) {
            return Err(StoreError::UnsupportedOperation);
        }

        match self.direct_move(ctx, from, to, false) {
            Ok(()) => {
                ui::debug(format!("direct copy {from} -> {to} successful"), self.verbosity);
                return Ok(());
            }
            Err(err @ (StoreError::DestinationConflict(_) | StoreError::Cancelled)) => {
                return Err(err)
            }
            Err(err) => ui::debug(format!("direct copy failed: {err}"), self.verbosity),
        }

        let secret = self.get(ctx, from)?;
        let dest = resolve_destination(from, to);
        let write_ctx = ctx
            .clone()
            .with_commit_message(format!("Copied from {from} to {to}"));

        match self.set(&write_ctx, &dest, &secret) {
            Err(StoreError::MeaninglessWrite) => {
                ui::warn_meaningless(&dest, self.verbosity);
                Ok(())
            }
            result => result,
        }
    }

    /// Move one entry to another location.
    ///
    /// The fast path is a single rename, which also removes the source.
    /// The fallback decodes, writes the destination, then deletes the
    /// source; see the module docs for the partial-failure contract.
    pub fn move_entry(&self, ctx: &OpContext, from: &str, to: &str) -> Result<(), StoreError> {
        if self.storage.is_dir(from) {
            return Err(StoreError::UnsupportedOperation);
        }

        match self.direct_move(ctx, from, to, true) {
            Ok(()) => {
                ui::debug(format!("direct move {from} -> {to} successful"), self.verbosity);
                return Ok(());
            }
            Err(err @ (StoreError::DestinationConflict(_) | StoreError::Cancelled)) => {
                return Err(err)
            }
            Err(err) => ui::debug(format!("direct move failed: {err}"), self.verbosity),
        }

        let secret = self.get(ctx, from)?;
        let dest = resolve_destination(from, to);
        let write_ctx = ctx
            .clone()
            .with_commit_message(format!("Move from {from} to {to}"));

        match self.set(&write_ctx, &dest, &secret) {
            Err(StoreError::MeaninglessWrite) => {
                ui::warn_meaningless(&dest, self.verbosity)
            }
            Err(err) => return Err(err),
            Ok(()) => {}
        }

        self.delete(ctx, from)
    }

    /// Remove a single entry from the store.
    pub fn delete(&self, ctx: &OpContext, name: &str) -> Result<(), StoreError> {
        self.remove(ctx, name, false)
    }

    /// Remove an entire subtree from the store.
    pub fn prune(&self, ctx: &OpContext, tree: &str) -> Result<(), StoreError> {
        self.remove(ctx, tree, true)
    }

    /// Decoded plaintext of an entry, byte for byte as stored.
    ///
    /// Unlike [`Store::get`] this never re-serializes: a legacy-format
    /// entry comes back in its legacy form.
    pub fn plaintext(&self, ctx: &OpContext, name: &str) -> Result<Vec<u8>, StoreError> {
        ctx.ensure_active()?;
        let path = self.passfile(name);

        let ciphertext = self
            .storage
            .get(&path)
            .map_err(|err| StoreError::backend("read", name, err))?;
        self.codec
            .decode(&ciphertext)
            .map_err(|err| StoreError::backend("decrypt", name, err))
    }

    /// Decode an entry into a structured secret.
    ///
    /// A degraded parse still yields a secret; the degradation is warned,
    /// not failed.
    pub fn get(&self, ctx: &OpContext, name: &str) -> Result<Secret, StoreError> {
        let plaintext = self.plaintext(ctx, name)?;

        let outcome = secrets::parse(&plaintext);
        if let Some(error) = outcome.error() {
            ui::warn(format!("degraded parse of {name}: {error}"), self.verbosity);
        }

        Ok(outcome.into_secret())
    }

    /// Encode a structured secret and write it under `name`.
    ///
    /// Returns [`StoreError::MeaninglessWrite`] when the destination
    /// already decodes to the identical value; nothing is written then.
    pub fn set(&self, ctx: &OpContext, name: &str, secret: &Secret) -> Result<(), StoreError> {
        ctx.ensure_active()?;
        let path = self.passfile(name);
        let plaintext = secret.bytes();

        if self.storage.exists(&path) {
            let current = self
                .storage
                .get(&path)
                .ok()
                .and_then(|cipher| self.codec.decode(&cipher).ok());
            if current.as_deref() == Some(plaintext.as_slice()) {
                return Err(StoreError::MeaninglessWrite);
            }
        }

        let ciphertext = self
            .codec
            .encode(&plaintext, &self.recipients)
            .map_err(|err| StoreError::backend("encrypt", name, err))?;
        self.storage
            .set(&path, &ciphertext)
            .map_err(|err| StoreError::backend("write", name, err))?;

        if ctx.no_git_ops() {
            return Ok(());
        }

        self.storage
            .try_add(std::slice::from_ref(&path))
            .map_err(|err| StoreError::backend("stage", path.as_str(), err))?;

        if !ctx.commit() {
            return Ok(());
        }

        self.schedule_commit(ctx, ctx.commit_message_or(&format!("Write {name}")))
    }

    /// The shared fast path: a raw storage-level rename or copy, followed
    /// by git bookkeeping.
    fn direct_move(
        &self,
        ctx: &OpContext,
        from: &str,
        to: &str,
        delete_source: bool,
    ) -> Result<(), StoreError> {
        ctx.ensure_active()?;

        let pfrom = self.passfile(from);
        let pto = if to.ends_with('/') {
            // directory destination: derive the final name from the source
            let dir = to.trim_end_matches('/');
            if self.storage.exists(dir) && !self.storage.is_dir(dir) {
                return Err(StoreError::DestinationConflict(to.to_string()));
            }
            format!("{dir}/{}", base_name(&pfrom))
        } else {
            self.passfile(to)
        };

        ui::debug(
            format!("direct move {from} ({pfrom}) -> {to} ({pto})"),
            self.verbosity,
        );

        self.storage
            .rename(&pfrom, &pto, delete_source)
            .map_err(|err| StoreError::backend("move", format!("{from} -> {to}"), err))?;

        if ctx.no_git_ops() {
            // batched callers stage and commit once after the whole batch
            ui::debug(
                format!("direct move {from} -> {to}: git ops suppressed"),
                self.verbosity,
            );
            return Ok(());
        }

        self.storage
            .try_add(&[pfrom.clone(), pto.clone()])
            .map_err(|err| StoreError::backend("stage", format!("{pfrom}, {pto}"), err))?;

        if !ctx.commit() {
            return Ok(());
        }

        self.schedule_commit(ctx, ctx.commit_message_or(&format!("Move from {from} to {to}")))
    }

    /// Commit (and, with `core.autopush`, push) via the queue when one is
    /// in scope, inline otherwise.
    fn schedule_commit(&self, ctx: &OpContext, message: String) -> Result<(), StoreError> {
        let storage = Arc::clone(&self.storage);
        let autopush = self.config.core.autopush;

        let task: Task = Box::new(move || {
            storage
                .try_commit(&message)
                .map_err(|err| StoreError::backend("commit", message.clone(), err))?;
            if !autopush {
                return Ok(());
            }
            storage
                .try_push("", "")
                .map_err(|err| StoreError::backend("push", "default remote", err))
        });

        let ticket = match ctx.queue() {
            Some(queue) => queue.add(task),
            None => Ticket::Inline(task),
        };
        ticket.invoke()
    }

    /// Delete one file or a whole subtree, then handle commit and push.
    fn remove(&self, ctx: &OpContext, name: &str, recurse: bool) -> Result<(), StoreError> {
        ctx.ensure_active()?;
        let path = self.passfile(name);

        if recurse {
            self.remove_tree(name, &path)?;
        }

        if let Err(err) = self.remove_single(&path) {
            if !recurse {
                return Err(err);
            }
            // the root of a pruned tree need not itself be a secret
            ui::debug(format!("no entry at the root of {name}: {err}"), self.verbosity);
        }

        if !ctx.commit() {
            return Ok(());
        }

        self.storage
            .try_commit(&format!("Remove {name} from store."))
            .map_err(|err| StoreError::backend("commit", name, err))?;

        if !self.config.core.autopush {
            ui::debug("not pushing, core.autopush is false", self.verbosity);
            return Ok(());
        }

        self.storage
            .try_push("", "")
            .map_err(|err| StoreError::backend("push", name, err))
    }

    fn remove_tree(&self, name: &str, path: &str) -> Result<(), StoreError> {
        if !self.storage.is_dir(name) && !self.storage.exists(path) {
            return Err(StoreError::NotFound);
        }

        let name = name.trim_start_matches('/');
        self.storage
            .prune(name)
            .map_err(|err| StoreError::backend("prune", name, err))?;
        self.storage
            .try_add(&[name.to_string()])
            .map_err(|err| StoreError::backend("stage", name, err))?;
        Ok(())
    }

    fn remove_single(&self, path: &str) -> Result<(), StoreError> {
        if !self.storage.exists(path) {
            return Err(StoreError::NotFound);
        }

        self.storage
            .delete(path)
            .map_err(|err| StoreError::backend("delete", path, err))?;
        self.storage
            .try_add(&[path.to_string()])
            .map_err(|err| StoreError::backend("stage", path, err))?;
        Ok(())
    }
}

/// Resolve a trailing-slash destination against the source's base name.
fn resolve_destination(from: &str, to: &str) -> String {
    if to.ends_with('/') {
        format!("{}{}", to, base_name(from))
    } else {
        to.to_string()
    }
}

fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backend::PlainCodec;
    use crate::store::inmem::{GitCall, InMemStorage};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn test_store() -> (Arc<InMemStorage>, Store) {
        test_store_with_config(Config::default())
    }

    fn test_store_with_config(config: Config) -> (Arc<InMemStorage>, Store) {
        let mem = Arc::new(InMemStorage::new());
        let store = Store::new(
            Arc::clone(&mem) as Arc<dyn Storage>,
            Arc::new(PlainCodec),
            config,
        )
        .with_verbosity(Verbosity::Quiet);
        (mem, store)
    }

    fn ctx() -> OpContext {
        OpContext::new()
    }

    #[test]
    fn passfile_mapping() {
        let (_, store) = test_store();
        assert_eq!(store.passfile("folder/item"), "folder/item.txt");
    }

    #[test]
    fn copy_rejects_directories() {
        let (mem, store) = test_store();
        mem.insert("folder/item.txt", b"pw\n");

        let err = store.copy(&ctx(), "folder", "elsewhere").unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedOperation));
    }

    #[test]
    fn move_rejects_directories() {
        let (mem, store) = test_store();
        mem.insert("folder/item.txt", b"pw\n");

        let err = store.move_entry(&ctx(), "folder", "elsewhere").unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedOperation));
    }

    #[test]
    fn direct_copy_preserves_source_and_commits() {
        let (mem, store) = test_store();
        mem.insert("a.txt", b"pw\nbody\n");

        store.copy(&ctx(), "a", "b").expect("copy");

        assert_eq!(mem.raw("a.txt").unwrap(), b"pw\nbody\n");
        assert_eq!(mem.raw("b.txt").unwrap(), b"pw\nbody\n");
        assert_eq!(
            mem.git_calls(),
            [
                GitCall::Add(vec!["a.txt".into(), "b.txt".into()]),
                GitCall::Commit("Move from a to b".into()),
            ]
        );
    }

    #[test]
    fn direct_move_removes_source() {
        let (mem, store) = test_store();
        mem.insert("a.txt", b"pw\n");

        store.move_entry(&ctx(), "a", "b").expect("move");

        assert!(!mem.exists("a.txt"));
        assert_eq!(mem.raw("b.txt").unwrap(), b"pw\n");
        // one rename, no separate delete step: exactly one commit
        assert_eq!(mem.commits(), ["Move from a to b"]);
    }

    #[test]
    fn trailing_slash_resolves_against_base_name() {
        let (mem, store) = test_store();
        mem.insert("a.txt", b"pw\n");
        mem.insert("b/existing.txt", b"x\n");

        store.copy(&ctx(), "a", "b/").expect("copy into directory");

        assert_eq!(mem.raw("b/a.txt").unwrap(), b"pw\n");
        assert_eq!(mem.raw("a.txt").unwrap(), b"pw\n");
    }

    #[test]
    fn trailing_slash_conflict_fails_before_mutation() {
        let (mem, store) = test_store();
        mem.insert("a.txt", b"pw\n");
        mem.insert("b", b"i am a plain file");

        let err = store.copy(&ctx(), "a", "b/").unwrap_err();
        assert!(matches!(err, StoreError::DestinationConflict(_)));

        // nothing moved, nothing staged
        assert_eq!(mem.paths(), ["a.txt", "b"]);
        assert!(mem.git_calls().is_empty());
    }

    #[test]
    fn fallback_copy_reencodes() {
        let (mem, store) = test_store();
        mem.insert("a.txt", b"pw\nbody\n");
        mem.set_fail_renames(true);

        store.copy(&ctx(), "a", "b").expect("fallback copy");

        assert_eq!(mem.raw("a.txt").unwrap(), b"pw\nbody\n");
        assert_eq!(mem.raw("b.txt").unwrap(), b"pw\nbody\n");
        assert!(mem.commits().contains(&"Copied from a to b".to_string()));
    }

    #[test]
    fn fallback_copy_is_idempotent() {
        let (mem, store) = test_store();
        mem.insert("a.txt", b"pw\nbody\n");
        mem.set_fail_renames(true);

        store.copy(&ctx(), "a", "b").expect("first copy");
        let commits_after_first = mem.commits().len();

        // the second copy finds the identical value and only warns
        store.copy(&ctx(), "a", "b").expect("second copy is a no-op");

        assert_eq!(mem.raw("b.txt").unwrap(), b"pw\nbody\n");
        assert_eq!(mem.commits().len(), commits_after_first);
    }

    #[test]
    fn fallback_move_copies_then_deletes() {
        let (mem, store) = test_store();
        mem.insert("a.txt", b"pw\nbody\n");
        mem.set_fail_renames(true);

        store.move_entry(&ctx(), "a", "b").expect("fallback move");

        assert!(!mem.exists("a.txt"));
        assert_eq!(mem.raw("b.txt").unwrap(), b"pw\nbody\n");
        let commits = mem.commits();
        assert!(commits.contains(&"Move from a to b".to_string()));
        assert!(commits.contains(&"Remove a from store.".to_string()));
    }

    #[test]
    fn fallback_move_decode_failure_writes_nothing() {
        let (mem, store) = test_store();
        // no source entry at all: decode fails before any write
        mem.set_fail_renames(true);

        let err = store.move_entry(&ctx(), "a", "b").unwrap_err();
        assert!(matches!(err, StoreError::Backend { op: "read", .. }));
        assert!(mem.paths().is_empty());
    }

    #[test]
    fn failed_delete_leaves_duplicate_and_retry_converges() {
        let (mem, store) = test_store();
        mem.insert("a.txt", b"pw\nbody\n");
        mem.set_fail_renames(true);
        mem.set_fail_deletes(true);

        // write succeeds, delete fails: entry lives at both paths
        let err = store.move_entry(&ctx(), "a", "b").unwrap_err();
        assert!(matches!(err, StoreError::Backend { op: "delete", .. }));
        assert_eq!(mem.raw("a.txt").unwrap(), b"pw\nbody\n");
        assert_eq!(mem.raw("b.txt").unwrap(), b"pw\nbody\n");

        // retrying the move re-copies (meaningless, warned) and finishes
        mem.set_fail_deletes(false);
        store.move_entry(&ctx(), "a", "b").expect("retry");
        assert!(!mem.exists("a.txt"));
        assert_eq!(mem.raw("b.txt").unwrap(), b"pw\nbody\n");
    }

    #[test]
    fn delete_missing_entry_is_not_found() {
        let (_, store) = test_store();
        let err = store.delete(&ctx(), "missing").unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn delete_stages_and_commits() {
        let (mem, store) = test_store();
        mem.insert("a.txt", b"pw\n");

        store.delete(&ctx(), "a").expect("delete");

        assert!(!mem.exists("a.txt"));
        assert_eq!(
            mem.git_calls(),
            [
                GitCall::Add(vec!["a.txt".into()]),
                GitCall::Commit("Remove a from store.".into()),
            ]
        );
    }

    #[test]
    fn delete_without_commit_stops_after_staging() {
        let (mem, store) = test_store();
        mem.insert("a.txt", b"pw\n");

        store
            .delete(&ctx().without_commit(), "a")
            .expect("delete without commit");

        assert_eq!(mem.git_calls(), [GitCall::Add(vec!["a.txt".into()])]);
    }

    #[test]
    fn prune_missing_tree_is_not_found() {
        let (_, store) = test_store();
        let err = store.prune(&ctx(), "missing").unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn prune_succeeds_without_a_root_entry() {
        let (mem, store) = test_store();
        mem.insert("tree/a.txt", b"a\n");
        mem.insert("tree/sub/b.txt", b"b\n");

        store.prune(&ctx(), "tree").expect("prune");

        assert!(mem.paths().is_empty());
        assert_eq!(mem.commits(), ["Remove tree from store."]);
    }

    #[test]
    fn prune_also_removes_a_root_entry() {
        let (mem, store) = test_store();
        mem.insert("tree.txt", b"root secret\n");
        mem.insert("tree/a.txt", b"a\n");

        store.prune(&ctx(), "tree").expect("prune");

        assert!(!mem.exists("tree.txt"));
        assert!(mem.paths().is_empty());
    }

    #[test]
    fn prune_removes_a_root_file_only_entry() {
        let (mem, store) = test_store();
        mem.insert("single.txt", b"pw\n");

        // no subtree exists; prune is a no-op and the root file still goes
        store.prune(&ctx(), "single").expect("prune");

        assert!(mem.paths().is_empty());
        assert_eq!(mem.commits(), ["Remove single from store."]);
    }

    #[test]
    fn autopush_pushes_after_removal_commit() {
        let mut config = Config::default();
        config.core.autopush = true;
        let (mem, store) = test_store_with_config(config);
        mem.insert("a.txt", b"pw\n");

        store.delete(&ctx(), "a").expect("delete");

        assert!(mem
            .git_calls()
            .contains(&GitCall::Push(String::new(), String::new())));
    }

    #[test]
    fn commit_failure_is_fatal() {
        let (mem, store) = test_store();
        mem.insert("a.txt", b"pw\n");
        mem.set_fail_commits(true);

        let err = store.delete(&ctx(), "a").unwrap_err();
        assert!(matches!(err, StoreError::Backend { op: "commit", .. }));
    }

    #[test]
    fn batched_moves_suppress_git_ops_until_final_commit() {
        let (mem, store) = test_store();
        for i in 0..10 {
            mem.insert(&format!("src/e{i}.txt"), format!("pw{i}\n").as_bytes());
        }

        let batch_ctx = ctx().with_no_git_ops();
        for i in 0..10 {
            store
                .move_entry(&batch_ctx, &format!("src/e{i}"), &format!("dst/e{i}"))
                .expect("batched move");
        }

        // no per-entry staging or commits happened
        assert!(mem.git_calls().is_empty());
        for i in 0..10 {
            assert!(mem.exists(&format!("dst/e{i}.txt")));
            assert!(!mem.exists(&format!("src/e{i}.txt")));
        }

        // one terminal commit covers the whole batch
        mem.try_commit("Moved 10 entries").expect("batch commit");
        assert_eq!(mem.commits(), ["Moved 10 entries"]);
    }

    #[test]
    fn queued_commit_runs_on_close() {
        let (mem, store) = test_store();
        mem.insert("a.txt", b"pw\n");

        let queue = Arc::new(crate::queue::CommitQueue::new());
        let queued_ctx = ctx().with_queue(Arc::clone(&queue));

        store.move_entry(&queued_ctx, "a", "b").expect("move");

        let errors = queue.close();
        assert!(errors.is_empty());
        assert_eq!(mem.commits(), ["Move from a to b"]);
    }

    #[test]
    fn cancelled_context_fails_fast() {
        let (mem, store) = test_store();
        mem.insert("a.txt", b"pw\n");

        let flag = Arc::new(AtomicBool::new(true));
        let cancelled = ctx().with_cancel_flag(Arc::clone(&flag));

        assert!(matches!(
            store.move_entry(&cancelled, "a", "b"),
            Err(StoreError::Cancelled)
        ));
        assert_eq!(mem.raw("a.txt").unwrap(), b"pw\n");

        flag.store(false, Ordering::Relaxed);
        store.move_entry(&cancelled, "a", "b").expect("move");
    }

    #[test]
    fn get_round_trips_structured_content() {
        let (mem, store) = test_store();
        mem.insert("a.txt", b"pw\n---\nuser: alice\n---\nnotes\n");

        let before = store.get(&ctx(), "a").expect("get source");
        store.move_entry(&ctx(), "a", "b").expect("move");
        let after = store.get(&ctx(), "b").expect("get destination");

        assert!(!store.storage.exists(&store.passfile("a")));
        assert_eq!(before, after);
        assert_eq!(after.password(), "pw");
        assert_eq!(after.get("user"), Some("alice"));
        assert_eq!(after.body(), "notes\n");
    }

    #[test]
    fn plaintext_preserves_legacy_format() {
        let (mem, store) = test_store();
        let legacy = b"PASSGROVE-SECRET-1.0\nPassword: pw\n\nold body\n";
        mem.insert("a.txt", legacy);

        // get() parses and would re-serialize as front matter; the raw
        // read path must return the stored form untouched
        assert_eq!(store.plaintext(&ctx(), "a").expect("plaintext"), legacy);
        assert_eq!(store.get(&ctx(), "a").expect("get").password(), "pw");
    }

    #[test]
    fn set_writes_through_codec_and_stages() {
        let (mem, store) = test_store();
        let mut secret = Secret::with_password("pw");
        secret.set("user", "alice");

        store.set(&ctx(), "new/entry", &secret).expect("set");

        assert_eq!(
            mem.raw("new/entry.txt").unwrap(),
            b"pw\n---\nuser: alice\n"
        );
        assert_eq!(
            mem.git_calls(),
            [
                GitCall::Add(vec!["new/entry.txt".into()]),
                GitCall::Commit("Write new/entry".into()),
            ]
        );
    }

    #[test]
    fn set_identical_value_is_meaningless() {
        let (_, store) = test_store();
        let secret = Secret::with_password("pw");

        store.set(&ctx(), "a", &secret).expect("first write");
        assert!(matches!(
            store.set(&ctx(), "a", &secret),
            Err(StoreError::MeaninglessWrite)
        ));
    }
}
