//! store::inmem
//!
//! In-memory storage backend.
//!
//! # Design
//!
//! A `BTreeMap` of path to bytes standing in for the file tree, plus a
//! recorded log of every git call. Failure knobs let tests force the
//! engine down its fallback paths (failed renames) and into its
//! documented partial-failure states (failed deletes, failed commits).
//!
//! Directories are implicit: a path is a directory when some stored key
//! lives under it.

use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::{bail, Result};

use super::backend::Storage;

/// One recorded git call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    /// `try_add` with these paths.
    Add(Vec<String>),
    /// `try_commit` with this message.
    Commit(String),
    /// `try_push` with remote and branch ("" means default).
    Push(String, String),
}

#[derive(Default)]
struct Inner {
    files: BTreeMap<String, Vec<u8>>,
    git_log: Vec<GitCall>,
    fail_renames: bool,
    fail_deletes: bool,
    fail_commits: bool,
}

/// In-memory storage with an inspectable git log and failure injection.
#[derive(Default)]
pub struct InMemStorage {
    inner: Mutex<Inner>,
}

impl InMemStorage {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a file.
    pub fn insert(&self, path: &str, value: &[u8]) {
        self.lock().files.insert(path.to_string(), value.to_vec());
    }

    /// Raw bytes at `path`, if present.
    pub fn raw(&self, path: &str) -> Option<Vec<u8>> {
        self.lock().files.get(path).cloned()
    }

    /// All stored paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.lock().files.keys().cloned().collect()
    }

    /// Every git call recorded so far.
    pub fn git_calls(&self) -> Vec<GitCall> {
        self.lock().git_log.clone()
    }

    /// Commit messages recorded so far.
    pub fn commits(&self) -> Vec<String> {
        self.lock()
            .git_log
            .iter()
            .filter_map(|call| match call {
                GitCall::Commit(msg) => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }

    /// Make `rename` fail, forcing the engine onto its fallback path.
    pub fn set_fail_renames(&self, fail: bool) {
        self.lock().fail_renames = fail;
    }

    /// Make `delete` fail.
    pub fn set_fail_deletes(&self, fail: bool) {
        self.lock().fail_deletes = fail;
    }

    /// Make `try_commit` fail.
    pub fn set_fail_commits(&self, fail: bool) {
        self.lock().fail_commits = fail;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("inmem storage poisoned")
    }

    fn is_dir_locked(inner: &Inner, path: &str) -> bool {
        let prefix = format!("{}/", path.trim_end_matches('/'));
        inner.files.keys().any(|k| k.starts_with(&prefix))
    }
}

impl Storage for InMemStorage {
    fn exists(&self, path: &str) -> bool {
        let inner = self.lock();
        inner.files.contains_key(path.trim_end_matches('/'))
            || Self::is_dir_locked(&inner, path)
    }

    fn is_dir(&self, path: &str) -> bool {
        Self::is_dir_locked(&self.lock(), path)
    }

    fn get(&self, path: &str) -> Result<Vec<u8>> {
        match self.lock().files.get(path) {
            Some(value) => Ok(value.clone()),
            None => bail!("no such file: {path}"),
        }
    }

    fn set(&self, path: &str, value: &[u8]) -> Result<()> {
        self.lock().files.insert(path.to_string(), value.to_vec());
        Ok(())
    }

    fn rename(&self, from: &str, to: &str, delete_source: bool) -> Result<()> {
        let mut inner = self.lock();
        if inner.fail_renames {
            bail!("renames disabled");
        }
        let value = match inner.files.get(from) {
            Some(value) => value.clone(),
            None => bail!("no such file: {from}"),
        };
        inner.files.insert(to.to_string(), value);
        if delete_source {
            inner.files.remove(from);
        }
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<()> {
        let mut inner = self.lock();
        if inner.fail_deletes {
            bail!("deletes disabled");
        }
        if inner.files.remove(path).is_none() {
            bail!("no such file: {path}");
        }
        Ok(())
    }

    fn prune(&self, tree: &str) -> Result<()> {
        let mut inner = self.lock();
        let tree = tree.trim_end_matches('/');
        let prefix = format!("{tree}/");
        let doomed: Vec<String> = inner
            .files
            .keys()
            .filter(|k| k.starts_with(&prefix) || *k == tree)
            .cloned()
            .collect();
        // an empty subtree is a no-op; the root entry file is removed
        // separately by the engine
        for path in doomed {
            inner.files.remove(&path);
        }
        Ok(())
    }

    fn try_add(&self, paths: &[String]) -> Result<()> {
        self.lock().git_log.push(GitCall::Add(paths.to_vec()));
        Ok(())
    }

    fn try_commit(&self, message: &str) -> Result<()> {
        let mut inner = self.lock();
        if inner.fail_commits {
            bail!("commits disabled");
        }
        inner.git_log.push(GitCall::Commit(message.to_string()));
        Ok(())
    }

    fn try_push(&self, remote: &str, branch: &str) -> Result<()> {
        self.lock()
            .git_log
            .push(GitCall::Push(remote.to_string(), branch.to_string()));
        Ok(())
    }
}
