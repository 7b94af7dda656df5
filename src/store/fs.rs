//! store::fs
//!
//! Filesystem storage backend.
//!
//! # Design
//!
//! Entries are plain files under a store root. Mutations take an
//! exclusive advisory lock on `<root>/.passgrove.lock` so concurrent
//! processes never interleave writes; the lock is released when the
//! guard file handle drops. Writes are atomic (temp file, then rename)
//! with 0600 permissions on Unix.
//!
//! The git `try_*` methods are no-ops here: this backend has no git
//! layer, and the engine treats staging as best-effort by contract.
//!
//! # Path hygiene
//!
//! Logical paths are slash-separated and relative. Absolute paths and
//! `..` components are rejected so no entry can escape the store root.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use anyhow::{bail, Context, Result};
use fs2::FileExt;

use super::backend::Storage;

/// Name of the advisory lock file inside the store root.
const LOCK_FILE: &str = ".passgrove.lock";

/// Filesystem-backed storage rooted at a single directory.
#[derive(Debug)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("cannot create store root {}", root.display()))?;
        Ok(Self { root })
    }

    /// The store root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a logical path against the root, rejecting escapes.
    fn abs(&self, rel: &str) -> Result<PathBuf> {
        let rel = rel.trim_end_matches('/');
        if rel.is_empty() {
            bail!("empty path");
        }
        let path = Path::new(rel);
        if path.is_absolute() {
            bail!("absolute paths are not allowed: {rel:?}");
        }
        for component in path.components() {
            if !matches!(component, Component::Normal(_)) {
                bail!("path escapes the store root: {rel:?}");
            }
        }
        Ok(self.root.join(path))
    }

    /// Take the store-wide mutation lock. Released when the returned
    /// handle drops.
    fn lock(&self) -> Result<File> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.root.join(LOCK_FILE))
            .context("cannot open store lock file")?;
        file.lock_exclusive().context("cannot lock store")?;
        Ok(file)
    }

    /// Atomic write: temp file with restrictive permissions, then rename.
    fn write_atomic(&self, path: &Path, value: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create directory {}", parent.display()))?;
        }

        let temp = path.with_extension("tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp)
                .with_context(|| format!("cannot create temp file {}", temp.display()))?;

            // restrict before any content lands on disk
            #[cfg(unix)]
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .context("cannot set permissions")?;

            file.write_all(value).context("cannot write entry")?;
            file.sync_all().context("cannot sync entry to disk")?;
        }

        fs::rename(&temp, path)
            .with_context(|| format!("cannot rename temp file into {}", path.display()))?;
        Ok(())
    }

    /// Remove directories left empty after a file went away, up to but
    /// not including the root.
    fn cleanup_empty_parents(&self, path: &Path) {
        let mut dir = path.parent();
        while let Some(d) = dir {
            if d == self.root || fs::remove_dir(d).is_err() {
                break;
            }
            dir = d.parent();
        }
    }
}

impl Storage for FsStorage {
    fn exists(&self, path: &str) -> bool {
        self.abs(path).map(|p| p.exists()).unwrap_or(false)
    }

    fn is_dir(&self, path: &str) -> bool {
        self.abs(path).map(|p| p.is_dir()).unwrap_or(false)
    }

    fn get(&self, path: &str) -> Result<Vec<u8>> {
        let abs = self.abs(path)?;
        fs::read(&abs).with_context(|| format!("cannot read {path:?}"))
    }

    fn set(&self, path: &str, value: &[u8]) -> Result<()> {
        let abs = self.abs(path)?;
        let _guard = self.lock()?;
        self.write_atomic(&abs, value)
    }

    fn rename(&self, from: &str, to: &str, delete_source: bool) -> Result<()> {
        let afrom = self.abs(from)?;
        let ato = self.abs(to)?;
        let _guard = self.lock()?;

        if !afrom.is_file() {
            bail!("source {from:?} does not exist");
        }
        if let Some(parent) = ato.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create directory {}", parent.display()))?;
        }

        if delete_source {
            fs::rename(&afrom, &ato)
                .with_context(|| format!("cannot rename {from:?} to {to:?}"))?;
            self.cleanup_empty_parents(&afrom);
        } else {
            fs::copy(&afrom, &ato).with_context(|| format!("cannot copy {from:?} to {to:?}"))?;
        }
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<()> {
        let abs = self.abs(path)?;
        let _guard = self.lock()?;

        fs::remove_file(&abs).with_context(|| format!("cannot delete {path:?}"))?;
        self.cleanup_empty_parents(&abs);
        Ok(())
    }

    fn prune(&self, tree: &str) -> Result<()> {
        let abs = self.abs(tree)?;
        let _guard = self.lock()?;

        if abs.is_dir() {
            fs::remove_dir_all(&abs).with_context(|| format!("cannot prune {tree:?}"))?;
        } else if abs.is_file() {
            fs::remove_file(&abs).with_context(|| format!("cannot prune {tree:?}"))?;
        }
        // an absent subtree is fine: the entry may exist only as a root
        // file, which the engine removes separately
        self.cleanup_empty_parents(&abs);
        Ok(())
    }

    fn try_add(&self, _paths: &[String]) -> Result<()> {
        Ok(())
    }

    fn try_commit(&self, _message: &str) -> Result<()> {
        Ok(())
    }

    fn try_push(&self, _remote: &str, _branch: &str) -> Result<()> {
        Ok(())
    }
}
