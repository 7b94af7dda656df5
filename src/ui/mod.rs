//! ui
//!
//! Terminal output helpers.
//!
//! Chatter and warnings respect `--quiet`; debug traces only appear with
//! `--debug`. Everything except entry content goes to stderr, keeping
//! stdout clean for `show` output and pipelines.
//!
//! # Security
//!
//! Nothing routed through this module may contain secret material.
//! Callers pass entry *names*; decrypted bytes are printed by the CLI
//! directly, never through a helper that could end up on stderr.

use std::fmt::Display;

/// How talkative the process is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Only entry content and errors.
    Quiet,
    /// Chatter and warnings.
    Normal,
    /// Everything, including engine traces.
    Debug,
}

impl Verbosity {
    /// Derive the level from the CLI flags. `--quiet` wins over `--debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Status chatter on stdout, suppressed by `--quiet`.
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Engine trace on stderr, shown only with `--debug`.
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Fatal error on stderr. Always shown.
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Warning on stderr, suppressed by `--quiet`.
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Warn that a write was skipped because the destination already holds
/// the identical value. Shared wording for copy, move, and insert.
pub fn warn_meaningless(name: &str, verbosity: Verbosity) {
    warn(
        format!("skipping {name}: the stored secret already matches"),
        verbosity,
    );
}
