//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--store <path>`: Use this store root instead of the default
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--no-commit`: Skip the automatic git commit for this invocation

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Passgrove - entry lifecycle for an encrypted, git-versioned secret store
#[derive(Parser, Debug)]
#[command(name = "pgv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the store root (default: ~/.passgrove)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Skip the automatic git commit for this invocation
    #[arg(long, global = true)]
    pub no_commit: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Move an entry to a new location
    #[command(
        name = "mv",
        long_about = "Move an entry to a new location.\n\n\
            A destination ending in '/' is treated as a directory; the entry \
            keeps its base name. Moving a whole directory is not supported."
    )]
    Mv {
        /// Source entry name
        from: String,
        /// Destination entry name or directory (trailing '/')
        to: String,
    },

    /// Copy an entry to a new location
    #[command(name = "cp")]
    Cp {
        /// Source entry name
        from: String,
        /// Destination entry name or directory (trailing '/')
        to: String,
    },

    /// Remove an entry, or a whole subtree with --recursive
    #[command(name = "rm")]
    Rm {
        /// Entry name (or subtree with --recursive)
        name: String,
        /// Remove the entire subtree
        #[arg(short, long)]
        recursive: bool,
    },

    /// Print an entry
    #[command(name = "show")]
    Show {
        /// Entry name
        name: String,
    },

    /// Create or overwrite an entry, prompting for the password
    #[command(name = "insert")]
    Insert {
        /// Entry name
        name: String,
    },
}
