//! cli
//!
//! Command-line interface layer for Passgrove.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Assemble the store from its collaborators
//! - Delegate to the lifecycle engine
//!
//! The CLI layer is thin: all mutations flow through
//! [`crate::store::Store`]. Errors propagate to `main`, which maps them
//! to a non-zero exit status.

pub mod args;

pub use args::{Cli, Command};

use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::config::Config;
use crate::store::{FsStorage, OpContext, PlainCodec, Store};
use crate::ui::{self, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    let root = store_root(&cli)?;
    let config = Config::load(&root)?;
    let autocommit = config.core.autocommit && !cli.no_commit;

    let storage = FsStorage::new(&root)
        .with_context(|| format!("cannot open store at {}", root.display()))?;
    let store = Store::new(Arc::new(storage), Arc::new(PlainCodec), config)
        .with_verbosity(verbosity);

    let mut ctx = OpContext::new();
    if !autocommit {
        ctx = ctx.without_commit();
    }

    dispatch(&store, &ctx, cli.command, verbosity)
}

/// Resolve the store root: `--store`, or `~/.passgrove`.
fn store_root(cli: &Cli) -> Result<PathBuf> {
    if let Some(root) = &cli.store {
        return Ok(root.clone());
    }
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".passgrove"))
}

fn dispatch(store: &Store, ctx: &OpContext, command: Command, verbosity: Verbosity) -> Result<()> {
    match command {
        Command::Mv { from, to } => {
            store.move_entry(ctx, &from, &to)?;
            ui::print(format!("moved {from} to {to}"), verbosity);
        }
        Command::Cp { from, to } => {
            store.copy(ctx, &from, &to)?;
            ui::print(format!("copied {from} to {to}"), verbosity);
        }
        Command::Rm { name, recursive } => {
            if recursive {
                store.prune(ctx, &name)?;
            } else {
                store.delete(ctx, &name)?;
            }
            ui::print(format!("removed {name}"), verbosity);
        }
        Command::Show { name } => {
            // raw display: the stored bytes, not a re-serialization
            let plaintext = store.plaintext(ctx, &name)?;
            print!("{}", String::from_utf8_lossy(&plaintext));
        }
        Command::Insert { name } => {
            let password = read_password(&name)?;
            let secret = crate::secrets::Secret::with_password(password);
            match store.set(ctx, &name, &secret) {
                Err(crate::store::StoreError::MeaninglessWrite) => {
                    ui::warn_meaningless(&name, verbosity);
                }
                result => result?,
            }
            ui::print(format!("wrote {name}"), verbosity);
        }
    }
    Ok(())
}

/// Read a password: hidden prompt on a terminal, first stdin line
/// otherwise (pipelines, tests).
fn read_password(name: &str) -> Result<String> {
    if std::io::stdin().is_terminal() {
        return rpassword::prompt_password(format!("Password for {name}: "))
            .context("cannot read password");
    }

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("cannot read password from stdin")?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}
