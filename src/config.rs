//! config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Passgrove keeps one small TOML file per store, at `<store>/config.toml`.
//! A missing file yields the defaults; a malformed file is an error rather
//! than a silent fallback.
//!
//! # Surface
//!
//! - `core.autocommit` - commit after each mutating operation (default true)
//! - `core.autopush` - push to the default remote after delete/prune and
//!   scheduled commits (default false)
//!
//! The lifecycle engine reads these values but never writes them.
//!
//! # Example
//!
//! ```no_run
//! use passgrove::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Path::new("/path/to/store")).unwrap();
//! if config.core.autopush {
//!     println!("pushing after removals");
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the per-store configuration file.
pub const CONFIG_FILE: &str = "config.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file exists but is not valid TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Per-store configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Core engine settings.
    #[serde(default)]
    pub core: CoreConfig,
}

/// Settings under the `[core]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Push to the default remote after removals and scheduled commits.
    #[serde(default)]
    pub autopush: bool,

    /// Commit after each mutating operation.
    #[serde(default = "default_true")]
    pub autocommit: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            autopush: false,
            autocommit: true,
        }
    }
}

impl Config {
    /// Load configuration for the store rooted at `store_dir`.
    ///
    /// A missing config file is not an error; defaults apply.
    pub fn load(store_dir: &Path) -> Result<Self, ConfigError> {
        let path = store_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}
