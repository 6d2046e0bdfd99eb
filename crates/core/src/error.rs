//! Error types for configuration loading and the runtime driver.
//!
//! The controller itself has no error paths: every operation is total.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or validate a `.searchbox.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// The driver task behind a [`crate::driver::SearchBoxHandle`] has stopped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("search box driver has shut down")]
pub struct SearchBoxClosed;
