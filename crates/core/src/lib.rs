//! SearchBox core — a debounced search input controller.
//!
//! [`controller::SearchController`] is the state machine: it echoes edits
//! immediately, arms a single delayed commit, and decides when the caller should
//! run a search. [`boundary::InputBinding`] maps a rendering layer's raw events
//! onto it, and [`driver::spawn_search_box`] runs it on a tokio task.

pub mod boundary;
pub mod controller;
pub mod driver;
pub mod error;
pub mod policy;
pub mod types;

pub use boundary::{Dispatch, InputBinding};
pub use controller::{ArmedTimer, CommitSink, SearchController, TimerToken};
pub use driver::{spawn_search_box, SearchBoxHandle, Snapshot};
pub use error::{ConfigError, SearchBoxClosed};
pub use policy::{CommitPolicy, CommitReason};
pub use types::{InputProps, InputView, RawInputEvent, SearchBoxConfig};

use std::path::Path;
use tracing::{debug, warn};

/// File name looked up in a project root by [`load_searchbox_config`].
pub const CONFIG_FILE_NAME: &str = ".searchbox.toml";

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

const KNOWN_CONFIG_KEYS: &[&str] = &["debounce_ms", "min_commit_len", "confirm_key", "hidden_components"];

/// Simple Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn warn_unknown_keys(table: &toml::Table) {
    for key in table.keys() {
        if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            continue;
        }
        let closest = KNOWN_CONFIG_KEYS.iter().min_by_key(|k| edit_distance(key, k));
        match closest {
            Some(suggestion) if edit_distance(key, suggestion) <= 3 => {
                warn!(
                    key = key.as_str(),
                    suggestion = *suggestion,
                    "Unknown key in {CONFIG_FILE_NAME} — did you mean '{suggestion}'?"
                );
            }
            _ => {
                warn!(
                    key = key.as_str(),
                    "Unknown key in {CONFIG_FILE_NAME} (known keys: {})",
                    KNOWN_CONFIG_KEYS.join(", ")
                );
            }
        }
    }
}

/// Parse and validate config text. Missing keys take their defaults; unknown
/// keys are warned about but not rejected.
pub fn parse_config(content: &str) -> Result<SearchBoxConfig, ConfigError> {
    let table = content.parse::<toml::Table>()?;
    warn_unknown_keys(&table);

    let config: SearchBoxConfig = toml::Value::Table(table).try_into()?;
    if config.debounce_ms == 0 {
        return Err(ConfigError::Invalid {
            key: "debounce_ms",
            reason: "must be greater than zero".to_string(),
        });
    }
    if config.confirm_key.trim().is_empty() {
        return Err(ConfigError::Invalid {
            key: "confirm_key",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(config)
}

/// Read and parse an explicit config file.
pub fn read_config_file(path: &Path) -> Result<SearchBoxConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Load configuration from `.searchbox.toml` in the given project root.
///
/// Returns defaults when the file doesn't exist. If it can't be read or parsed,
/// returns defaults with a warning.
pub fn load_searchbox_config(project_root: &Path) -> SearchBoxConfig {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return SearchBoxConfig::default();
    }

    debug!("Loading {CONFIG_FILE_NAME}");
    match read_config_file(&config_path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %config_path.display(), "{e}; using defaults");
            SearchBoxConfig::default()
        }
    }
}
