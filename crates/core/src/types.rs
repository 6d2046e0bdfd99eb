//! Core types shared across SearchBox: controller configuration, the props a
//! caller hands to the search input, the view the rendering layer draws, and
//! the raw input events it reports back.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Name under which the search input is looked up in `hidden_components`.
pub const SEARCH_INPUT_COMPONENT: &str = "search_input";

/// Label rendered in front of the input field.
pub const SEARCH_LABEL: &str = "Search:";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Runtime configuration for a search box. Loaded from `.searchbox.toml` or defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBoxConfig {
    /// Quiet period after the last edit before a delayed commit is evaluated.
    pub debounce_ms: u64,
    /// Minimum number of characters a typed query needs to commit on its own.
    pub min_commit_len: usize,
    /// Key name (as reported by the rendering layer) that confirms the query.
    pub confirm_key: String,
    /// Components that should not be rendered at all.
    pub hidden_components: Vec<String>,
}

impl Default for SearchBoxConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            min_commit_len: 3,
            confirm_key: "Enter".to_string(),
            hidden_components: Vec::new(),
        }
    }
}

impl SearchBoxConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Feature visibility check; replaces a global feature toggler.
    pub fn should_render(&self, component: &str) -> bool {
        !self.hidden_components.iter().any(|c| c == component)
    }
}

// ---------------------------------------------------------------------------
// Rendering boundary
// ---------------------------------------------------------------------------

/// Caller-owned inputs that are purely presentational.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputProps {
    pub title: String,
    pub placeholder: Option<String>,
    /// A search is in flight; the input stops accepting edits.
    pub is_fetching: bool,
}

/// Everything the rendering layer needs to draw the search input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputView {
    pub visible: bool,
    pub label: &'static str,
    pub text: String,
    pub title: String,
    pub placeholder: Option<String>,
    pub disabled: bool,
    /// The clear affordance follows the caller's text, not the typed text.
    pub show_clear: bool,
    /// The input takes focus on mount and again after every update that
    /// leaves it usable (a finished search re-enables it).
    pub autofocus: bool,
}

impl InputView {
    /// Whether the host should (re)focus the input after this update.
    pub fn wants_focus(&self) -> bool {
        self.autofocus && self.visible && !self.disabled
    }
}

/// Raw events reported by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInputEvent {
    /// The input's value changed to the given text.
    Change(String),
    /// A key went down while the input had focus.
    KeyDown(String),
    /// The clear affordance was clicked.
    ClearClicked,
}
