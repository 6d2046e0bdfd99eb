//! Global application state using Dioxus signals.
//!
//! This side plays the caller of the search box: it owns the authoritative
//! query, the fetching flag, and the results of the last search.

use std::sync::Mutex;
use std::time::Duration;

use dioxus::prelude::*;
use searchbox_core::SearchBoxConfig;

/// Pre-runtime storage — loaded before Dioxus launches, consumed on first read of [`CONFIG`].
pub static INITIAL_CONFIG: Mutex<Option<SearchBoxConfig>> = Mutex::new(None);

/// Simulated latency of the demo search.
const SEARCH_LATENCY: Duration = Duration::from_millis(300);

/// Corpus searched by the demo caller.
const DEMO_CORPUS: &[&str] = &[
    "cats and dogs",
    "cat toys",
    "dog training basics",
    "rust ownership",
    "rust async runtimes",
    "tokio timers",
    "debouncing user input",
    "search box design",
    "controlled inputs",
    "keyboard shortcuts",
];

// ---------------------------------------------------------------------------
// Global signals
// ---------------------------------------------------------------------------

/// Search box configuration — set once at startup
pub static CONFIG: GlobalSignal<SearchBoxConfig> = Signal::global(|| {
    INITIAL_CONFIG
        .lock()
        .ok()
        .and_then(|mut slot| slot.take())
        .unwrap_or_default()
});

/// The caller's authoritative query (what the last finished search ran with)
pub static AUTHORITATIVE: GlobalSignal<String> = Signal::global(String::new);

/// A search is in flight
pub static FETCHING: GlobalSignal<bool> = Signal::global(|| false);

/// Results of the last finished search
pub static RESULTS: GlobalSignal<Vec<&'static str>> = Signal::global(Vec::new);

/// Number of commits received from the search box
pub static COMMIT_COUNT: GlobalSignal<usize> = Signal::global(|| 0);

/// Search timing in ms
pub static QUERY_TIME_MS: GlobalSignal<f64> = Signal::global(|| 0.0);

/// Generation of the newest search; older searches finish silently
pub static SEARCH_GEN: GlobalSignal<SearchGeneration> = Signal::global(SearchGeneration::default);

/// Monotonic search counter. Only the newest search may publish its results
/// or clear the fetching flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchGeneration(u64);

impl SearchGeneration {
    /// Start a new search and return its generation.
    pub fn begin(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0 == generation
    }
}

/// Commit callback handed to the search box: run the (simulated) search and
/// report the query back as the new authoritative text when it finishes.
pub fn on_commit(query: &str) {
    *COMMIT_COUNT.write() += 1;
    *FETCHING.write() = true;
    let generation = SEARCH_GEN.write().begin();
    let query = query.trim().to_string();
    tracing::info!(query = query.as_str(), generation, "Search committed");

    spawn(async move {
        let start = std::time::Instant::now();
        tokio::time::sleep(SEARCH_LATENCY).await;

        if !SEARCH_GEN.peek().is_current(generation) {
            tracing::debug!(query = query.as_str(), generation, "Search superseded, dropping results");
            return;
        }
        let results = run_search(&query);
        *QUERY_TIME_MS.write() = start.elapsed().as_secs_f64() * 1000.0;
        *RESULTS.write() = results;
        *AUTHORITATIVE.write() = query;
        *FETCHING.write() = false;
    });
}

/// Case-insensitive substring match over the demo corpus.
fn run_search(query: &str) -> Vec<&'static str> {
    if query.is_empty() {
        return vec![];
    }
    let needle = query.to_lowercase();
    DEMO_CORPUS
        .iter()
        .copied()
        .filter(|entry| entry.contains(needle.as_str()))
        .collect()
}
