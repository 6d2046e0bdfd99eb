//! Root application component — search panel over a results list.

use dioxus::prelude::*;

use crate::search::SearchPanel;
use crate::state::*;

static APP_CSS: Asset = asset!("/assets/styles/app.css");

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: APP_CSS }

        div {
            class: "app-shell",

            SearchPanel {}

            div {
                class: "results-panel",
                ResultsList {}
            }

            StatusBar {}
        }
    }
}

/// Results of the last finished search
#[component]
fn ResultsList() -> Element {
    let results = RESULTS.read();
    let authoritative = AUTHORITATIVE.read();

    if results.is_empty() {
        let hint = if authoritative.is_empty() {
            "Type to search...".to_string()
        } else {
            format!("No results for '{authoritative}'")
        };
        return rsx! {
            div {
                class: "results-empty",
                span { "{hint}" }
            }
        };
    }

    rsx! {
        div {
            class: "results-list",
            for result in results.iter() {
                div {
                    class: "result-item",
                    "{result}"
                }
            }
        }
    }
}

/// Status bar at the bottom of the app
#[component]
fn StatusBar() -> Element {
    let commits = COMMIT_COUNT.read();
    let fetching = FETCHING.read();
    let debounce_ms = CONFIG.read().debounce_ms;

    rsx! {
        div {
            class: "statusbar",
            span { class: "statusbar-debounce", "debounce {debounce_ms}ms" }
            span { class: "statusbar-sep", "|" }
            span { class: "statusbar-commits", "{commits} commits" }
            if *fetching {
                span { class: "statusbar-sep", "|" }
                span { class: "statusbar-fetching", "searching..." }
            }
        }
    }
}
