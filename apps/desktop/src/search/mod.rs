//! Search panel — input field + metadata strip.

mod metadata_strip;
mod search_input;

use dioxus::prelude::*;
use metadata_strip::MetadataStrip;
use search_input::SearchInput;

/// Search panel spanning the full width of the window.
#[component]
pub fn SearchPanel() -> Element {
    rsx! {
        div {
            class: "search-panel",
            SearchInput {}
            MetadataStrip {}
        }
    }
}
