//! SearchBox Desktop — Dioxus demo of the debounced search input.

use dioxus::prelude::*;

mod app;
mod search;
mod state;

use app::App;
use state::INITIAL_CONFIG;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("searchbox=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    // Load config before launch — store in Mutex, NOT in the signal
    let cwd = std::env::current_dir().unwrap_or_default();
    let config = searchbox_core::load_searchbox_config(&cwd);
    if let Ok(mut slot) = INITIAL_CONFIG.lock() {
        *slot = Some(config);
    }

    use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

    LaunchBuilder::new()
        .with_cfg(
            Config::default()
                .with_menu(None)
                .with_background_color((10, 10, 10, 255))
                .with_disable_context_menu(true)
                .with_window(
                    WindowBuilder::new()
                        .with_title("SearchBox")
                        .with_inner_size(LogicalSize::new(720.0, 480.0))
                        .with_min_inner_size(LogicalSize::new(400.0, 300.0))
                        .with_resizable(true)
                        .with_decorations(true),
                ),
        )
        .launch(App);
}
