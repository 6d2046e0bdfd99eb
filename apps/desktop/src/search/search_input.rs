//! Search input component: renders the controller's view and routes DOM events to it.

use dioxus::prelude::*;
use std::rc::Rc;
use std::time::Instant;

use searchbox_core::{Dispatch, InputBinding, InputProps, RawInputEvent, SearchController};

use crate::state::*;

type Controller = SearchController<Box<dyn FnMut(&str)>>;

#[component]
pub fn SearchInput() -> Element {
    let binding = use_signal(|| InputBinding::new(&CONFIG.read()));
    let mut controller = use_signal(|| -> Controller {
        let sink: Box<dyn FnMut(&str)> = Box::new(on_commit);
        SearchController::new(&CONFIG.read(), AUTHORITATIVE.peek().clone(), sink)
    });

    // Resync whenever the caller's authoritative text changes.
    use_effect(move || {
        let authoritative = AUTHORITATIVE();
        binding.peek().sync_authoritative(&mut *controller.write(), &authoritative);
    });

    // `autofocus` only applies on first mount; a finished search re-enables the
    // input, so give focus back by hand whenever the view asks for it.
    let mut input_el = use_signal(|| None::<Rc<MountedData>>);
    use_effect(move || {
        let is_fetching = FETCHING();
        let _ = AUTHORITATIVE();
        let Some(el) = input_el() else { return };
        let live = InputProps { is_fetching, ..InputProps::default() };
        if binding.peek().view(&*controller.peek(), &live).wants_focus() {
            spawn(async move {
                if let Err(e) = el.set_focus(true).await {
                    tracing::debug!("Refocusing search input failed: {e:?}");
                }
            });
        }
    });

    use_drop(move || {
        if let Ok(mut c) = controller.try_write() {
            c.dispose();
        }
    });

    let props = InputProps {
        title: "Search the demo corpus".to_string(),
        placeholder: Some("Type at least three characters...".to_string()),
        is_fetching: FETCHING(),
    };

    // Dispatch a raw event and, if it armed a delayed commit, fire it by token
    // after the remaining delay. Superseded tokens are ignored by the controller.
    let mut dispatch = move |event: RawInputEvent| {
        let live = InputProps { is_fetching: *FETCHING.peek(), ..InputProps::default() };
        let outcome = binding.peek().dispatch(&mut *controller.write(), &live, event, Instant::now());
        if let Dispatch::Armed(armed) = outcome {
            spawn(async move {
                tokio::time::sleep(armed.deadline.saturating_duration_since(Instant::now())).await;
                controller.write().fire(armed.token);
            });
        }
    };

    let view = binding.read().view(&*controller.read(), &props);
    if !view.visible {
        return rsx! {};
    }

    rsx! {
        div {
            class: if view.show_clear { "search-field has-query" } else { "search-field" },

            label {
                class: "search-label",
                b { "{view.label}" }
            }

            div {
                class: "search-input-row",

                input {
                    class: "search-input",
                    r#type: "text",
                    value: "{view.text}",
                    title: "{view.title}",
                    placeholder: view.placeholder.clone().unwrap_or_default(),
                    disabled: view.disabled,
                    autofocus: view.autofocus,
                    onmounted: move |e: MountedEvent| input_el.set(Some(e.data())),
                    oninput: move |e: Event<FormData>| dispatch(RawInputEvent::Change(e.value())),
                    onkeydown: move |e: Event<KeyboardData>| dispatch(RawInputEvent::KeyDown(e.key().to_string())),
                }

                // Clear button
                if view.show_clear {
                    button {
                        class: "search-clear",
                        onclick: move |_| dispatch(RawInputEvent::ClearClicked),
                        "\u{00D7}"
                    }
                }
            }
        }
    }
}
