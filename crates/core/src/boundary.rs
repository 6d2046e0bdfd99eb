//! Binding between a rendering layer and the controller.
//!
//! The rendering layer owns widgets and DOM events; it reports [`RawInputEvent`]s
//! here and draws whatever [`InputView`] says. The disabled flag comes straight
//! from the caller's fetching flag and is never derived from controller state.

use std::time::Instant;
use tracing::trace;

use crate::controller::{ArmedTimer, CommitSink, SearchController};
use crate::types::{InputProps, InputView, RawInputEvent, SearchBoxConfig, SEARCH_INPUT_COMPONENT, SEARCH_LABEL};

/// What dispatching a raw event did, so the host knows whether to schedule a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// An edit armed a delayed commit; the host must fire it at the deadline.
    Armed(ArmedTimer),
    /// A commit was made synchronously.
    Committed,
    /// The event did not reach the controller or changed nothing.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBinding {
    confirm_key: String,
    visible: bool,
}

impl InputBinding {
    pub fn new(config: &SearchBoxConfig) -> Self {
        Self {
            confirm_key: config.confirm_key.clone(),
            visible: config.should_render(SEARCH_INPUT_COMPONENT),
        }
    }

    pub fn confirm_key(&self) -> &str {
        &self.confirm_key
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Route a raw event to the controller. Edits and key presses are dropped
    /// while the caller is fetching since the input is disabled; the clear
    /// affordance is not part of the input and stays live.
    pub fn dispatch<C: CommitSink>(
        &self,
        controller: &mut SearchController<C>,
        props: &InputProps,
        event: RawInputEvent,
        now: Instant,
    ) -> Dispatch {
        match event {
            RawInputEvent::Change(_) | RawInputEvent::KeyDown(_) if props.is_fetching => {
                trace!("Input disabled while fetching, dropping event");
                Dispatch::Ignored
            }
            RawInputEvent::Change(text) => {
                controller.edit(text, now).map_or(Dispatch::Ignored, Dispatch::Armed)
            }
            RawInputEvent::KeyDown(key) if key == self.confirm_key => {
                if controller.confirm() {
                    Dispatch::Committed
                } else {
                    Dispatch::Ignored
                }
            }
            RawInputEvent::KeyDown(_) => Dispatch::Ignored,
            RawInputEvent::ClearClicked => {
                if controller.is_disposed() {
                    return Dispatch::Ignored;
                }
                controller.clear();
                Dispatch::Committed
            }
        }
    }

    /// Pass the caller's authoritative text through. Call on every render; the
    /// controller only resyncs when the value actually changed.
    pub fn sync_authoritative<C: CommitSink>(
        &self,
        controller: &mut SearchController<C>,
        authoritative: &str,
    ) -> bool {
        controller.external_text_changed(authoritative)
    }

    pub fn view<C: CommitSink>(&self, controller: &SearchController<C>, props: &InputProps) -> InputView {
        InputView {
            visible: self.visible,
            label: SEARCH_LABEL,
            text: controller.display_text().to_string(),
            title: props.title.clone(),
            placeholder: props.placeholder.clone(),
            disabled: props.is_fetching,
            show_clear: !controller.authoritative_text().is_empty(),
            autofocus: true,
        }
    }
}
