//! Replays a parsed script against a controller on a virtual clock.
//!
//! The replay plays the caller as well: commits are collected and, with echo on,
//! fed back as the new authoritative text, the way a finished search round-trip
//! would update the input.

use serde::Serialize;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use searchbox_core::{InputBinding, InputProps, RawInputEvent, SearchBoxConfig, SearchController};

use crate::script::Step;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    /// Virtual milliseconds since the replay started.
    pub at_ms: u64,
    /// Script line that caused (or was waiting for) the commit.
    pub line: usize,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ReplayOutcome {
    pub commits: Vec<CommitRecord>,
    pub display_text: String,
    pub authoritative_text: String,
}

pub struct Replay {
    binding: InputBinding,
    controller: SearchController<Box<dyn FnMut(&str)>>,
    committed: mpsc::Receiver<String>,
    props: InputProps,
    echo: bool,
    start: Instant,
    now: Instant,
    records: Vec<CommitRecord>,
}

impl Replay {
    pub fn new(config: &SearchBoxConfig, authoritative: &str, echo: bool) -> Self {
        let (tx, rx) = mpsc::channel();
        let sink: Box<dyn FnMut(&str)> = Box::new(move |text: &str| {
            let _ = tx.send(text.to_string());
        });
        let start = Instant::now();
        Self {
            binding: InputBinding::new(config),
            controller: SearchController::new(config, authoritative, sink),
            committed: rx,
            props: InputProps::default(),
            echo,
            start,
            now: start,
            records: Vec::new(),
        }
    }

    pub fn run(mut self, steps: Vec<(usize, Step)>) -> ReplayOutcome {
        for (line, step) in steps {
            self.step(line, step);
        }
        self.controller.dispose();
        ReplayOutcome {
            display_text: self.controller.display_text().to_string(),
            authoritative_text: self.controller.authoritative_text().to_string(),
            commits: self.records,
        }
    }

    fn step(&mut self, line: usize, step: Step) {
        let event = match step {
            Step::Type(text) => RawInputEvent::Change(text),
            Step::Key(key) => RawInputEvent::KeyDown(key),
            Step::Enter => RawInputEvent::KeyDown(self.binding.confirm_key().to_string()),
            Step::Clear => RawInputEvent::ClearClicked,
            Step::External(text) => {
                self.binding.sync_authoritative(&mut self.controller, &text);
                return;
            }
            Step::Fetching(on) => {
                self.props.is_fetching = on;
                return;
            }
            Step::Wait(ms) => {
                self.wait(line, Duration::from_millis(ms));
                return;
            }
        };
        self.binding.dispatch(&mut self.controller, &self.props, event, self.now);
        self.collect(line);
    }

    fn wait(&mut self, line: usize, span: Duration) {
        let target = self.now + span;
        // Fire exactly at the deadline so commit timestamps are accurate.
        if let Some(deadline) = self.controller.next_deadline() {
            if deadline <= target {
                self.now = deadline;
                self.controller.advance(self.now);
                self.collect(line);
            }
        }
        self.now = target;
    }

    fn collect(&mut self, line: usize) {
        while let Ok(text) = self.committed.try_recv() {
            if self.echo {
                self.binding.sync_authoritative(&mut self.controller, &text);
            }
            self.records.push(CommitRecord {
                at_ms: (self.now - self.start).as_millis() as u64,
                line,
                text,
            });
        }
    }
}
