//! Test harness for controller scenarios.
//!
//! Drives a `SearchController` on a virtual clock and records every commit,
//! so scenarios read as a sequence of user actions and elapsed time.

use searchbox_core::{SearchBoxConfig, SearchController};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

type Sink = Box<dyn FnMut(&str)>;

pub struct Harness {
    pub controller: SearchController<Sink>,
    commits: Rc<RefCell<Vec<String>>>,
    now: Instant,
}

impl Harness {
    /// Default config, caller currently holding `authoritative`.
    pub fn new(authoritative: &str) -> Self {
        Self::with_config(SearchBoxConfig::default(), authoritative)
    }

    pub fn with_config(config: SearchBoxConfig, authoritative: &str) -> Self {
        let commits = Rc::new(RefCell::new(Vec::new()));
        let sink_commits = Rc::clone(&commits);
        let sink: Sink = Box::new(move |text: &str| sink_commits.borrow_mut().push(text.to_string()));
        Self {
            controller: SearchController::new(&config, authoritative, sink),
            commits,
            now: Instant::now(),
        }
    }

    pub fn edit(&mut self, text: &str) -> &mut Self {
        self.controller.edit(text, self.now);
        self
    }

    /// Let `ms` milliseconds of virtual time pass, firing the timer if due.
    pub fn wait(&mut self, ms: u64) -> &mut Self {
        self.now += Duration::from_millis(ms);
        self.controller.advance(self.now);
        self
    }

    pub fn display(&self) -> String {
        self.controller.display_text().to_string()
    }

    pub fn commits(&self) -> Vec<String> {
        self.commits.borrow().clone()
    }
}
