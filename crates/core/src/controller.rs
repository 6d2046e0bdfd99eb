//! Debounce/commit state machine for a single search box.
//!
//! The controller is clock-agnostic: callers pass `now` when editing and either
//! fire the armed timer by token or call [`SearchController::advance`] with the
//! current time. At most one timer is pending; arming always replaces it.

use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::policy::{CommitPolicy, CommitReason};
use crate::types::SearchBoxConfig;

/// Receives committed search text.
pub trait CommitSink {
    fn commit(&mut self, text: &str);
}

impl<F: FnMut(&str)> CommitSink for F {
    fn commit(&mut self, text: &str) {
        self(text)
    }
}

/// Identity of one armed delayed commit. Tokens are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// A delayed commit waiting for its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmedTimer {
    pub token: TimerToken,
    pub deadline: Instant,
}

pub struct SearchController<C> {
    policy: CommitPolicy,
    delay: Duration,
    display: String,
    /// Last authoritative text observed from the caller.
    authoritative: String,
    pending: Option<ArmedTimer>,
    next_token: u64,
    disposed: bool,
    sink: C,
}

impl<C: CommitSink> SearchController<C> {
    /// Create a controller showing the caller's current authoritative text.
    pub fn new(config: &SearchBoxConfig, authoritative: impl Into<String>, sink: C) -> Self {
        let authoritative = authoritative.into();
        Self {
            policy: CommitPolicy::from_config(config),
            delay: config.debounce(),
            display: authoritative.clone(),
            authoritative,
            pending: None,
            next_token: 0,
            disposed: false,
            sink,
        }
    }

    pub fn display_text(&self) -> &str {
        &self.display
    }

    pub fn authoritative_text(&self) -> &str {
        &self.authoritative
    }

    pub fn pending(&self) -> Option<ArmedTimer> {
        self.pending
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|t| t.deadline)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Local keystroke edit: echo immediately and re-arm the delayed commit.
    /// Returns the newly armed timer, or `None` once disposed.
    pub fn edit(&mut self, text: impl Into<String>, now: Instant) -> Option<ArmedTimer> {
        if self.disposed {
            return None;
        }
        self.cancel_pending("superseded by edit");
        self.display = text.into();

        let armed = ArmedTimer {
            token: TimerToken(self.next_token),
            deadline: now + self.delay,
        };
        self.next_token += 1;
        self.pending = Some(armed);
        debug!(token = armed.token.0, len = CommitPolicy::measure(&self.display), "Armed delayed commit");
        Some(armed)
    }

    /// Explicit confirmation. Commits the current text unless it is empty.
    pub fn confirm(&mut self) -> bool {
        if self.disposed || self.display.is_empty() {
            return false;
        }
        self.cancel_pending("confirmed");
        debug!("Committing on confirm");
        self.sink.commit(&self.display);
        true
    }

    /// Clear the input and commit the empty query immediately.
    pub fn clear(&mut self) {
        if self.disposed {
            return;
        }
        self.cancel_pending("cleared");
        self.display.clear();
        debug!("Committing on clear");
        self.sink.commit("");
    }

    /// The caller reported its authoritative text. Resyncs the displayed text
    /// and drops any pending commit when the value actually changed.
    pub fn external_text_changed(&mut self, authoritative: &str) -> bool {
        if self.disposed || authoritative == self.authoritative {
            return false;
        }
        self.cancel_pending("authoritative text changed");
        self.authoritative = authoritative.to_string();
        self.display = authoritative.to_string();
        debug!(len = CommitPolicy::measure(authoritative), "Resynced to authoritative text");
        true
    }

    /// Fire the timer identified by `token`. Tokens that were cancelled or
    /// superseded are ignored. Returns whether a commit was made.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        match self.pending {
            Some(armed) if armed.token == token && !self.disposed => {
                self.pending = None;
                self.commit_if_allowed()
            }
            _ => {
                trace!(token = token.0, "Ignoring stale timer");
                false
            }
        }
    }

    /// Fire the pending timer if its deadline has passed.
    pub fn advance(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(armed) if armed.deadline <= now => self.fire(armed.token),
            _ => false,
        }
    }

    /// Teardown: cancel the pending timer and refuse all further events.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.cancel_pending("disposed");
        self.disposed = true;
    }

    fn cancel_pending(&mut self, why: &'static str) {
        if let Some(armed) = self.pending.take() {
            debug!(token = armed.token.0, reason = why, "Cancelled delayed commit");
        }
    }

    fn commit_if_allowed(&mut self) -> bool {
        // Live text, not whatever was typed when the timer was armed.
        match self.policy.evaluate(&self.display, &self.authoritative) {
            Some(reason) => {
                let reason = match reason {
                    CommitReason::LongEnough => "long enough",
                    CommitReason::Reset => "reset",
                };
                debug!(reason, "Committing after quiet period");
                self.sink.commit(&self.display);
                true
            }
            None => {
                debug!(
                    len = CommitPolicy::measure(&self.display),
                    min_len = self.policy.min_len(),
                    "Quiet period elapsed, nothing to commit"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn controller(authoritative: &str) -> (SearchController<impl FnMut(&str)>, Log) {
        let log: Log = Rc::default();
        let sink_log = Rc::clone(&log);
        let c = SearchController::new(
            &SearchBoxConfig::default(),
            authoritative,
            move |text: &str| sink_log.borrow_mut().push(text.to_string()),
        );
        (c, log)
    }

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn starts_with_authoritative_text() {
        let (c, _) = controller("cats");
        assert_eq!(c.display_text(), "cats");
        assert!(c.pending().is_none());
    }

    #[test]
    fn edit_echoes_immediately_and_commits_after_delay() {
        let (mut c, log) = controller("");
        let t0 = Instant::now();
        let armed = c.edit("rust", t0).unwrap();
        assert_eq!(c.display_text(), "rust");
        assert_eq!(armed.deadline, t0 + DELAY);

        assert!(!c.advance(t0 + DELAY - Duration::from_millis(1)));
        assert!(log.borrow().is_empty());

        assert!(c.advance(t0 + DELAY));
        assert_eq!(*log.borrow(), vec!["rust"]);
        assert!(c.pending().is_none());

        // Nothing left to fire.
        assert!(!c.advance(t0 + DELAY * 4));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn rearming_supersedes_previous_timer() {
        let (mut c, log) = controller("");
        let t0 = Instant::now();
        let first = c.edit("ab", t0).unwrap();
        let second = c.edit("abc", t0 + Duration::from_millis(200)).unwrap();
        assert_ne!(first.token, second.token);

        assert!(!c.fire(first.token), "superseded token must not fire");
        assert!(!c.advance(t0 + DELAY));
        assert!(c.advance(t0 + Duration::from_millis(700)));
        assert_eq!(*log.borrow(), vec!["abc"]);
    }

    #[test]
    fn timer_reads_live_text() {
        let (mut c, log) = controller("");
        let t0 = Instant::now();
        let armed = c.edit("abc", t0).unwrap();
        // Change the live text without re-arming.
        c.display = "abcd".to_string();
        assert!(c.fire(armed.token));
        assert_eq!(*log.borrow(), vec!["abcd"]);
    }

    #[test]
    fn confirm_bypasses_policy_and_cancels_timer() {
        let (mut c, log) = controller("");
        let t0 = Instant::now();
        let armed = c.edit("ab", t0).unwrap();
        assert!(c.confirm());
        assert_eq!(*log.borrow(), vec!["ab"]);
        assert!(c.pending().is_none());
        assert!(!c.fire(armed.token));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn confirm_with_empty_text_is_noop() {
        let (mut c, log) = controller("");
        assert!(!c.confirm());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn clear_commits_empty_immediately() {
        let (mut c, log) = controller("");
        let t0 = Instant::now();
        c.edit("abcdef", t0);
        c.clear();
        assert_eq!(c.display_text(), "");
        assert_eq!(*log.borrow(), vec![""]);
        assert!(!c.advance(t0 + DELAY));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn external_change_resyncs_once() {
        let (mut c, _) = controller("");
        assert!(c.external_text_changed("foo"));
        assert_eq!(c.display_text(), "foo");
        assert!(!c.external_text_changed("foo"));
        assert_eq!(c.authoritative_text(), "foo");
    }

    #[test]
    fn external_change_keeps_local_edit_when_value_unchanged() {
        let (mut c, _) = controller("foo");
        c.edit("foobar", Instant::now());
        assert!(!c.external_text_changed("foo"));
        assert_eq!(c.display_text(), "foobar");
    }

    #[test]
    fn external_change_cancels_pending_commit() {
        let (mut c, log) = controller("");
        let t0 = Instant::now();
        c.edit("abc", t0);
        c.external_text_changed("xyz");
        assert!(!c.advance(t0 + DELAY));
        assert!(log.borrow().is_empty());
        assert_eq!(c.display_text(), "xyz");
    }

    #[test]
    fn dispose_prevents_late_commit() {
        let (mut c, log) = controller("");
        let t0 = Instant::now();
        let armed = c.edit("abcdef", t0).unwrap();
        c.dispose();
        assert!(!c.fire(armed.token));
        assert!(!c.advance(t0 + DELAY));
        assert!(c.edit("more", t0).is_none());
        assert!(!c.confirm());
        c.clear();
        assert!(log.borrow().is_empty());
        assert!(c.is_disposed());
    }
}
