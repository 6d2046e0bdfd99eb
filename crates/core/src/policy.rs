//! Commit policy for the debounce timer path.
//!
//! Confirm and clear bypass this entirely; only a fired timer asks the policy.

use crate::types::SearchBoxConfig;

/// Why a delayed commit was allowed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitReason {
    /// The text reached the minimum commit length.
    LongEnough,
    /// The text was emptied while the caller still holds a non-empty search.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitPolicy {
    min_len: usize,
}

impl Default for CommitPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

impl CommitPolicy {
    pub fn new(min_len: usize) -> Self {
        Self { min_len }
    }

    pub fn from_config(config: &SearchBoxConfig) -> Self {
        Self::new(config.min_commit_len)
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Length of `text` as the policy counts it (Unicode scalar values).
    pub fn measure(text: &str) -> usize {
        text.chars().count()
    }

    /// Decide whether `display` should commit, given the caller's current
    /// authoritative text. Length counts Unicode scalar values.
    ///
    /// The reset branch compares against the caller's text, not the text shown
    /// before the edit: repeated empty edits keep committing until the caller
    /// itself reports an empty search.
    pub fn evaluate(&self, display: &str, authoritative: &str) -> Option<CommitReason> {
        if display.is_empty() {
            // An empty query never counts as "long enough", even with min_len == 0.
            return (display != authoritative).then_some(CommitReason::Reset);
        }
        (Self::measure(display) >= self.min_len).then_some(CommitReason::LongEnough)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_fragments_do_not_commit() {
        let policy = CommitPolicy::default();
        assert_eq!(policy.evaluate("a", ""), None);
        assert_eq!(policy.evaluate("ab", "cats"), None);
    }

    #[test]
    fn min_length_commits() {
        let policy = CommitPolicy::default();
        assert_eq!(policy.evaluate("abc", ""), Some(CommitReason::LongEnough));
        assert_eq!(policy.evaluate("abc", "abc"), Some(CommitReason::LongEnough));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let policy = CommitPolicy::default();
        // Two characters, six bytes.
        assert_eq!(policy.evaluate("日本", ""), None);
        assert_eq!(policy.evaluate("日本語", ""), Some(CommitReason::LongEnough));
    }

    #[test]
    fn measure_agrees_with_the_length_threshold() {
        let policy = CommitPolicy::default();
        for text in ["ab", "abc", "日本", "日本語", "né", "née"] {
            let long_enough = CommitPolicy::measure(text) >= policy.min_len();
            assert_eq!(policy.evaluate(text, "").is_some(), long_enough, "text {text:?}");
        }
        assert_eq!(CommitPolicy::measure("日本語"), 3);
        assert_eq!("日本語".len(), 9);
    }

    #[test]
    fn empty_commits_only_when_caller_holds_a_search() {
        let policy = CommitPolicy::default();
        assert_eq!(policy.evaluate("", "cats"), Some(CommitReason::Reset));
        assert_eq!(policy.evaluate("", ""), None);
    }

    #[test]
    fn custom_min_len() {
        let policy = CommitPolicy::new(1);
        assert_eq!(policy.evaluate("a", ""), Some(CommitReason::LongEnough));
        assert_eq!(policy.min_len(), 1);
    }
}
