//! Bounded, most-recent-first feed buffer.

use crate::domain::FeedEntry;
use std::collections::VecDeque;

/// Number of entries the live feed retains.
pub const FEED_CAPACITY: usize = 10;

/// Rolling list of feed entries, newest at index 0.
///
/// Length never exceeds [`FEED_CAPACITY`]: inserting at the head of a full
/// buffer evicts the oldest entry from the tail.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use threatscope::domain::{FeedEntry, Severity};
/// use threatscope::feed::LiveFeedBuffer;
///
/// let mut feed = LiveFeedBuffer::new();
/// feed.prepend(FeedEntry::new("Safe Content", Severity::Low, "hello world", Utc::now()));
/// assert_eq!(feed.len(), 1);
/// assert_eq!(feed.head().map(|e| e.category.as_str()), Some("Safe Content"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveFeedBuffer {
    entries: VecDeque<FeedEntry>,
}

impl Default for LiveFeedBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveFeedBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(FEED_CAPACITY + 1),
        }
    }

    /// Inserts `entry` at the head, evicting the tail above capacity.
    pub fn prepend(&mut self, entry: FeedEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(FEED_CAPACITY);

        tracing::debug!(len = self.entries.len(), "feed entry prepended");
    }

    /// Replaces the whole buffer with `entries`, keeping the first
    /// [`FEED_CAPACITY`] in the order given.
    pub fn seed<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = FeedEntry>,
    {
        self.entries.clear();
        self.entries.extend(entries.into_iter().take(FEED_CAPACITY));

        tracing::debug!(len = self.entries.len(), "feed reseeded");
    }

    /// Copy of the current entries, newest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<FeedEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn head(&self) -> Option<&FeedEntry> {
        self.entries.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;
    use chrono::Utc;

    fn entry(n: usize) -> FeedEntry {
        FeedEntry::new(format!("entry-{n}"), Severity::Low, "summary", Utc::now())
    }

    fn categories(feed: &LiveFeedBuffer) -> Vec<String> {
        feed.iter().map(|e| e.category.clone()).collect()
    }

    #[test]
    fn test_prepend_keeps_newest_first_and_evicts_tail() {
        let mut feed = LiveFeedBuffer::new();
        for n in 0..12 {
            feed.prepend(entry(n));
        }

        assert_eq!(feed.len(), FEED_CAPACITY);
        let expected: Vec<String> = (2..12).rev().map(|n| format!("entry-{n}")).collect();
        assert_eq!(categories(&feed), expected);
    }

    #[test]
    fn test_seed_replaces_and_truncates() {
        let mut feed = LiveFeedBuffer::new();
        feed.prepend(entry(99));

        feed.seed((0..15).map(entry));
        assert_eq!(feed.len(), FEED_CAPACITY);
        assert_eq!(feed.head().unwrap().category, "entry-0");
        assert!(!categories(&feed).contains(&"entry-99".to_string()));

        feed.seed(Vec::new());
        assert!(feed.is_empty());
    }

    #[test]
    fn test_interleaved_operations_never_exceed_capacity() {
        let mut feed = LiveFeedBuffer::new();
        for round in 0..40 {
            if round % 7 == 0 {
                feed.seed((0..round % 13).map(entry));
            } else {
                feed.prepend(entry(round));
            }
            assert!(feed.len() <= FEED_CAPACITY);
        }
    }

    #[test]
    fn test_snapshot_is_detached_copy() {
        let mut feed = LiveFeedBuffer::new();
        feed.prepend(entry(1));
        let snapshot = feed.snapshot();
        feed.prepend(entry(2));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(feed.len(), 2);
    }
}
