//! Live-feed entry model.
//!
//! A [`FeedEntry`] summarizes one analysis (or one demo sample) for the rolling
//! feed panel. Entries are immutable once created and carry a UTC timestamp that
//! the view turns into a relative age.

use super::verdict::Verdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum summary length, counted in characters.
pub const SUMMARY_MAX_CHARS: usize = 100;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// Severity level shown next to a feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// One row of the live feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub category: String,
    pub severity: Severity,
    pub summary: String,
    pub timestamp: DateTime<Utc>,
}

impl FeedEntry {
    /// Creates an entry, truncating `summary` to [`SUMMARY_MAX_CHARS`] characters.
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        severity: Severity,
        summary: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            category: category.into(),
            severity,
            summary: truncate_chars(summary, SUMMARY_MAX_CHARS),
            timestamp,
        }
    }

    /// Entry recorded when a submission cycle completes.
    ///
    /// Category and severity follow the verdict; the summary is the leading part
    /// of the submitted text.
    #[must_use]
    pub fn from_verdict(verdict: &Verdict, source_text: &str, timestamp: DateTime<Utc>) -> Self {
        Self::new(
            verdict.kind.feed_category(),
            verdict.kind.feed_severity(),
            source_text,
            timestamp,
        )
    }

    /// Whether the summary reached the length cap, so the source may have been longer.
    #[must_use]
    pub fn reaches_cap(&self) -> bool {
        self.summary.chars().count() >= SUMMARY_MAX_CHARS
    }

    /// Human-readable age relative to `now` ("just now", "5m ago", "2h ago", "3d ago").
    ///
    /// Timestamps in the future read as "just now".
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, Utc};
    /// use threatscope::domain::{FeedEntry, Severity};
    ///
    /// let now = Utc::now();
    /// let entry = FeedEntry::new("Phishing", Severity::Medium, "Credential harvesting page", now - Duration::minutes(12));
    /// assert_eq!(entry.time_ago(now), "12m ago");
    /// ```
    #[must_use]
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let diff = (now - self.timestamp).num_seconds();

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }
}

/// Returns the first `max` characters of `text` without splitting a character.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
