//! Demo entries used to seed the live feed on its refresh timer.

use crate::domain::{FeedEntry, Severity};
use chrono::{DateTime, Duration, Utc};

/// (category, severity, summary, minutes ago)
const SAMPLES: [(&str, Severity, &str, i64); 5] = [
    (
        "SQL Injection",
        Severity::Critical,
        "Suspicious SQL pattern detected in login form",
        2,
    ),
    (
        "XSS Attack",
        Severity::High,
        "Script injection attempt in comment field",
        5,
    ),
    (
        "Malware",
        Severity::Critical,
        "Trojan signature found in uploaded file",
        8,
    ),
    (
        "Phishing",
        Severity::Medium,
        "Suspicious email link detected",
        12,
    ),
    (
        "DDoS",
        Severity::High,
        "Unusual traffic spike from multiple IPs",
        15,
    ),
];

/// Sample entries timestamped relative to `now`, newest first.
#[must_use]
pub fn sample_entries(now: DateTime<Utc>) -> Vec<FeedEntry> {
    SAMPLES
        .iter()
        .map(|&(category, severity, summary, minutes_ago)| {
            FeedEntry::new(category, severity, summary, now - Duration::minutes(minutes_ago))
        })
        .collect()
}
