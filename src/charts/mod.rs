//! Chart data synchronisation.
//!
//! [`ChartSyncAdapter`] maps stats snapshots and static or derived series onto
//! the three chart surfaces of the dashboard:
//!
//! - **distribution**: two slots, `[threat_count, safe_count]`
//! - **categories**: attack-category bar chart
//! - **timeline**: analyses per day over the last week
//!
//! Each sync is independent of the others and idempotent. Every surface exposes
//! a [`Dataset::revision`] that only moves when its data changes.
//!
//! # Example
//!
//! ```
//! use threatscope::charts::ChartSyncAdapter;
//! use threatscope::domain::StatsSnapshot;
//!
//! let mut charts = ChartSyncAdapter::new();
//! let snapshot = StatsSnapshot::new(12, 5, 7).unwrap();
//!
//! assert!(charts.sync_distribution(&snapshot));
//! assert!(!charts.sync_distribution(&snapshot));
//! assert_eq!(charts.distribution().values(), &[5, 7]);
//! ```

pub mod dataset;
pub mod timeline;

pub use dataset::Dataset;

use crate::domain::StatsSnapshot;
use chrono::NaiveDate;

/// Slot labels of the distribution chart.
pub const DISTRIBUTION_LABELS: [&str; 2] = ["Threat", "Non-Threat"];

/// Reference attack-category counts shown until real category data arrives.
pub const DEFAULT_CATEGORY_COUNTS: [(&str, u64); 8] = [
    ("SQL Injection", 24),
    ("XSS", 18),
    ("Malware", 31),
    ("Phishing", 12),
    ("DDoS", 8),
    ("Brute Force", 15),
    ("MITM", 6),
    ("Backdoor", 4),
];

/// The three chart surfaces and their sync operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSyncAdapter {
    distribution: Dataset,
    categories: Dataset,
    timeline: Dataset,
}

impl Default for ChartSyncAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartSyncAdapter {
    /// Adapter with an empty distribution, the reference categories, and an
    /// all-zero timeline ending today (UTC).
    #[must_use]
    pub fn new() -> Self {
        Self::starting_on(chrono::Utc::now().date_naive())
    }

    /// Same as [`ChartSyncAdapter::new`] with an explicit last timeline day.
    #[must_use]
    pub fn starting_on(today: NaiveDate) -> Self {
        let empty_week = std::collections::BTreeMap::new();

        Self {
            distribution: Dataset::from_points(DISTRIBUTION_LABELS.map(|label| (label, 0_u64))),
            categories: Dataset::from_points(DEFAULT_CATEGORY_COUNTS),
            timeline: Dataset::from_points(timeline::weekly_series(&empty_week, today)),
        }
    }

    /// Replaces the distribution with `[threat_count, safe_count]`.
    ///
    /// # Returns
    ///
    /// `true` if the surface changed.
    pub fn sync_distribution(&mut self, snapshot: &StatsSnapshot) -> bool {
        let changed = self
            .distribution
            .assign_values(vec![snapshot.threat_count, snapshot.safe_count]);

        tracing::debug!(
            threat_count = snapshot.threat_count,
            safe_count = snapshot.safe_count,
            changed,
            "distribution chart synced"
        );

        changed
    }

    /// Replaces the category bar chart.
    ///
    /// Labels keep first-seen order; a repeated label overwrites its earlier
    /// value in place.
    pub fn sync_category_counts<I, L>(&mut self, counts: I) -> bool
    where
        I: IntoIterator<Item = (L, u64)>,
        L: Into<String>,
    {
        let mut labels: Vec<String> = Vec::new();
        let mut values: Vec<u64> = Vec::new();

        for (label, value) in counts {
            let label = label.into();
            if let Some(index) = labels.iter().position(|existing| *existing == label) {
                values[index] = value;
            } else {
                labels.push(label);
                values.push(value);
            }
        }

        let changed = self.categories.assign(labels, values);
        tracing::debug!(changed, "category chart synced");
        changed
    }

    /// Replaces the timeline with `series`, oldest point first.
    pub fn sync_timeline<I, L>(&mut self, series: I) -> bool
    where
        I: IntoIterator<Item = (L, u64)>,
        L: Into<String>,
    {
        let (labels, values) = series
            .into_iter()
            .map(|(label, value)| (label.into(), value))
            .unzip();

        let changed = self.timeline.assign(labels, values);
        tracing::debug!(changed, "timeline chart synced");
        changed
    }

    /// Tooltip text for a distribution slot, e.g. `Threat: 5 (41.7%)`.
    #[must_use]
    pub fn distribution_tooltip(&self, index: usize) -> Option<String> {
        let (label, value) = self.distribution.points().nth(index)?;
        Some(format!(
            "{label}: {value} ({:.1}%)",
            self.distribution.percentage(index)
        ))
    }

    #[must_use]
    pub const fn distribution(&self) -> &Dataset {
        &self.distribution
    }

    #[must_use]
    pub const fn categories(&self) -> &Dataset {
        &self.categories
    }

    #[must_use]
    pub const fn timeline(&self) -> &Dataset {
        &self.timeline
    }
}
