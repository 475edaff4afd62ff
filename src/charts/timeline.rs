//! Seven-day analysis timeline.

use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

/// Number of days shown on the timeline.
pub const TIMELINE_DAYS: u64 = 7;

/// Axis label for a day, e.g. `Oct 14`.
#[must_use]
pub fn day_label(day: NaiveDate) -> String {
    day.format("%b %-d").to_string()
}

/// Days of the window ending at `today`, oldest first.
#[must_use]
pub fn window(today: NaiveDate) -> Vec<NaiveDate> {
    (0..TIMELINE_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .collect()
}

/// Labelled series for the window ending at `today`; days without an entry in
/// `counts` read as zero.
#[must_use]
pub fn weekly_series(counts: &BTreeMap<NaiveDate, u64>, today: NaiveDate) -> Vec<(String, u64)> {
    window(today)
        .into_iter()
        .map(|day| (day_label(day), counts.get(&day).copied().unwrap_or(0)))
        .collect()
}

/// Drops the days of `counts` that have left the window ending at `today`.
pub fn prune(counts: &mut BTreeMap<NaiveDate, u64>, today: NaiveDate) {
    if let Some(oldest) = today.checked_sub_days(Days::new(TIMELINE_DAYS - 1)) {
        counts.retain(|day, _| *day >= oldest);
    }
}
