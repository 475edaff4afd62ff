//! Labelled integer series backing one chart surface.

/// Labels and values of one chart, plus a revision counter.
///
/// The revision increases only when an assignment actually changes the data.
/// Surfaces replay their update animation on a revision change, so re-applying
/// identical data is a no-op end to end.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    labels: Vec<String>,
    values: Vec<u64>,
    revision: u64,
}

impl Dataset {
    /// Dataset initialised with `points` at revision 0.
    #[must_use]
    pub fn from_points<I, L>(points: I) -> Self
    where
        I: IntoIterator<Item = (L, u64)>,
        L: Into<String>,
    {
        let (labels, values) = points
            .into_iter()
            .map(|(label, value)| (label.into(), value))
            .unzip();

        Self {
            labels,
            values,
            revision: 0,
        }
    }

    /// Replaces labels and values atomically.
    ///
    /// # Returns
    ///
    /// `true` if the data changed (and the revision was bumped).
    pub fn assign(&mut self, labels: Vec<String>, values: Vec<u64>) -> bool {
        debug_assert_eq!(labels.len(), values.len());

        if self.labels == labels && self.values == values {
            return false;
        }

        self.labels = labels;
        self.values = values;
        self.revision += 1;
        true
    }

    /// Replaces only the values, keeping the labels.
    pub fn assign_values(&mut self, values: Vec<u64>) -> bool {
        let labels = self.labels.clone();
        self.assign(labels, values)
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    #[must_use]
    pub fn max(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// Share of the value at `index` in the dataset total, as a percentage.
    ///
    /// Returns `0.0` when the total is zero or the index is out of range.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self, index: usize) -> f64 {
        let total = self.total();
        match self.values.get(index) {
            Some(&value) if total > 0 => value as f64 / total as f64 * 100.0,
            _ => 0.0,
        }
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, u64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_bumps_revision_only_on_change() {
        let mut dataset = Dataset::from_points([("a", 1), ("b", 2)]);
        assert_eq!(dataset.revision(), 0);

        assert!(!dataset.assign(vec!["a".into(), "b".into()], vec![1, 2]));
        assert_eq!(dataset.revision(), 0);

        assert!(dataset.assign_values(vec![3, 2]));
        assert_eq!(dataset.revision(), 1);
        assert!(!dataset.assign_values(vec![3, 2]));
        assert_eq!(dataset.revision(), 1);
    }

    #[test]
    fn test_percentage_guards_zero_total() {
        let empty = Dataset::from_points([("Threat", 0), ("Non-Threat", 0)]);
        assert!(empty.percentage(0).abs() < f64::EPSILON);
        assert!(empty.percentage(7).abs() < f64::EPSILON);

        let split = Dataset::from_points([("Threat", 1), ("Non-Threat", 3)]);
        assert!((split.percentage(0) - 25.0).abs() < 1e-9);
        assert!((split.percentage(1) - 75.0).abs() < 1e-9);
    }
}
