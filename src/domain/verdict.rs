//! Classifier verdicts, explanations, and aggregate statistics.

use super::error::{Result, ThreatscopeError};
use super::feed::Severity;
use serde::{Deserialize, Serialize};

/// Prediction label the classifier uses for malicious content.
pub const THREAT_LABEL: &str = "threat";

/// Prediction label the classifier uses for benign content.
pub const SAFE_LABEL: &str = "non-threat";

/// Binary outcome of a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictKind {
    Threat,
    Safe,
}

impl VerdictKind {
    #[must_use]
    pub const fn is_threat(self) -> bool {
        matches!(self, Self::Threat)
    }

    /// Badge text for the results panel.
    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Threat => "THREAT DETECTED",
            Self::Safe => "SAFE CONTENT",
        }
    }

    /// Category recorded on the feed entry for a submission with this outcome.
    #[must_use]
    pub const fn feed_category(self) -> &'static str {
        match self {
            Self::Threat => "Threat Detected",
            Self::Safe => "Safe Content",
        }
    }

    #[must_use]
    pub const fn feed_severity(self) -> Severity {
        match self {
            Self::Threat => Severity::High,
            Self::Safe => Severity::Low,
        }
    }
}

/// Verdict returned by the remote classifier for one submission.
///
/// `label` keeps the raw prediction string for display; only `kind` drives
/// behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub kind: VerdictKind,
    pub label: String,
}

impl Verdict {
    /// Maps a raw prediction onto a verdict.
    ///
    /// Only [`THREAT_LABEL`] is a threat. Any other label, including unexpected
    /// ones, is treated as safe.
    ///
    /// # Examples
    ///
    /// ```
    /// use threatscope::domain::{Verdict, VerdictKind};
    ///
    /// assert_eq!(Verdict::from_prediction("threat").kind, VerdictKind::Threat);
    /// assert_eq!(Verdict::from_prediction("non-threat").kind, VerdictKind::Safe);
    /// ```
    #[must_use]
    pub fn from_prediction(prediction: &str) -> Self {
        let label = prediction.trim();
        let kind = if label == THREAT_LABEL {
            VerdictKind::Threat
        } else {
            if label != SAFE_LABEL {
                tracing::debug!(label = %label, "unrecognized prediction label, treating as safe");
            }
            VerdictKind::Safe
        };

        Self {
            kind,
            label: label.to_string(),
        }
    }
}

/// Outcome of the explanation request: rationale text or an error message, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Explanation {
    Text(String),
    Error(String),
}

impl Explanation {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) | Self::Error(text) => text,
        }
    }
}

/// Aggregate classification counts reported by the stats provider.
///
/// Invariant: `threat_count + safe_count <= total_count`. The fields are public
/// for reading; [`StatsSnapshot::new`] is the checked constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_count: u64,
    pub threat_count: u64,
    pub safe_count: u64,
}

impl StatsSnapshot {
    /// Builds a snapshot, rejecting counts that violate the sum invariant.
    ///
    /// # Errors
    ///
    /// Returns [`ThreatscopeError::StatsRefresh`] when the class counts exceed
    /// the total.
    pub fn new(total_count: u64, threat_count: u64, safe_count: u64) -> Result<Self> {
        let classified = threat_count.checked_add(safe_count).ok_or_else(|| {
            ThreatscopeError::StatsRefresh("class counts overflow".to_string())
        })?;

        if classified > total_count {
            return Err(ThreatscopeError::StatsRefresh(format!(
                "class counts ({classified}) exceed total ({total_count})"
            )));
        }

        Ok(Self {
            total_count,
            threat_count,
            safe_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_threat_label_is_a_threat() {
        assert!(Verdict::from_prediction("threat").kind.is_threat());
        assert!(Verdict::from_prediction(" threat\n").kind.is_threat());
        assert!(!Verdict::from_prediction("non-threat").kind.is_threat());
        assert!(!Verdict::from_prediction("Threat").kind.is_threat());
        assert!(!Verdict::from_prediction("unknown").kind.is_threat());
    }

    #[test]
    fn test_verdict_kind_drives_feed_fields() {
        assert_eq!(VerdictKind::Threat.feed_category(), "Threat Detected");
        assert_eq!(VerdictKind::Threat.feed_severity(), Severity::High);
        assert_eq!(VerdictKind::Safe.feed_category(), "Safe Content");
        assert_eq!(VerdictKind::Safe.feed_severity(), Severity::Low);
    }

    #[test]
    fn test_snapshot_rejects_counts_above_total() {
        assert!(StatsSnapshot::new(10, 4, 6).is_ok());
        assert!(StatsSnapshot::new(12, 4, 6).is_ok());
        assert!(matches!(
            StatsSnapshot::new(9, 4, 6),
            Err(ThreatscopeError::StatsRefresh(_))
        ));
        assert!(StatsSnapshot::new(u64::MAX, u64::MAX, 1).is_err());
    }

    #[test]
    fn test_explanation_is_text_or_error() {
        let ok = Explanation::Text("The input contains a tautology".to_string());
        let err = Explanation::Error("Error: quota exceeded".to_string());
        assert!(!ok.is_error());
        assert!(err.is_error());
        assert_eq!(err.as_str(), "Error: quota exceeded");
    }
}
