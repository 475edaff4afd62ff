//! State machine types for the submission cycle and its surrounding UI.
//!
//! # Submission Cycle
//!
//! ```text
//!            submit (accepted)
//!   Idle ─────────────────────► InFlight ──classify ok, explain + stats joined──► Completed ──► Idle
//!    ▲                            │                                                  │
//!    │                            └──────────classify failed──────────► Failed ──────┤
//!    └───────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Completed` and `Failed` are momentary: the handler passes through them on its
//! way back to `Idle` and records which one it was for display. A submission
//! may also start directly from either of them.

use crate::domain::{Result, ThreatscopeError};
use std::fmt;

/// Where the session is in its current submission cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubmissionState {
    /// No submission is running; the analyze control is enabled.
    #[default]
    Idle,
    /// A submission is running; further submits are ignored.
    InFlight,
    /// The last cycle finished all of its steps.
    Completed,
    /// The last cycle was aborted by a classifier failure.
    Failed,
}

impl SubmissionState {
    /// Whether `next` is a legal successor of this state.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle | Self::Completed | Self::Failed, Self::InFlight)
                | (Self::InFlight, Self::Completed | Self::Failed)
                | (Self::Completed | Self::Failed, Self::Idle)
        )
    }

    /// Returns `next` if the transition is legal.
    ///
    /// # Errors
    ///
    /// Returns [`ThreatscopeError::Transition`] for any transition outside the
    /// table above.
    pub fn transition(self, next: Self) -> Result<Self> {
        if self.can_transition_to(next) {
            tracing::debug!(from = %self, to = %next, "submission state transition");
            Ok(next)
        } else {
            Err(ThreatscopeError::Transition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }

    /// Whether a new submission may start from this state.
    #[must_use]
    pub const fn accepts_submission(self) -> bool {
        !matches!(self, Self::InFlight)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::InFlight => "in-flight",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Fill level of the input character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputLevel {
    #[default]
    Normal,
    /// Above 90 % of the limit. The input is clamped, so there is no level
    /// past the limit.
    Warning,
}

impl InputLevel {
    /// Level for `length` characters against a limit of `max`.
    #[must_use]
    pub const fn for_length(length: usize, max: usize) -> Self {
        if length * 10 > max * 9 {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [SubmissionState; 4] = [
        SubmissionState::Idle,
        SubmissionState::InFlight,
        SubmissionState::Completed,
        SubmissionState::Failed,
    ];

    #[test]
    fn test_legal_transition_table() {
        let legal = [
            (SubmissionState::Idle, SubmissionState::InFlight),
            (SubmissionState::Completed, SubmissionState::InFlight),
            (SubmissionState::Failed, SubmissionState::InFlight),
            (SubmissionState::InFlight, SubmissionState::Completed),
            (SubmissionState::InFlight, SubmissionState::Failed),
            (SubmissionState::Completed, SubmissionState::Idle),
            (SubmissionState::Failed, SubmissionState::Idle),
        ];

        for from in ALL {
            for to in ALL {
                let expected = legal.contains(&(from, to));
                assert_eq!(from.can_transition_to(to), expected, "{from} -> {to}");
                assert_eq!(from.transition(to).is_ok(), expected);
            }
        }
    }

    #[test]
    fn test_illegal_transition_reports_states() {
        let err = SubmissionState::Idle
            .transition(SubmissionState::Completed)
            .unwrap_err();
        assert_eq!(err.to_string(), "Illegal submission transition: idle -> completed");
    }

    #[test]
    fn test_only_in_flight_rejects_submissions() {
        assert!(SubmissionState::Idle.accepts_submission());
        assert!(SubmissionState::Completed.accepts_submission());
        assert!(SubmissionState::Failed.accepts_submission());
        assert!(!SubmissionState::InFlight.accepts_submission());
    }

    #[test]
    fn test_input_level_thresholds() {
        assert_eq!(InputLevel::for_length(0, 5000), InputLevel::Normal);
        assert_eq!(InputLevel::for_length(4500, 5000), InputLevel::Normal);
        assert_eq!(InputLevel::for_length(4501, 5000), InputLevel::Warning);
        assert_eq!(InputLevel::for_length(5000, 5000), InputLevel::Warning);
        assert_eq!(InputLevel::for_length(5001, 5000), InputLevel::Warning);
    }
}
