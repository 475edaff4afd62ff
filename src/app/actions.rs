//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler never performs I/O or touches a clock. It returns a
//! `Vec<Action>` and the runtime executes each one: spawning remote calls,
//! (re)starting timers, and stopping the loop.
//!
//! # Example
//!
//! ```
//! use threatscope::app::Action;
//! use threatscope::domain::SubmissionId;
//!
//! let actions = vec![
//!     Action::CancelConfidence,
//!     Action::Classify { id: SubmissionId::new(1), text: "hello world".to_string() },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::animation::Tween;
use crate::domain::SubmissionId;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Sends `text` to the remote classifier on behalf of submission `id`.
    Classify {
        id: SubmissionId,
        text: String,
    },

    /// Sends `text` to the remote explainer on behalf of submission `id`.
    Explain {
        id: SubmissionId,
        text: String,
    },

    /// Fetches a fresh stats snapshot.
    ///
    /// `id` is set when the refresh is step three of a submission cycle.
    RefreshStats {
        id: Option<SubmissionId>,
    },

    /// Replaces the confidence tick schedule with a new one.
    AnimateConfidence {
        generation: u64,
        tween: Tween,
    },

    /// Replaces the stat-card tick schedule with a new one.
    AnimateCounters {
        generation: u64,
        tween: Tween,
    },

    /// Stops the confidence tick schedule.
    CancelConfidence,

    /// Restarts the trailing debounce window for an analyze trigger.
    ScheduleSubmit,

    /// Stops every animation schedule and the pending debounce.
    CancelTimers,

    /// Ends the event loop.
    Stop,
}
