//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! async runtime (`runtime/`) and the domain, animation, feed, and chart layers.
//! It implements the event-driven architecture that keeps the dashboard
//! consistent while remote calls and animations run concurrently.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input / Timers → Events → Event Handler → State Mutations → Actions → Side Effects
//!                                    ↑                                          ↓
//!                                    └──────────── Remote Responses ────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and the submission control flow
//! - [`modes`]: Submission state machine and display level types
//! - [`state`]: Session state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use threatscope::app::{handle_event, Event, SessionSettings, SessionState};
//! use threatscope::ui::Theme;
//!
//! let mut state = SessionState::new(SessionSettings::default(), Theme::default());
//! let (render, _actions) = handle_event(&mut state, &Event::InputChanged { text: "hi".into() })?;
//! assert!(render);
//! # Ok::<(), threatscope::ThreatscopeError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputLevel, NoticeLevel, SubmissionState};
pub use state::{
    ActiveSubmission, ConfidenceProfile, ExplanationPanel, Notice, SessionSettings, SessionState,
    VerdictDisplay,
};
