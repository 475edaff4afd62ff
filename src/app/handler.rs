//! Event handling and the submission control flow.
//!
//! This module implements the handler that turns user input, timer ticks, and
//! remote responses into state changes and action sequences. It is the
//! submission controller of the dashboard: it guards against overlapping
//! submissions and sequences the remote calls of each cycle.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the input reader, timers, or finished remote tasks
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `SessionState` methods
//! 4. Actions are collected and returned for the runtime to execute
//!
//! # Submission Cycle
//!
//! ```text
//! Submit ─► [guard: not in flight] ─► [validate] ─► Classify
//!                                                       │ ok
//!                                   ┌───────────────────┼──────────────────┐
//!                                   ▼                   ▼                  ▼
//!                          AnimateConfidence         Explain          RefreshStats
//!                                                       │                  │
//!                                                       └──── joined ──────┘
//!                                                              ▼
//!                                                 feed prepend ─► Completed ─► Idle
//! ```
//!
//! A classifier failure goes straight to `Failed ─► Idle` and nothing else runs.
//!
//! # Example
//!
//! ```
//! use threatscope::app::{handle_event, Action, Event, SessionSettings, SessionState};
//! use threatscope::ui::Theme;
//!
//! let mut state = SessionState::new(SessionSettings::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Submit { text: "hello world".into() })?;
//! assert!(render);
//! assert!(matches!(actions.last(), Some(Action::Classify { .. })));
//! # Ok::<(), threatscope::ThreatscopeError>(())
//! ```

use super::modes::NoticeLevel;
use crate::app::state::{ExplanationPanel, VerdictDisplay};
use crate::app::{Action, SessionState};
use crate::domain::error::Result;
use crate::domain::{Explanation, SubmissionRequest, ThreatscopeError};
use crate::feed::sample_entries;
use crate::remote::RemoteResponse;
use chrono::{DateTime, Utc};

/// Events triggered by user input, timers, or remote responses.
///
/// The event loop processes these strictly one at a time, which is what makes
/// every state transition deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The input control changed.
    InputChanged { text: String },

    /// The user triggered analyze; submission is debounced.
    AnalyzeRequested,

    /// The debounce window closed; submits the current input.
    DebounceElapsed,

    /// Submits `text` immediately, bypassing the debounce.
    Submit { text: String },

    /// The user asked for a stats refresh.
    RefreshRequested,

    /// The periodic feed timer fired; reseeds the live feed.
    FeedRefreshTick,

    /// One step of a confidence animation.
    ConfidenceTick { generation: u64, step: u32 },

    /// One step of the stat-card count-up.
    CounterTick { generation: u64, step: u32 },

    /// A remote task finished.
    Remote(RemoteResponse),

    /// The view is going away; stops animations and timers.
    Teardown,

    /// Stops the session.
    Shutdown,
}

/// Processes an event, mutates session state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`: whether the view changed, and the side effects
/// to run in order.
///
/// # Errors
///
/// Returns [`ThreatscopeError::Transition`] if a response would drive the
/// submission state machine through an illegal transition.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
pub fn handle_event(state: &mut SessionState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();
    let now = Utc::now();

    match event {
        Event::InputChanged { text } => {
            state.set_input(text);
            Ok((true, vec![]))
        }
        Event::AnalyzeRequested => {
            if !state.control_enabled() {
                tracing::debug!("analyze requested while in flight, ignoring");
                return Ok((false, vec![]));
            }
            Ok((false, vec![Action::ScheduleSubmit]))
        }
        Event::DebounceElapsed => {
            let text = state.input.clone();
            submit(state, &text, now)
        }
        Event::Submit { text } => submit(state, text, now),
        Event::RefreshRequested => {
            state.manual_refresh_pending = true;
            state.push_notice(NoticeLevel::Info, "Refreshing data...", now);
            Ok((true, vec![Action::RefreshStats { id: None }]))
        }
        Event::FeedRefreshTick => {
            state.feed.seed(sample_entries(now));
            Ok((true, vec![]))
        }
        Event::ConfidenceTick { generation, step } => {
            Ok((state.confidence.apply_step(*generation, *step), vec![]))
        }
        Event::CounterTick { generation, step } => {
            Ok((state.counters.apply_step(*generation, *step), vec![]))
        }
        Event::Remote(response) => handle_remote(state, response, now),
        Event::Teardown => {
            tracing::debug!("view torn down, invalidating animations");
            state.confidence.reset();
            state.counters.settle();
            Ok((false, vec![Action::CancelTimers]))
        }
        Event::Shutdown => {
            tracing::debug!("shutdown requested");
            Ok((false, vec![Action::CancelTimers, Action::Stop]))
        }
    }
}

/// Starts a submission cycle for `text`.
///
/// Ignored while another submission is in flight. Empty input raises a warning
/// notice and makes no remote call.
fn submit(state: &mut SessionState, text: &str, now: DateTime<Utc>) -> Result<(bool, Vec<Action>)> {
    if !state.control_enabled() {
        tracing::debug!("submission already in flight, ignoring");
        return Ok((false, vec![]));
    }

    let request = match SubmissionRequest::new(text) {
        Ok(request) => request,
        Err(ThreatscopeError::Validation(message)) => {
            state.push_notice(NoticeLevel::Warning, message, now);
            return Ok((true, vec![]));
        }
        Err(e) => return Err(e),
    };

    let text = request.text().to_string();
    let id = state.begin_submission(request)?;

    Ok((true, vec![Action::CancelConfidence, Action::Classify { id, text }]))
}

#[allow(clippy::too_many_lines)]
fn handle_remote(
    state: &mut SessionState,
    response: &RemoteResponse,
    now: DateTime<Utc>,
) -> Result<(bool, Vec<Action>)> {
    match response {
        RemoteResponse::Classified { id, result } => {
            let Some(active) = state.active_mut(*id) else {
                tracing::debug!(submission_id = %id, "classification for inactive submission, ignoring");
                return Ok((false, vec![]));
            };

            match result {
                Ok(verdict) => {
                    active.verdict = Some(verdict.clone());
                    let text = active.request.text().to_string();

                    tracing::debug!(submission_id = %id, kind = ?verdict.kind, "verdict received");

                    state.verdict = Some(VerdictDisplay {
                        verdict: verdict.clone(),
                        analyzed_at: now,
                    });
                    state.explanation = ExplanationPanel::Pending;

                    let target = state.settings.confidence.target_for(verdict.kind);
                    let tween = state.settings.gauge_tween;
                    let generation = state.confidence.restart(target, &tween);

                    Ok((
                        true,
                        vec![
                            Action::AnimateConfidence { generation, tween },
                            Action::Explain { id: *id, text },
                            Action::RefreshStats { id: Some(*id) },
                        ],
                    ))
                }
                Err(message) => {
                    tracing::debug!(submission_id = %id, error = %message, "classification failed");
                    state.fail_submission(message, now)?;
                    Ok((true, vec![]))
                }
            }
        }
        RemoteResponse::Explained { id, explanation } => {
            let Some(active) = state.active_mut(*id) else {
                tracing::debug!(submission_id = %id, "explanation for inactive submission, ignoring");
                return Ok((false, vec![]));
            };
            active.explained = true;

            if let Explanation::Error(message) = explanation {
                tracing::debug!(submission_id = %id, error = %message, "explanation failed");
            }
            state.explanation = ExplanationPanel::Ready(explanation.clone());

            state.finish_if_joined(now)?;
            Ok((true, vec![]))
        }
        RemoteResponse::StatsLoaded { id, result } => {
            let mut render = false;
            let mut actions = vec![];

            match result {
                Ok(snapshot) => {
                    if let Some(generation) = state.apply_stats(*snapshot) {
                        actions.push(Action::AnimateCounters {
                            generation,
                            tween: state.settings.counter_tween,
                        });
                        render = true;
                    }
                }
                Err(message) => {
                    tracing::warn!(error = %message, "stats refresh failed, keeping last snapshot");
                }
            }

            match id {
                Some(id) => {
                    if let Some(active) = state.active_mut(*id) {
                        active.stats_refreshed = true;
                        render |= state.finish_if_joined(now)?;
                    }
                }
                None if state.manual_refresh_pending => {
                    state.manual_refresh_pending = false;
                    if result.is_ok() {
                        state.push_notice(NoticeLevel::Success, "Data refreshed", now);
                    } else {
                        state.push_notice(NoticeLevel::Error, "Failed to refresh data", now);
                    }
                    render = true;
                }
                None => {}
            }

            Ok((render, actions))
        }
    }
}
