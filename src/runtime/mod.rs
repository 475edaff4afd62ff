//! Single-threaded event loop driving a dashboard session.
//!
//! [`Dashboard`] owns the [`SessionState`] and is the only place it is mutated.
//! Everything concurrent (remote calls, animation schedules, the debounce and
//! feed timers) runs as a spawned tokio task that reports back by posting an
//! [`Event`] into the loop's channel. Events are handled one at a time, in
//! arrival order.
//!
//! # Architecture
//!
//! ```text
//!  DashboardHandle ──┐
//!  timers/tickers ───┼──► mpsc ──► Dashboard::step ──► handle_event ──► actions
//!  remote tasks ─────┘                   │                                 │
//!                                        ▼                                 │
//!                                 RenderSurface ◄── compute_viewmodel      │
//!                                                                          │
//!        spawn (Classify / Explain / RefreshStats / tickers / debounce) ◄──┘
//! ```
//!
//! Run it on a `current_thread` runtime; spawned tasks then interleave with the
//! loop cooperatively and never touch state directly.

pub mod timer;

use crate::animation::Ticker;
use crate::app::{handle_event, Action, Event, SessionState};
use crate::domain::{Explanation, Result, ThreatscopeError};
use crate::remote::{RemoteResponse, Services};
use crate::ui::RenderSurface;
use chrono::Utc;
use futures_util::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use timer::{DebounceTimer, PeriodicTimer};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::Instrument;

/// Error reported for a remote call that panicked.
pub const REMOTE_PANIC_MESSAGE: &str = "remote service crashed";

/// Timer settings owned by the runtime rather than the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeTiming {
    /// Trailing debounce window for analyze triggers.
    pub debounce: Duration,
    /// Period of the live-feed reseed.
    pub feed_refresh: Duration,
}

impl Default for RuntimeTiming {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            feed_refresh: Duration::from_secs(30),
        }
    }
}

/// Cloneable sender for driving a [`Dashboard`] from outside the loop.
#[derive(Debug, Clone)]
pub struct DashboardHandle {
    tx: UnboundedSender<Event>,
}

impl DashboardHandle {
    /// Posts a raw event.
    ///
    /// # Errors
    ///
    /// Returns [`ThreatscopeError::Runtime`] if the loop has been dropped.
    pub fn send(&self, event: Event) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|_| ThreatscopeError::Runtime("dashboard event loop is gone".to_string()))
    }

    /// Replaces the input text.
    ///
    /// # Errors
    ///
    /// Fails if the loop has been dropped.
    pub fn input(&self, text: impl Into<String>) -> Result<()> {
        self.send(Event::InputChanged { text: text.into() })
    }

    /// Debounced analyze trigger.
    ///
    /// # Errors
    ///
    /// Fails if the loop has been dropped.
    pub fn analyze(&self) -> Result<()> {
        self.send(Event::AnalyzeRequested)
    }

    /// Immediate submission of `text`.
    ///
    /// # Errors
    ///
    /// Fails if the loop has been dropped.
    pub fn submit(&self, text: impl Into<String>) -> Result<()> {
        self.send(Event::Submit { text: text.into() })
    }

    /// Manual stats refresh.
    ///
    /// # Errors
    ///
    /// Fails if the loop has been dropped.
    pub fn refresh_stats(&self) -> Result<()> {
        self.send(Event::RefreshRequested)
    }

    /// Tears the view down: stops every schedule and drops ticks already queued.
    ///
    /// # Errors
    ///
    /// Fails if the loop has been dropped.
    pub fn teardown(&self) -> Result<()> {
        self.send(Event::Teardown)
    }

    /// Stops the loop after pending events.
    ///
    /// # Errors
    ///
    /// Fails if the loop has been dropped.
    pub fn shutdown(&self) -> Result<()> {
        self.send(Event::Shutdown)
    }
}

/// The dashboard event loop.
pub struct Dashboard<S: RenderSurface> {
    state: SessionState,
    services: Services,
    surface: S,
    events_tx: UnboundedSender<Event>,
    events_rx: UnboundedReceiver<Event>,
    debounce: DebounceTimer,
    confidence_ticker: Ticker,
    counter_ticker: Ticker,
    feed_refresh: Option<PeriodicTimer>,
    timing: RuntimeTiming,
    running: bool,
}

impl<S: RenderSurface> std::fmt::Debug for Dashboard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("submission", &self.state.submission)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl<S: RenderSurface> Dashboard<S> {
    pub fn new(state: SessionState, services: Services, surface: S, timing: RuntimeTiming) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            state,
            services,
            surface,
            events_tx,
            events_rx,
            debounce: DebounceTimer::new(timing.debounce),
            confidence_ticker: Ticker::new(),
            counter_ticker: Ticker::new(),
            feed_refresh: None,
            timing,
            running: true,
        }
    }

    #[must_use]
    pub fn handle(&self) -> DashboardHandle {
        DashboardHandle {
            tx: self.events_tx.clone(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a gauge or counter schedule is still ticking.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.confidence_ticker.is_running() || self.counter_ticker.is_running()
    }

    /// Starts the feed timer, requests the initial stats snapshot, and draws the
    /// first frame. Must be called from within a tokio runtime.
    pub fn start_background(&mut self) {
        tracing::debug!(
            feed_refresh_secs = self.timing.feed_refresh.as_secs(),
            "starting background timers"
        );

        self.feed_refresh = Some(PeriodicTimer::start(
            self.timing.feed_refresh,
            self.events_tx.clone(),
            || Event::FeedRefreshTick,
        ));
        self.execute_action(&Action::RefreshStats { id: None });
        self.render();
    }

    /// Processes events until a shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`ThreatscopeError::Runtime`] if the event channel closes first.
    pub async fn run(&mut self) -> Result<()> {
        while self.running {
            if !self.step().await {
                return Err(ThreatscopeError::Runtime("event channel closed".to_string()));
            }
        }
        Ok(())
    }

    /// Waits for and processes a single event.
    ///
    /// # Returns
    ///
    /// `false` if the channel closed.
    pub async fn step(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                self.dispatch(&event);
                true
            }
            None => false,
        }
    }

    /// Handles `event` immediately, outside the channel.
    pub fn dispatch(&mut self, event: &Event) {
        match handle_event(&mut self.state, event) {
            Ok((should_render, actions)) => {
                tracing::trace!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                if should_render {
                    self.render();
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
            }
        }
    }

    fn render(&mut self) {
        let viewmodel = self.state.compute_viewmodel(Utc::now());
        self.surface.render(&viewmodel, &self.state.theme);
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::Classify { id, text } => {
                let classifier = self.services.classifier.clone();
                let tx = self.events_tx.clone();
                let (id, text) = (*id, text.clone());

                tokio::spawn(
                    async move {
                        let result = guarded(classifier.classify(&text)).await;
                        if let Err(message) = &result {
                            tracing::debug!(error = %message, "classification request failed");
                        }
                        post(&tx, Event::Remote(RemoteResponse::Classified { id, result }));
                    }
                    .instrument(tracing::debug_span!("remote_classify", submission_id = %id)),
                );
            }
            Action::Explain { id, text } => {
                let explainer = self.services.explainer.clone();
                let tx = self.events_tx.clone();
                let (id, text) = (*id, text.clone());

                tokio::spawn(
                    async move {
                        let explanation = match guarded(explainer.explain(&text)).await {
                            Ok(text) => Explanation::Text(text),
                            Err(message) => Explanation::Error(format!("Error: {message}")),
                        };
                        post(&tx, Event::Remote(RemoteResponse::Explained { id, explanation }));
                    }
                    .instrument(tracing::debug_span!("remote_explain", submission_id = %id)),
                );
            }
            Action::RefreshStats { id } => {
                let stats = self.services.stats.clone();
                let tx = self.events_tx.clone();
                let id = *id;

                tokio::spawn(
                    async move {
                        let result = guarded(stats.fetch_stats()).await;
                        post(&tx, Event::Remote(RemoteResponse::StatsLoaded { id, result }));
                    }
                    .instrument(tracing::debug_span!("remote_stats", submission_id = ?id)),
                );
            }
            Action::AnimateConfidence { generation, tween } => {
                let tx = self.events_tx.clone();
                let generation = *generation;
                self.confidence_ticker.start(*tween, move |step| {
                    tx.send(Event::ConfidenceTick { generation, step }).is_ok()
                });
            }
            Action::AnimateCounters { generation, tween } => {
                let tx = self.events_tx.clone();
                let generation = *generation;
                self.counter_ticker.start(*tween, move |step| {
                    tx.send(Event::CounterTick { generation, step }).is_ok()
                });
            }
            Action::CancelConfidence => self.confidence_ticker.cancel(),
            Action::ScheduleSubmit => {
                self.debounce.restart(self.events_tx.clone(), Event::DebounceElapsed);
            }
            Action::CancelTimers => {
                self.debounce.cancel();
                self.confidence_ticker.cancel();
                self.counter_ticker.cancel();
                if let Some(feed_refresh) = self.feed_refresh.take() {
                    feed_refresh.cancel();
                }
            }
            Action::Stop => {
                tracing::debug!("stopping event loop");
                self.running = false;
            }
        }
    }
}

/// Awaits a remote call. A panic inside it becomes an error like any other
/// failure, so the loop always gets a response.
async fn guarded<T, F>(call: F) -> std::result::Result<T, String>
where
    F: Future<Output = Result<T>>,
{
    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(result) => result.map_err(|e| e.user_message()),
        Err(_) => {
            tracing::error!("remote call panicked");
            Err(REMOTE_PANIC_MESSAGE.to_string())
        }
    }
}

fn post(tx: &UnboundedSender<Event>, event: Event) {
    if tx.send(event).is_err() {
        tracing::debug!("event loop gone, dropping remote response");
    }
}
