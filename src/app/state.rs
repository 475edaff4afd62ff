//! Session state management and view model computation.
//!
//! [`SessionState`] is the single owner of everything a dashboard session
//! displays: the submission cycle, the current verdict and explanation, the
//! animated gauge and counters, the live feed, and the chart surfaces. Only the
//! event handler mutates it, and only from the event loop.
//!
//! # State Components
//!
//! - **Submission**: [`SubmissionState`] plus the [`ActiveSubmission`] being worked on
//! - **Display**: verdict, [`ConfidenceGauge`], [`ExplanationPanel`], notices
//! - **Aggregates**: last [`StatsSnapshot`], [`CounterBoard`], [`ChartSyncAdapter`]
//! - **Feed**: the bounded [`LiveFeedBuffer`]
//!
//! # Example
//!
//! ```
//! use threatscope::app::{SessionSettings, SessionState};
//! use threatscope::ui::Theme;
//!
//! let state = SessionState::new(SessionSettings::default(), Theme::default());
//! assert!(state.control_enabled());
//! let vm = state.compute_viewmodel(chrono::Utc::now());
//! assert_eq!(vm.header.status, "Ready");
//! ```

use super::modes::{InputLevel, NoticeLevel, SubmissionState};
use crate::animation::{ConfidenceGauge, CounterBoard, Tween};
use crate::charts::{timeline, ChartSyncAdapter, Dataset};
use crate::domain::feed::truncate_chars;
use crate::domain::{
    Explanation, FeedEntry, Result, StatsSnapshot, SubmissionId, SubmissionRequest, Verdict,
    VerdictKind, MAX_INPUT_CHARS,
};
use crate::feed::LiveFeedBuffer;
use crate::ui::helpers::category_icon;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ChartRow, ChartView, DashboardViewModel, ExplanationView, FeedItemView, FooterInfo,
    HeaderInfo, InputPanel, NoticeView, ResultPanel, StatCards,
};
use chrono::{DateTime, Local, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::time::Duration;

/// How long a notice stays visible, in seconds.
pub const NOTICE_TTL_SECS: i64 = 5;

/// Number of notices retained.
const MAX_NOTICES: usize = 5;

/// Width of the input preview line.
const PREVIEW_CHARS: usize = 60;

/// Confidence shown for each verdict kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceProfile {
    pub threat: u8,
    pub safe: u8,
}

impl Default for ConfidenceProfile {
    fn default() -> Self {
        Self {
            threat: 85,
            safe: 92,
        }
    }
}

impl ConfidenceProfile {
    #[must_use]
    pub const fn target_for(&self, kind: VerdictKind) -> u8 {
        match kind {
            VerdictKind::Threat => self.threat,
            VerdictKind::Safe => self.safe,
        }
    }
}

/// Tunables the handler needs when it schedules animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub confidence: ConfidenceProfile,
    pub gauge_tween: Tween,
    pub counter_tween: Tween,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            confidence: ConfidenceProfile::default(),
            gauge_tween: Tween::new(50, Duration::from_millis(20)),
            counter_tween: Tween::over(Duration::from_millis(2000), Duration::from_millis(40)),
        }
    }
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

/// What the explanation panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExplanationPanel {
    #[default]
    Hidden,
    /// Requested, not yet answered.
    Pending,
    Ready(Explanation),
}

/// The submission currently being processed and which of its steps are done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSubmission {
    pub id: SubmissionId,
    pub request: SubmissionRequest,
    /// Set once the classifier succeeds.
    pub verdict: Option<Verdict>,
    pub explained: bool,
    pub stats_refreshed: bool,
}

impl ActiveSubmission {
    /// Whether classify, explain, and the stats refresh have all finished.
    #[must_use]
    pub const fn is_joined(&self) -> bool {
        self.verdict.is_some() && self.explained && self.stats_refreshed
    }
}

/// Verdict on screen and when it arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictDisplay {
    pub verdict: Verdict,
    pub analyzed_at: DateTime<Utc>,
}

/// Complete state of one dashboard session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub submission: SubmissionState,

    /// Terminal state the last cycle passed through.
    pub last_outcome: Option<SubmissionState>,

    pub active: Option<ActiveSubmission>,

    next_id: SubmissionId,

    /// Current contents of the input control.
    pub input: String,

    pub verdict: Option<VerdictDisplay>,

    pub confidence: ConfidenceGauge,

    pub explanation: ExplanationPanel,

    /// Last accepted stats snapshot.
    pub stats: Option<StatsSnapshot>,

    pub counters: CounterBoard,

    pub feed: LiveFeedBuffer,

    pub charts: ChartSyncAdapter,

    /// Completed submissions per day, feeding the timeline chart.
    pub daily_counts: BTreeMap<NaiveDate, u64>,

    pub notices: Vec<Notice>,

    /// Set while a manual refresh is waiting for its snapshot.
    pub manual_refresh_pending: bool,

    pub settings: SessionSettings,

    pub theme: Theme,
}

impl SessionState {
    #[must_use]
    pub fn new(settings: SessionSettings, theme: Theme) -> Self {
        Self {
            submission: SubmissionState::Idle,
            last_outcome: None,
            active: None,
            next_id: SubmissionId::new(1),
            input: String::new(),
            verdict: None,
            confidence: ConfidenceGauge::new(),
            explanation: ExplanationPanel::Hidden,
            stats: None,
            counters: CounterBoard::new(),
            feed: LiveFeedBuffer::new(),
            charts: ChartSyncAdapter::new(),
            daily_counts: BTreeMap::new(),
            notices: vec![],
            manual_refresh_pending: false,
            settings,
            theme,
        }
    }

    /// Whether the analyze control is enabled.
    #[must_use]
    pub const fn control_enabled(&self) -> bool {
        self.submission.accepts_submission()
    }

    /// Replaces the input, keeping at most [`MAX_INPUT_CHARS`] characters.
    pub fn set_input(&mut self, text: &str) {
        self.input = truncate_chars(text, MAX_INPUT_CHARS);
    }

    #[must_use]
    pub fn input_chars(&self) -> usize {
        self.input.chars().count()
    }

    pub fn push_notice(&mut self, level: NoticeLevel, message: impl Into<String>, now: DateTime<Utc>) {
        let message = message.into();
        tracing::debug!(level = ?level, message = %message, "notice raised");

        self.notices.push(Notice {
            level,
            message,
            raised_at: now,
        });

        if self.notices.len() > MAX_NOTICES {
            let excess = self.notices.len() - MAX_NOTICES;
            self.notices.drain(..excess);
        }
    }

    /// Notices still within their display lifetime at `now`.
    pub fn visible_notices(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notice> {
        let ttl = chrono::Duration::seconds(NOTICE_TTL_SECS);
        self.notices
            .iter()
            .filter(move |notice| now - notice.raised_at < ttl)
    }

    fn transition(&mut self, next: SubmissionState) -> Result<()> {
        self.submission = self.submission.transition(next)?;
        Ok(())
    }

    /// Accepts `request` as the active submission and clears the previous
    /// cycle's display.
    ///
    /// # Errors
    ///
    /// Returns a transition error if a submission is already in flight.
    pub fn begin_submission(&mut self, request: SubmissionRequest) -> Result<SubmissionId> {
        self.transition(SubmissionState::InFlight)?;

        let id = self.next_id;
        self.next_id = id.next();

        self.verdict = None;
        self.explanation = ExplanationPanel::Hidden;
        self.confidence.reset();
        self.active = Some(ActiveSubmission {
            id,
            request,
            verdict: None,
            explained: false,
            stats_refreshed: false,
        });

        tracing::debug!(submission_id = %id, "submission accepted");
        Ok(id)
    }

    /// Active submission with `id`, if it is still in flight.
    pub fn active_mut(&mut self, id: SubmissionId) -> Option<&mut ActiveSubmission> {
        if self.submission != SubmissionState::InFlight {
            return None;
        }
        self.active.as_mut().filter(|active| active.id == id)
    }

    /// Aborts the active submission after a classifier failure.
    ///
    /// # Errors
    ///
    /// Returns a transition error if no submission is in flight.
    pub fn fail_submission(&mut self, message: &str, now: DateTime<Utc>) -> Result<()> {
        self.transition(SubmissionState::Failed)?;
        self.last_outcome = Some(SubmissionState::Failed);
        self.active = None;
        self.push_notice(NoticeLevel::Error, format!("Analysis failed: {message}"), now);
        self.transition(SubmissionState::Idle)
    }

    /// Completes the active submission once all of its steps have joined:
    /// prepends its feed entry, counts it on the timeline, and returns to idle.
    ///
    /// # Returns
    ///
    /// `true` if the submission completed.
    ///
    /// # Errors
    ///
    /// Returns a transition error if the session is not in flight.
    pub fn finish_if_joined(&mut self, now: DateTime<Utc>) -> Result<bool> {
        let joined = self.active.as_ref().is_some_and(ActiveSubmission::is_joined);
        if !joined {
            return Ok(false);
        }

        self.transition(SubmissionState::Completed)?;

        if let Some(ActiveSubmission {
            id,
            request,
            verdict: Some(verdict),
            ..
        }) = self.active.take()
        {
            self.feed
                .prepend(FeedEntry::from_verdict(&verdict, request.text(), now));
            self.record_analysis(now.date_naive());
            tracing::debug!(submission_id = %id, kind = ?verdict.kind, "submission completed");
        }

        self.last_outcome = Some(SubmissionState::Completed);
        self.transition(SubmissionState::Idle)?;
        Ok(true)
    }

    fn record_analysis(&mut self, today: NaiveDate) {
        *self.daily_counts.entry(today).or_insert(0) += 1;
        timeline::prune(&mut self.daily_counts, today);
        let series = timeline::weekly_series(&self.daily_counts, today);
        self.charts.sync_timeline(series);
    }

    /// Stores a new stats snapshot and syncs the distribution chart.
    ///
    /// # Returns
    ///
    /// The counter animation generation to schedule, or `None` when the
    /// snapshot equals the current one.
    pub fn apply_stats(&mut self, snapshot: StatsSnapshot) -> Option<u64> {
        if self.stats == Some(snapshot) {
            tracing::debug!("stats unchanged, skipping chart sync");
            return None;
        }

        self.stats = Some(snapshot);
        self.charts.sync_distribution(&snapshot);
        Some(self.counters.restart(snapshot, &self.settings.counter_tween))
    }

    #[must_use]
    pub fn compute_viewmodel(&self, now: DateTime<Utc>) -> DashboardViewModel {
        DashboardViewModel {
            header: self.compute_header(),
            input: self.compute_input_panel(),
            result: self.compute_result_panel(),
            explanation: self.compute_explanation(),
            stat_cards: self.compute_stat_cards(),
            distribution: chart_view("Threat Distribution", self.charts.distribution(), true),
            categories: chart_view("Attack Categories", self.charts.categories(), false),
            timeline: chart_view("Analyses (7 days)", self.charts.timeline(), false),
            feed: self
                .feed
                .iter()
                .map(|entry| FeedItemView {
                    icon: category_icon(&entry.category),
                    category: entry.category.clone(),
                    severity: entry.severity,
                    summary: entry.summary.clone(),
                    age: entry.time_ago(now),
                })
                .collect(),
            notices: self
                .visible_notices(now)
                .map(|notice| NoticeView {
                    level: notice.level,
                    message: notice.message.clone(),
                })
                .collect(),
            footer: FooterInfo {
                hints: "<text>: analyze  :refresh: reload stats  :quit: exit".to_string(),
            },
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let status = match (self.submission, self.last_outcome) {
            (SubmissionState::InFlight, _) => "Analyzing...",
            (_, Some(SubmissionState::Completed)) => "Analysis complete",
            (_, Some(SubmissionState::Failed)) => "Analysis failed",
            _ => "Ready",
        };

        HeaderInfo {
            title: "THREATSCOPE".to_string(),
            status: status.to_string(),
        }
    }

    fn compute_input_panel(&self) -> InputPanel {
        let char_count = self.input_chars();
        let control_enabled = self.control_enabled();
        let preview = self.input.split_whitespace().collect::<Vec<_>>().join(" ");

        InputPanel {
            char_count,
            max_chars: MAX_INPUT_CHARS,
            remaining: MAX_INPUT_CHARS.saturating_sub(char_count),
            level: InputLevel::for_length(char_count, MAX_INPUT_CHARS),
            control_enabled,
            button_label: if control_enabled { "Analyze Threat" } else { "Analyzing..." }.to_string(),
            preview: truncate_chars(&preview, PREVIEW_CHARS),
        }
    }

    fn compute_result_panel(&self) -> Option<ResultPanel> {
        let display = self.verdict.as_ref()?;
        let kind = display.verdict.kind;

        let details = match kind {
            VerdictKind::Threat => vec![
                "Risk Level: HIGH".to_string(),
                "Recommended Action: Block and investigate".to_string(),
            ],
            VerdictKind::Safe => vec![
                "Content Type: Legitimate".to_string(),
                "Risk Level: LOW".to_string(),
                "Recommended Action: Allow".to_string(),
            ],
        };

        let offset = self.confidence.offset();
        let fill = 1.0 - offset / crate::animation::GAUGE_CIRCUMFERENCE;

        Some(ResultPanel {
            badge: kind.badge().to_string(),
            is_threat: kind.is_threat(),
            label: display.verdict.label.clone(),
            analyzed_at: display
                .analyzed_at
                .with_timezone(&Local)
                .format("%H:%M:%S")
                .to_string(),
            confidence: self.confidence.current(),
            gauge_offset: offset,
            gauge_fill: fill.clamp(0.0, 1.0),
            details,
        })
    }

    fn compute_explanation(&self) -> ExplanationView {
        match &self.explanation {
            ExplanationPanel::Hidden => ExplanationView::Hidden,
            ExplanationPanel::Pending => ExplanationView::Loading,
            ExplanationPanel::Ready(Explanation::Text(text)) => ExplanationView::Text(text.clone()),
            ExplanationPanel::Ready(Explanation::Error(message)) => {
                ExplanationView::Error(message.clone())
            }
        }
    }

    fn compute_stat_cards(&self) -> StatCards {
        let displayed = self.counters.displayed();
        StatCards {
            total: displayed.total_count,
            threats: displayed.threat_count,
            safe: displayed.safe_count,
        }
    }
}

fn chart_view(title: &str, dataset: &Dataset, proportional: bool) -> ChartView {
    ChartView {
        title: title.to_string(),
        rows: dataset
            .points()
            .enumerate()
            .map(|(index, (label, value))| ChartRow {
                label: label.to_string(),
                value,
                share: proportional.then(|| dataset.percentage(index)),
            })
            .collect(),
        max_value: dataset.max(),
        revision: dataset.revision(),
    }
}
