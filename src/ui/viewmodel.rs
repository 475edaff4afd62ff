//! View model types representing renderable dashboard state.
//!
//! View models are computed by `SessionState::compute_viewmodel()` and consumed
//! by a [`RenderSurface`](crate::ui::RenderSurface). They contain no business
//! logic, only display-ready data: formatted times, relative ages, percentages,
//! and gauge geometry.

use crate::app::modes::{InputLevel, NoticeLevel};
use crate::domain::Severity;

/// Complete dashboard view model for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardViewModel {
    pub header: HeaderInfo,
    pub input: InputPanel,
    /// Results panel; `None` until a verdict is available for the current submission.
    pub result: Option<ResultPanel>,
    pub explanation: ExplanationView,
    pub stat_cards: StatCards,
    pub distribution: ChartView,
    pub categories: ChartView,
    pub timeline: ChartView,
    /// Live feed rows, newest first.
    pub feed: Vec<FeedItemView>,
    /// Notices younger than their display lifetime, oldest first.
    pub notices: Vec<NoticeView>,
    pub footer: FooterInfo,
}

/// Title bar contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Short status of the submission cycle ("Ready", "Analyzing...", ...).
    pub status: String,
}

/// Input control and its character counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPanel {
    pub char_count: usize,
    pub max_chars: usize,
    pub remaining: usize,
    pub level: InputLevel,
    /// Whether the analyze control accepts a trigger.
    pub control_enabled: bool,
    pub button_label: String,
    /// Single-line preview of the current input.
    pub preview: String,
}

/// Verdict display with the confidence gauge.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub badge: String,
    pub is_threat: bool,
    /// Raw classifier label.
    pub label: String,
    /// Local wall-clock time the verdict arrived, `HH:MM:SS`.
    pub analyzed_at: String,
    /// Displayed confidence percentage.
    pub confidence: u8,
    /// Stroke offset of the radial gauge arc.
    pub gauge_offset: f64,
    /// Fraction of the arc drawn, derived from the offset, in `0.0..=1.0`.
    pub gauge_fill: f64,
    /// Detail lines beneath the badge.
    pub details: Vec<String>,
}

/// Explanation panel state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplanationView {
    Hidden,
    Loading,
    /// Rationale text; may contain `**bold**` and `` `code` `` markup.
    Text(String),
    Error(String),
}

/// Animated stat-card values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatCards {
    pub total: u64,
    pub threats: u64,
    pub safe: u64,
}

/// One chart panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub title: String,
    pub rows: Vec<ChartRow>,
    /// Largest value in `rows`, used to scale bars.
    pub max_value: u64,
    /// Data revision; a change means the surface should replay its animation.
    pub revision: u64,
}

/// One labelled bar or slice.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub label: String,
    pub value: u64,
    /// Share of the chart total in percent, for proportional charts only.
    pub share: Option<f64>,
}

/// One live-feed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItemView {
    pub icon: &'static str,
    pub category: String,
    pub severity: Severity,
    pub summary: String,
    pub age: String,
}

/// One visible notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub level: NoticeLevel,
    pub message: String,
}

/// Footer contents (command hints).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub hints: String,
}
