//! Wire payloads of the remote services and the responses posted back to the
//! event loop.
//!
//! The request/reply structs mirror the JSON bodies of the three HTTP endpoints.
//! Replies accept both the current key names and the legacy ones
//! (`gemini_analysis`, `total_predictions`, `stats`). [`RemoteResponse`] is what a
//! finished remote task sends back into the session; it carries plain message
//! strings instead of error values so events stay `Clone + PartialEq`.

use crate::domain::{
    Explanation, Result, StatsSnapshot, SubmissionId, ThreatscopeError, Verdict,
};
use crate::domain::verdict::{SAFE_LABEL, THREAT_LABEL};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Distributed tracing context attached to outbound requests.
///
/// Captures the current trace and span IDs from OpenTelemetry so the remote
/// services can link their spans to the dashboard's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as 32 hex characters.
    pub trace_id: String,

    /// Span ID of the calling span as 16 hex characters.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the current
    /// span context is invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// W3C `traceparent` header value (version 00, sampled).
    ///
    /// # Examples
    ///
    /// ```
    /// use threatscope::remote::TraceContext;
    ///
    /// let context = TraceContext {
    ///     trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
    ///     parent_span_id: "00f067aa0ba902b7".to_string(),
    /// };
    /// assert_eq!(
    ///     context.traceparent(),
    ///     "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"
    /// );
    /// ```
    #[must_use]
    pub fn traceparent(&self) -> String {
        format!("00-{}-{}-01", self.trace_id, self.parent_span_id)
    }
}

/// Body of the classify and explain requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub input: String,
}

impl AnalysisRequest {
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// Classifier reply: a prediction or an error payload.
///
/// An `error` key wins when both are present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ClassifyReply {
    Error { error: String },
    Prediction { prediction: String },
}

impl ClassifyReply {
    /// Converts the reply into a verdict.
    ///
    /// # Errors
    ///
    /// Returns [`ThreatscopeError::Classifier`] for an error payload.
    pub fn into_verdict(self) -> Result<Verdict> {
        match self {
            Self::Prediction { prediction } => Ok(Verdict::from_prediction(&prediction)),
            Self::Error { error } => Err(ThreatscopeError::Classifier(error)),
        }
    }
}

/// Explainer reply: rationale text or an error payload.
///
/// As with [`ClassifyReply`], an `error` key wins when both are present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExplainReply {
    Error {
        error: String,
    },
    Analysis {
        #[serde(alias = "gemini_analysis")]
        analysis: String,
    },
}

impl ExplainReply {
    /// # Errors
    ///
    /// Returns [`ThreatscopeError::Explainer`] for an error payload.
    pub fn into_text(self) -> Result<String> {
        match self {
            Self::Analysis { analysis } => Ok(analysis),
            Self::Error { error } => Err(ThreatscopeError::Explainer(error)),
        }
    }
}

/// Stats provider reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatsReply {
    #[serde(rename = "totalPredictions", alias = "total_predictions")]
    pub total_predictions: u64,

    /// Count per prediction label.
    #[serde(alias = "stats", default)]
    pub counts: HashMap<String, u64>,
}

impl StatsReply {
    /// Converts the reply into a checked snapshot. Missing labels count as zero.
    ///
    /// # Errors
    ///
    /// Returns [`ThreatscopeError::StatsRefresh`] if the class counts exceed the
    /// total.
    pub fn into_snapshot(self) -> Result<StatsSnapshot> {
        let count = |label: &str| self.counts.get(label).copied().unwrap_or(0);
        StatsSnapshot::new(self.total_predictions, count(THREAT_LABEL), count(SAFE_LABEL))
    }
}

/// Outcome of a remote task, posted back to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteResponse {
    /// The classifier answered (or failed) for submission `id`.
    Classified {
        id: SubmissionId,
        result: std::result::Result<Verdict, String>,
    },

    /// The explainer answered (or failed) for submission `id`.
    Explained {
        id: SubmissionId,
        explanation: Explanation,
    },

    /// A stats refresh finished.
    ///
    /// `id` is the submission that requested it, or `None` for startup and
    /// manual refreshes.
    StatsLoaded {
        id: Option<SubmissionId>,
        result: std::result::Result<StatsSnapshot, String>,
    },
}
