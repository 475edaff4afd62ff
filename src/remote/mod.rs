//! Remote service boundary.
//!
//! Everything that crosses the network lives here: the JSON payloads of the
//! classify, explain, and stats endpoints, the async traits the runtime calls
//! through, and the reqwest implementation of those traits.
//!
//! # Architecture
//!
//! ```text
//! Runtime ──Action::Classify/Explain/RefreshStats──► spawned task
//!                                                      │  Services (Arc<dyn Trait>)
//!                                                      ▼
//!                                                 HttpBackend ──HTTP/JSON──► API
//!                                                      │
//! Event loop ◄──Event::Remote(RemoteResponse)──────────┘
//! ```
//!
//! Outbound requests carry a `traceparent` header built from [`TraceContext`], so
//! server-side spans join the dashboard's traces.
//!
//! # Modules
//!
//! - [`messages`]: Wire payloads, trace context, and [`RemoteResponse`]
//! - [`client`]: Service traits, [`HttpBackend`], and the [`Services`] bundle

pub mod client;
pub mod messages;

pub use client::{
    decode_reply, Endpoints, HttpBackend, RemoteClassifier, RemoteExplainer, Services,
    StatsProvider,
};
pub use messages::{
    AnalysisRequest, ClassifyReply, ExplainReply, RemoteResponse, StatsReply, TraceContext,
};
