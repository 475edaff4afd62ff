//! Domain layer for the Threatscope dashboard.
//!
//! Core value types of an analysis session, independent of transport, timers, or
//! rendering. Everything here is plain data plus the invariants that keep it
//! consistent.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`submission`]: Validated submission requests and their identifiers
//! - [`verdict`]: Classifier verdicts, explanations, and aggregate stats snapshots
//! - [`feed`]: Live-feed entries and severity levels
//!
//! # Examples
//!
//! ```
//! use threatscope::domain::{SubmissionRequest, Result};
//!
//! fn accept(raw: &str) -> Result<SubmissionRequest> {
//!     SubmissionRequest::new(raw)
//! }
//!
//! assert!(accept("   ").is_err());
//! assert_eq!(accept("  hello world ").unwrap().text(), "hello world");
//! ```

pub mod error;
pub mod feed;
pub mod submission;
pub mod verdict;

pub use error::{Result, ThreatscopeError};
pub use feed::{FeedEntry, Severity};
pub use submission::{SubmissionId, SubmissionRequest, MAX_INPUT_CHARS};
pub use verdict::{Explanation, StatsSnapshot, Verdict, VerdictKind};
