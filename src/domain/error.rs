//! Error types for the Threatscope dashboard.
//!
//! This module defines the centralized error type [`ThreatscopeError`] and a type
//! alias [`Result`] used throughout the crate. Variants mirror the failure taxonomy
//! of an analysis cycle: local validation, the three remote collaborators, and the
//! infrastructure underneath them.

use thiserror::Error;

/// The main error type for Threatscope operations.
///
/// None of these errors is fatal to a dashboard session. The submission cycle maps
/// each of them onto a display outcome and returns to idle.
///
/// # Examples
///
/// ```
/// use threatscope::ThreatscopeError;
///
/// let err = ThreatscopeError::Validation("Please enter some text to analyze".to_string());
/// assert_eq!(err.to_string(), "Validation error: Please enter some text to analyze");
/// ```
#[derive(Debug, Error)]
pub enum ThreatscopeError {
    /// Submission text was rejected locally before any remote call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The remote classifier failed or returned an error payload.
    ///
    /// Aborts the submission cycle after step one.
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// The remote explainer failed or returned an error payload.
    ///
    /// Confined to the explanation panel.
    #[error("Explainer error: {0}")]
    Explainer(String),

    /// The stats provider failed or returned an inconsistent snapshot.
    ///
    /// Charts keep showing the last good snapshot.
    #[error("Stats refresh error: {0}")]
    StatsRefresh(String),

    /// Transport-level HTTP failure (connect, timeout, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A submission state transition outside the legal table was attempted.
    #[error("Illegal submission transition: {from} -> {to}")]
    Transition {
        /// State the session was in.
        from: String,
        /// State that was requested.
        to: String,
    },

    /// The event loop or one of its background tasks is gone.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl ThreatscopeError {
    /// Message suitable for a notice or panel, without the variant prefix.
    ///
    /// ```
    /// use threatscope::ThreatscopeError;
    ///
    /// let err = ThreatscopeError::Classifier("HTTP 500".to_string());
    /// assert_eq!(err.user_message(), "HTTP 500");
    /// ```
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message)
            | Self::Classifier(message)
            | Self::Explainer(message)
            | Self::StatsRefresh(message)
            | Self::Config(message)
            | Self::Runtime(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// A specialized `Result` type for Threatscope operations.
pub type Result<T> = std::result::Result<T, ThreatscopeError>;
