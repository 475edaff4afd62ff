//! Submission requests and identifiers.
//!
//! A [`SubmissionRequest`] is the only way text reaches the remote collaborators.
//! Construction trims the raw input and enforces the length bounds, so holding a
//! request is proof that validation passed.

use super::error::{Result, ThreatscopeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum accepted input length, counted in characters.
pub const MAX_INPUT_CHARS: usize = 5000;

/// Message shown when the trimmed input is empty.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text to analyze";

/// Session-local identifier tagging one submission cycle.
///
/// Every remote response carries the id of the submission that issued it, and the
/// session only applies responses whose id matches the active submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionId(u64);

impl SubmissionId {
    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the id that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Validated, immutable text submitted for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    text: String,
}

impl SubmissionRequest {
    /// Trims `raw` and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ThreatscopeError::Validation`] when the trimmed text is empty or
    /// longer than [`MAX_INPUT_CHARS`] characters.
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ThreatscopeError::Validation(EMPTY_INPUT_MESSAGE.to_string()));
        }

        let length = trimmed.chars().count();
        if length > MAX_INPUT_CHARS {
            return Err(ThreatscopeError::Validation(format!(
                "Input is {length} characters, the limit is {MAX_INPUT_CHARS}"
            )));
        }

        Ok(Self {
            text: trimmed.to_string(),
        })
    }

    /// The trimmed submission text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the trimmed text in characters.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
