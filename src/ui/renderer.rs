//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: `SessionState` becomes a `DashboardViewModel`
//! 2. **Component Rendering**: components compose the panels into a [`Frame`]
//!
//! The finished frame is a single string of ANSI output that a
//! [`RenderSurface`](crate::ui::RenderSurface) writes to the terminal.
//!
//! # Example
//!
//! ```rust
//! use threatscope::app::{SessionSettings, SessionState};
//! use threatscope::ui::{render, Theme};
//!
//! let state = SessionState::new(SessionSettings::default(), Theme::default());
//! let frame = render(&state, 40, 100);
//! assert!(frame.contains("THREATSCOPE"));
//! ```

use crate::app::SessionState;
use crate::ui::components;
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DashboardViewModel;
use chrono::Utc;

/// Clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

/// One frame of terminal output, built line by line at absolute positions.
#[derive(Debug, Default)]
pub struct Frame {
    buf: String,
    rows: usize,
    cols: usize,
}

impl Frame {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            buf: String::from(CLEAR_SCREEN),
            rows,
            cols,
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Writes pre-styled `content` at the start of `row`.
    ///
    /// Rows past the bottom of the frame are dropped.
    pub fn line(&mut self, row: usize, content: &str) {
        if row == 0 || row > self.rows {
            return;
        }
        self.buf.push_str(&position_cursor(row, 1));
        self.buf.push_str(content);
        self.buf.push_str(Theme::reset());
    }

    /// Writes `text` in `color`, fitted to the frame width.
    pub fn text(&mut self, row: usize, text: &str, color: &str) {
        let content = format!("{}{}", Theme::fg(color), fit(text, self.cols));
        self.line(row, &content);
    }

    /// Horizontal separator; returns the next row.
    pub fn border(&mut self, row: usize, color: &str) -> usize {
        let content = format!("{}{}", Theme::fg(color), "─".repeat(self.cols));
        self.line(row, &content);
        row + 1
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Renders the session into one frame of ANSI output.
#[must_use]
pub fn render(state: &SessionState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(Utc::now());

    render_viewmodel(&viewmodel, &state.theme, rows, cols)
}

/// Renders a pre-computed view model.
#[must_use]
pub fn render_viewmodel(vm: &DashboardViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut frame = Frame::new(rows, cols);
    components::render_dashboard(&mut frame, vm, theme);
    frame.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SessionSettings;
    use crate::ui::helpers::strip_ansi;

    #[test]
    fn test_frame_drops_rows_outside_bounds() {
        let mut frame = Frame::new(3, 10);
        frame.line(0, "zero");
        frame.line(4, "four");
        frame.line(3, "three");

        let out = frame.into_string();
        assert!(out.contains("three"));
        assert!(!out.contains("zero"));
        assert!(!out.contains("four"));
    }

    #[test]
    fn test_idle_dashboard_frame() {
        let state = SessionState::new(SessionSettings::default(), Theme::default());
        let out = strip_ansi(&render(&state, 60, 100));

        assert!(out.contains("THREATSCOPE"));
        assert!(out.contains("Ready"));
        assert!(out.contains("0 / 5000"));
        assert!(out.contains("[ Analyze Threat ]"));
        assert!(out.contains("Attack Categories"));
        assert!(out.contains(":quit: exit"));
    }
}
