//! Composable dashboard component renderers.
//!
//! Each component renders one panel of the dashboard into a [`Frame`] starting
//! at a given row and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with the submission status
//! - [`panels`]: Input control, verdict with confidence gauge, explanation, stat cards
//! - [`charts`]: Distribution, category, and timeline bar charts
//! - [`feed`]: Live feed rows and transient notices
//! - [`footer`]: Command hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Input panel]
//! [Border]
//! [Result panel + explanation]
//! [Border]
//! [Stat cards]
//! [Charts]
//! [Live feed]
//! [Notices, bottom-aligned]
//! [Border]
//! [Footer]
//! ```

pub mod charts;
pub mod feed;
pub mod footer;
pub mod header;
pub mod panels;

use crate::ui::renderer::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DashboardViewModel;

/// Renders the full dashboard layout.
pub fn render_dashboard(frame: &mut Frame, vm: &DashboardViewModel, theme: &Theme) {
    let mut current_row = 2;

    current_row = header::render_header(frame, current_row, &vm.header, theme);
    current_row = frame.border(current_row, &theme.colors.border);
    current_row = panels::render_input(frame, current_row, &vm.input, theme);
    current_row = frame.border(current_row, &theme.colors.border);
    current_row = panels::render_result(frame, current_row, vm.result.as_ref(), theme);
    current_row = panels::render_explanation(frame, current_row, &vm.explanation, theme);
    current_row = frame.border(current_row, &theme.colors.border);
    current_row = panels::render_stat_cards(frame, current_row, &vm.stat_cards, theme);

    for chart in [&vm.distribution, &vm.categories, &vm.timeline] {
        current_row = charts::render_chart(frame, current_row + 1, chart, theme);
    }

    let _current_row = feed::render_feed(frame, current_row + 1, &vm.feed, theme);

    let footer_row = frame.rows().saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);

    feed::render_notices(frame, border_row, &vm.notices, theme);
    frame.border(border_row, &theme.colors.border);
    footer::render_footer(frame, footer_row, &vm.footer, theme);
}
