//! Bar chart renderer shared by the three chart panels.

use crate::ui::helpers::{bar, fit};
use crate::ui::renderer::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ChartView;

/// Width of the label column.
const LABEL_WIDTH: usize = 14;

/// Columns reserved right of the bar for the value and share.
const VALUE_WIDTH: usize = 16;

/// Renders `chart` as a title line followed by one bar per row.
///
/// ```text
///  Threat Distribution
///   Threat         ██████░░░░░░░░░░░░░░    5 (41.7%)
///   Non-Threat     ████████░░░░░░░░░░░░    7 (58.3%)
/// ```
///
/// Bars are scaled to the largest value in the chart.
pub fn render_chart(frame: &mut Frame, row: usize, chart: &ChartView, theme: &Theme) -> usize {
    let title = format!("{}{} {}", Theme::bold(), Theme::fg(&theme.colors.header_fg), chart.title);
    frame.line(row, &title);

    let bar_width = frame
        .cols()
        .saturating_sub(LABEL_WIDTH + VALUE_WIDTH + 3)
        .max(1);

    let mut current_row = row + 1;
    for chart_row in &chart.rows {
        let value = match chart_row.share {
            Some(share) => format!("{:>5} ({share:.1}%)", chart_row.value),
            None => format!("{:>5}", chart_row.value),
        };

        let content = format!(
            "{}  {}{} {}{} {}{value}",
            Theme::fg(&theme.colors.text_normal),
            fit(&chart_row.label, LABEL_WIDTH),
            Theme::fg(&theme.colors.accent),
            bar(chart_row.value, chart.max_value, bar_width),
            Theme::reset(),
            Theme::fg(&theme.colors.text_dim),
        );
        frame.line(current_row, &content);
        current_row += 1;
    }

    current_row
}
