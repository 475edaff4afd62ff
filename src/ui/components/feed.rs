//! Live feed and notice renderers.

use crate::app::modes::NoticeLevel;
use crate::ui::helpers::fit;
use crate::ui::renderer::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FeedItemView, NoticeView};

const CATEGORY_WIDTH: usize = 16;
const SEVERITY_WIDTH: usize = 10;
const AGE_WIDTH: usize = 9;

/// Renders the feed title and one row per entry, newest first.
///
/// ```text
///  Live Threat Feed
///  [DB] SQL Injection    CRITICAL   Suspicious SQL pattern detected in login form   2m ago
/// ```
pub fn render_feed(frame: &mut Frame, row: usize, items: &[FeedItemView], theme: &Theme) -> usize {
    let title = format!("{}{} Live Threat Feed", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    frame.line(row, &title);

    if items.is_empty() {
        frame.text(row + 1, "  No recent activity", &theme.colors.text_dim);
        return row + 2;
    }

    let summary_width = frame
        .cols()
        .saturating_sub(CATEGORY_WIDTH + SEVERITY_WIDTH + AGE_WIDTH + 10);

    let mut current_row = row + 1;
    for item in items {
        let severity = item.severity.as_str().to_uppercase();
        let age = format!("{:>width$}", item.age, width = AGE_WIDTH);
        let content = format!(
            "{} {} {}{}{}{} {}{} {}{age}",
            Theme::fg(&theme.colors.text_normal),
            fit(item.icon, 4),
            fit(&item.category, CATEGORY_WIDTH),
            Theme::bold(),
            Theme::fg(theme.severity_color(item.severity)),
            fit(&severity, SEVERITY_WIDTH),
            Theme::reset(),
            fit(&item.summary, summary_width),
            Theme::fg(&theme.colors.text_dim),
        );
        frame.line(current_row, &content);
        current_row += 1;
    }

    current_row
}

/// Renders notices bottom-aligned directly above `above_row`, newest lowest.
pub fn render_notices(frame: &mut Frame, above_row: usize, notices: &[NoticeView], theme: &Theme) {
    let count = notices.len();
    let Some(first_row) = above_row.checked_sub(count) else {
        return;
    };

    for (offset, notice) in notices.iter().enumerate() {
        let (marker, color) = match notice.level {
            NoticeLevel::Info => ("ℹ", &theme.colors.accent),
            NoticeLevel::Success => ("✔", &theme.colors.safe),
            NoticeLevel::Warning => ("!", &theme.colors.warning),
            NoticeLevel::Error => ("✖", &theme.colors.threat),
        };
        frame.text(first_row + offset, &format!(" {marker} {}", notice.message), color);
    }
}
