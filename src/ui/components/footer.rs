//! Footer component renderer.

use crate::ui::renderer::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the command hints centered and dimmed at `row`.
///
/// Hints longer than the frame are truncated.
pub fn render_footer(frame: &mut Frame, row: usize, footer: &FooterInfo, theme: &Theme) -> usize {
    let cols = frame.cols();
    let hints = crate::domain::feed::truncate_chars(&footer.hints, cols);

    let text_len = hints.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;

    let content = format!(
        "{}{}{hints}{}",
        Theme::fg(&theme.colors.text_dim),
        " ".repeat(padding),
        " ".repeat(cols.saturating_sub(padding + text_len)),
    );
    frame.line(row, &content);
    row + 1
}
