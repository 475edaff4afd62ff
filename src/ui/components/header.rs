//! Header component renderer.
//!
//! Renders the title bar: bold title on the left, submission status on the
//! right, padded to the full frame width.

use crate::ui::renderer::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at `row` and returns the next row.
///
/// # Layout
///
/// ```text
///  ◉ THREATSCOPE                                              Analyzing...
/// ```
///
/// On frames too narrow for both, the status is dropped.
pub fn render_header(frame: &mut Frame, row: usize, header: &HeaderInfo, theme: &Theme) -> usize {
    let cols = frame.cols();
    let title = format!(" ◉ {}", header.title);
    let status = format!("{} ", header.status);

    let title_len = title.chars().count();
    let status_len = status.chars().count();

    let mut content = String::from(Theme::bold());
    content.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        content.push_str(&Theme::bg(bg));
    }

    if title_len + status_len < cols {
        content.push_str(&title);
        content.push_str(&" ".repeat(cols - title_len - status_len));
        content.push_str(&status);
    } else {
        content.push_str(&crate::ui::helpers::fit(&title, cols));
    }

    frame.line(row, &content);
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    #[test]
    fn test_header_spans_width() {
        let mut frame = Frame::new(5, 40);
        let header = HeaderInfo {
            title: "THREATSCOPE".to_string(),
            status: "Ready".to_string(),
        };

        assert_eq!(render_header(&mut frame, 2, &header, &Theme::default()), 3);

        let out = strip_ansi(&frame.into_string());
        assert!(out.ends_with("Ready "));
        assert!(out.contains(" ◉ THREATSCOPE"));
    }
}
