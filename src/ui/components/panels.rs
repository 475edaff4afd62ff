//! Input, result, explanation, and stat-card panels.

use crate::app::modes::InputLevel;
use crate::ui::helpers::{bar, fit, format_markup, wrap};
use crate::ui::renderer::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ExplanationView, InputPanel, ResultPanel, StatCards};

/// Width of the radial gauge when drawn as a bar.
const GAUGE_CELLS: usize = 30;

/// Most explanation lines shown before the rest is elided.
const MAX_EXPLANATION_LINES: usize = 8;

/// Renders the input preview, the character counter, and the analyze control.
///
/// ```text
/// > ' OR 1=1 --
///   11 / 5000 chars                                  [ Analyze Threat ]
/// ```
pub fn render_input(frame: &mut Frame, row: usize, input: &InputPanel, theme: &Theme) -> usize {
    let cols = frame.cols();

    let preview = if input.preview.is_empty() {
        format!("{}> {}Type text and press Enter to analyze", Theme::fg(&theme.colors.accent), Theme::dim())
    } else {
        format!(
            "{}> {}{}",
            Theme::fg(&theme.colors.accent),
            Theme::fg(&theme.colors.text_normal),
            fit(&input.preview, cols.saturating_sub(2))
        )
    };
    frame.line(row, &preview);

    let counter_color = match input.level {
        InputLevel::Normal => &theme.colors.text_dim,
        InputLevel::Warning => &theme.colors.warning,
    };
    let counter = format!("  {} / {} chars", input.char_count, input.max_chars);
    let button = format!("[ {} ]", input.button_label);

    let counter_len = counter.chars().count();
    let button_len = button.chars().count();
    let gap = cols.saturating_sub(counter_len + button_len + 1).max(1);

    let button_style = if input.control_enabled {
        format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent))
    } else {
        format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim))
    };

    let content = format!(
        "{}{counter}{}{}{button_style}{button}",
        Theme::fg(counter_color),
        Theme::reset(),
        " ".repeat(gap),
    );
    frame.line(row + 1, &content);

    row + 2
}

/// Renders the verdict badge, the confidence gauge, and the detail lines.
///
/// ```text
///  THREAT DETECTED  label: threat  at 14:02:11
///  Confidence ███████████████████████████░░░ 85%
///  Risk Level: HIGH
/// ```
pub fn render_result(frame: &mut Frame, row: usize, result: Option<&ResultPanel>, theme: &Theme) -> usize {
    let Some(result) = result else {
        frame.text(row, " No analysis yet.", &theme.colors.text_dim);
        return row + 1;
    };

    let color = theme.verdict_color(result.is_threat);
    let badge = format!(
        "{}{} {} {}{}  label: {}  at {}",
        Theme::bold(),
        Theme::fg(color),
        result.badge,
        Theme::reset(),
        Theme::fg(&theme.colors.text_dim),
        result.label,
        result.analyzed_at,
    );
    frame.line(row, &badge);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = (result.gauge_fill * GAUGE_CELLS as f64).round() as u64;
    let gauge = format!(
        "{} Confidence {}{} {}{}%",
        Theme::fg(&theme.colors.text_normal),
        Theme::fg(color),
        bar(filled, GAUGE_CELLS as u64, GAUGE_CELLS),
        Theme::bold(),
        result.confidence,
    );
    frame.line(row + 1, &gauge);

    let mut current_row = row + 2;
    for detail in &result.details {
        frame.text(current_row, &format!(" {detail}"), &theme.colors.text_normal);
        current_row += 1;
    }

    current_row
}

/// Renders the explanation panel; hidden renders nothing.
pub fn render_explanation(frame: &mut Frame, row: usize, explanation: &ExplanationView, theme: &Theme) -> usize {
    match explanation {
        ExplanationView::Hidden => row,
        ExplanationView::Loading => {
            frame.text(row, " AI Analysis: generating explanation...", &theme.colors.text_dim);
            row + 1
        }
        ExplanationView::Error(message) => {
            frame.text(row, &format!(" AI Analysis: {message}"), &theme.colors.warning);
            row + 1
        }
        ExplanationView::Text(text) => {
            let title = format!("{}{} AI Analysis", Theme::bold(), Theme::fg(&theme.colors.accent));
            frame.line(row, &title);

            let width = frame.cols().saturating_sub(2);
            let lines = wrap(text, width);
            let shown = lines.len().min(MAX_EXPLANATION_LINES);

            for (offset, line) in lines.iter().take(shown).enumerate() {
                let content = format!(
                    "{} {}",
                    Theme::fg(&theme.colors.text_normal),
                    format_markup(line, theme)
                );
                frame.line(row + 1 + offset, &content);
            }

            let mut next = row + 1 + shown;
            if lines.len() > shown {
                frame.text(next, " ...", &theme.colors.text_dim);
                next += 1;
            }
            next
        }
    }
}

/// Renders the three stat cards on one line.
pub fn render_stat_cards(frame: &mut Frame, row: usize, cards: &StatCards, theme: &Theme) -> usize {
    let card = |title: &str, value: u64, color: &str| {
        format!(
            "{}{title} {}{}{value}{}   ",
            Theme::fg(&theme.colors.text_dim),
            Theme::bold(),
            Theme::fg(color),
            Theme::reset(),
        )
    };

    let content = format!(
        " {}{}{}",
        card("Total Analyses", cards.total, &theme.colors.accent),
        card("Threats", cards.threats, &theme.colors.threat),
        card("Safe", cards.safe, &theme.colors.safe),
    );
    frame.line(row, &content);
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    fn panel(level: InputLevel, enabled: bool) -> InputPanel {
        InputPanel {
            char_count: 4600,
            max_chars: 5000,
            remaining: 400,
            level,
            control_enabled: enabled,
            button_label: if enabled { "Analyze Threat" } else { "Analyzing..." }.to_string(),
            preview: "abc".to_string(),
        }
    }

    #[test]
    fn test_input_counter_uses_warning_color() {
        let theme = Theme::default();
        let mut frame = Frame::new(10, 80);
        assert_eq!(render_input(&mut frame, 1, &panel(InputLevel::Warning, true), &theme), 3);

        let out = frame.into_string();
        assert!(out.contains(&format!("{}  4600 / 5000 chars", Theme::fg(&theme.colors.warning))));
        assert!(strip_ansi(&out).contains("[ Analyze Threat ]"));
    }

    #[test]
    fn test_disabled_control_shows_busy_label() {
        let mut frame = Frame::new(10, 80);
        render_input(&mut frame, 1, &panel(InputLevel::Normal, false), &Theme::default());
        assert!(strip_ansi(&frame.into_string()).contains("[ Analyzing... ]"));
    }

    #[test]
    fn test_result_gauge_reflects_fill() {
        let theme = Theme::default();
        let result = ResultPanel {
            badge: "SAFE CONTENT".to_string(),
            is_threat: false,
            label: "non-threat".to_string(),
            analyzed_at: "10:00:00".to_string(),
            confidence: 50,
            gauge_offset: 0.0,
            gauge_fill: 0.5,
            details: vec!["Risk Level: LOW".to_string()],
        };

        let mut frame = Frame::new(10, 80);
        assert_eq!(render_result(&mut frame, 1, Some(&result), &theme), 4);

        let out = strip_ansi(&frame.into_string());
        assert!(out.contains(&format!("{}{} 50%", "█".repeat(15), "░".repeat(15))));
        assert!(out.contains("SAFE CONTENT"));
    }

    #[test]
    fn test_long_explanation_is_elided() {
        let text = (0..20).map(|n| format!("line{n}")).collect::<Vec<_>>().join("\n");
        let mut frame = Frame::new(40, 40);
        let next = render_explanation(&mut frame, 1, &ExplanationView::Text(text), &Theme::default());

        assert_eq!(next, 1 + 1 + MAX_EXPLANATION_LINES + 1);
        let out = strip_ansi(&frame.into_string());
        assert!(out.contains("line7"));
        assert!(!out.contains("line8"));
    }

    #[test]
    fn test_hidden_explanation_takes_no_rows() {
        let mut frame = Frame::new(5, 40);
        assert_eq!(render_explanation(&mut frame, 3, &ExplanationView::Hidden, &Theme::default()), 3);
    }
}
