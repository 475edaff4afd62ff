//! Shared rendering utilities.
//!
//! Everything here produces `String`s rather than printing, so components can
//! compose a whole frame in memory and a surface can write it in one go.
//!
//! # Features
//!
//! - **Cursor Positioning**: ANSI cursor moves for absolute layout
//! - **Bars**: proportional block bars for the chart panels
//! - **Rationale Markup**: `**bold**` and `` `code` `` spans in explanations
//! - **UTF-8 Safe**: widths count characters, not bytes

use crate::domain::feed::truncate_chars;
use crate::ui::theme::Theme;
use regex::Regex;
use std::sync::OnceLock;

/// Escape sequence moving the cursor to `row`, `col` (1-indexed).
#[must_use]
pub fn position_cursor(row: usize, col: usize) -> String {
    format!("\u{1b}[{row};{col}H")
}

/// Short glyph shown in front of a feed row.
#[must_use]
pub fn category_icon(category: &str) -> &'static str {
    match category {
        "SQL Injection" => "[DB]",
        "XSS Attack" => "</>",
        "Malware" => "☣",
        "Phishing" => "✉",
        "DDoS" => "⇶",
        "Brute Force" => "⚿",
        "MITM Attack" => "⇄",
        "Backdoor" => "⎆",
        "Safe Content" => "✔",
        _ => "⚠",
    }
}

/// Fits `text` into exactly `width` characters, truncating or right-padding.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let truncated = truncate_chars(text, width);
    let len = truncated.chars().count();
    format!("{truncated}{}", " ".repeat(width.saturating_sub(len)))
}

/// Block bar of `width` cells filled in proportion to `value / max`.
///
/// A non-zero value always gets at least one cell.
#[must_use]
pub fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 || width == 0 {
        return " ".repeat(width);
    }

    #[allow(clippy::cast_possible_truncation)]
    let mut filled = ((u128::from(value.min(max)) * width as u128) / u128::from(max)) as usize;
    if value > 0 && filled == 0 {
        filled = 1;
    }

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Greedy word wrap at `width` characters.
///
/// Words longer than `width` are split across lines.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                lines.push(word.drain(..width).collect());
            }

            let word_len = word.len();
            if word_len == 0 {
                continue;
            }

            if line_len > 0 && line_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.extend(word);
            line_len += word_len;
        }

        lines.push(line);
    }

    lines
}

fn markup_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\*\*(?P<bold>[^*]+)\*\*|`(?P<code>[^`]+)`").ok())
        .as_ref()
}

/// Replaces `**bold**` and `` `code` `` spans with ANSI styling.
///
/// Text outside the markup is returned unchanged.
#[must_use]
pub fn format_markup(text: &str, theme: &Theme) -> String {
    let Some(pattern) = markup_pattern() else {
        return text.to_string();
    };

    pattern
        .replace_all(text, |caps: &regex::Captures<'_>| {
            if let Some(bold) = caps.name("bold") {
                format!("{}{}{}", Theme::bold(), bold.as_str(), Theme::reset())
            } else if let Some(code) = caps.name("code") {
                format!(
                    "{}{}{}",
                    Theme::fg(&theme.colors.accent),
                    code.as_str(),
                    Theme::reset()
                )
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Removes ANSI escape sequences, leaving visible text.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }

    out
}
