//! Theme management and ANSI escape sequence generation.
//!
//! The dashboard ships with two palettes: `darkweb`, the default dark palette
//! with neon verdict colors, and `daylight`, a light palette loaded from the
//! bundled TOML. Custom palettes are loaded from TOML files with the same shape.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#00d9ff"
//! text_normal = "#e0e6f0"
//! text_dim = "#6b7394"
//! border = "#2a3150"
//! accent = "#00d9ff"
//! threat = "#ff3232"
//! safe = "#00ff88"
//! warning = "#ffb020"
//! severity_critical = "#ff3232"
//! severity_high = "#ff7a1a"
//! severity_medium = "#ffb020"
//! severity_low = "#00ff88"
//! ```
//!
//! # Example
//!
//! ```rust
//! use threatscope::ui::Theme;
//!
//! let theme = Theme::from_name("daylight").unwrap();
//! print!("{}Threat{}", Theme::fg(&theme.colors.threat), Theme::reset());
//! ```

use crate::domain::error::{Result, ThreatscopeError};
use crate::domain::Severity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the palette used when none is configured.
pub const DEFAULT_THEME: &str = "darkweb";

/// Color scheme configuration for dashboard rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex color definitions for every dashboard element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Secondary text: footer, ages, counters.
    pub text_dim: String,
    pub border: String,

    /// Chart bars and the gauge track.
    pub accent: String,
    pub threat: String,
    pub safe: String,
    /// Input counter near the limit, warning notices.
    pub warning: String,

    pub severity_critical: String,
    pub severity_high: String,
    pub severity_medium: String,
    pub severity_low: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for names other than `darkweb` and `daylight`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            DEFAULT_THEME => Some(Self::default()),
            "daylight" => toml::from_str(include_str!("../../themes/daylight.toml")).ok(),
            _ => None,
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ThreatscopeError::Io`] if the file cannot be read and
    /// [`ThreatscopeError::Config`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| ThreatscopeError::Config(format!("Failed to parse theme TOML: {e}")))
    }

    /// Color for a feed severity badge.
    #[must_use]
    pub fn severity_color(&self, severity: Severity) -> &str {
        match severity {
            Severity::Critical => &self.colors.severity_critical,
            Severity::High => &self.colors.severity_high,
            Severity::Medium => &self.colors.severity_medium,
            Severity::Low => &self.colors.severity_low,
        }
    }

    /// Color for a verdict.
    #[must_use]
    pub fn verdict_color(&self, is_threat: bool) -> &str {
        if is_threat {
            &self.colors.threat
        } else {
            &self.colors.safe
        }
    }

    /// Parses `#rrggbb`; malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The `darkweb` palette.
    fn default() -> Self {
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                header_fg: "#00d9ff".to_string(),
                header_bg: Some("#0a0e1a".to_string()),
                text_normal: "#e0e6f0".to_string(),
                text_dim: "#6b7394".to_string(),
                border: "#2a3150".to_string(),
                accent: "#00d9ff".to_string(),
                threat: "#ff3232".to_string(),
                safe: "#00ff88".to_string(),
                warning: "#ffb020".to_string(),
                severity_critical: "#ff3232".to_string(),
                severity_high: "#ff7a1a".to_string(),
                severity_medium: "#ffb020".to_string(),
                severity_low: "#00ff88".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_themes_load() {
        assert_eq!(Theme::from_name("darkweb"), Some(Theme::default()));
        let daylight = Theme::from_name("daylight").unwrap();
        assert_eq!(daylight.name, "daylight");
        assert!(daylight.colors.header_bg.is_none());
        assert!(Theme::from_name("catppuccin").is_none());
    }

    #[test]
    fn test_from_file_round_trips_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let toml = toml::to_string(&Theme::default()).unwrap();
        file.write_all(toml.as_bytes()).unwrap();

        assert_eq!(Theme::from_file(file.path()).unwrap(), Theme::default());
    }

    #[test]
    fn test_from_file_rejects_incomplete_theme() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"broken\"\n[colors]\nthreat = \"#ff0000\"\n").unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ThreatscopeError::Config(_)));
    }

    #[test]
    fn test_escape_sequences() {
        assert_eq!(Theme::fg("#ff3232"), "\u{1b}[38;2;255;50;50m");
        assert_eq!(Theme::bg("00ff88"), "\u{1b}[48;2;0;255;136m");
        assert_eq!(Theme::fg("nonsense"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn test_severity_colors() {
        let theme = Theme::default();
        assert_eq!(theme.severity_color(Severity::Critical), theme.colors.threat);
        assert_eq!(theme.verdict_color(false), "#00ff88");
    }
}
