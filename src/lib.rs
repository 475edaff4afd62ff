//! Threatscope: a terminal dashboard for live threat analysis.
//!
//! Threatscope submits text to a remote classification service and visualizes
//! the result as it arrives:
//! - Single-flight, debounced submission of the input text
//! - Verdict badge with an animated confidence gauge
//! - Natural-language rationale from a remote explainer
//! - Stat cards and charts synced from a remote stats service
//! - A bounded live feed of recent detections

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Shim (main.rs)                            │  ← Entry point, stdin commands
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← Single-threaded event loop
//! │  - Event channel, debounce and feed timers          │
//! │  - Spawned remote calls and animation tickers       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Submission control flow                          │  ← Business logic
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Visualization │   │ Remote Layer  │
//! │ (ui/)         │   │ (animation/,  │   │ (remote/)     │
//! │ - Rendering   │   │  charts/,     │   │ - Classifier  │
//! │ - Theming     │   │  feed/)       │   │ - Explainer   │
//! │ - Components  │   │ - Gauge, feed │   │ - Stats       │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Submission, verdict, feed models (domain/)       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Session state machine with event/action model
//! - [`animation`]: Confidence gauge, stat-card counters, tick schedules
//! - [`charts`]: Chart datasets and their sync operations
//! - [`domain`]: Core domain types (submissions, verdicts, feed entries, errors)
//! - [`feed`]: Bounded live feed buffer and its sample activity
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`remote`]: Remote service traits and the HTTP backend
//! - [`runtime`]: The async event loop
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing with file export
//!
//! # Configuration
//!
//! Configuration is read from TOML, then overridden by command-line flags:
//!
//! ```toml
//! # ~/.config/threatscope/config.toml
//! base_url = "http://127.0.0.1:8000"
//! request_timeout_ms = 30000
//! debounce_ms = 300
//! confidence_threat = 85
//! confidence_safe = 92
//! theme_name = "daylight"
//! trace_level = "debug"
//! ```
//!
//! # Submission Cycle
//!
//! 1. **Submit**: the input is trimmed and validated; empty input raises a
//!    notice and nothing is sent
//! 2. **Classify**: the verdict is displayed and the gauge animates toward the
//!    configured confidence; a failure ends the cycle here
//! 3. **Explain + Refresh**: both are issued at once and joined; an explainer
//!    failure only affects its panel, a stats failure keeps the last snapshot
//! 4. **Feed**: the submission is prepended to the live feed and the control
//!    is re-enabled
//!
//! # Example
//!
//! ```rust
//! use threatscope::{handle_event, initialize, Config, Event};
//!
//! let config = Config::default();
//! config.validate()?;
//!
//! let mut state = initialize(&config);
//! let (_render, actions) = handle_event(&mut state, &Event::Submit { text: "hello".into() })?;
//! assert_eq!(actions.len(), 2);
//! # Ok::<(), threatscope::ThreatscopeError>(())
//! ```

pub mod animation;
pub mod app;
pub mod charts;
pub mod domain;
pub mod feed;
pub mod infrastructure;
pub mod remote;
pub mod runtime;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Event, SessionSettings, SessionState, SubmissionState};
pub use domain::{Result, ThreatscopeError};
pub use runtime::{Dashboard, DashboardHandle, RuntimeTiming};
pub use ui::Theme;

use animation::Tween;
use app::ConfidenceProfile;
use remote::Endpoints;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "THREATSCOPE_CONFIG";

/// Dashboard configuration.
///
/// Every key is optional in the file; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the analysis API. Default: `http://127.0.0.1:8000`
    pub base_url: String,
    pub classify_path: String,
    pub explain_path: String,
    pub stats_path: String,

    /// Per-request timeout. Default: 30000
    pub request_timeout_ms: u64,

    /// Trailing debounce for analyze triggers. Default: 300
    pub debounce_ms: u64,

    /// Displayed confidence for threat verdicts, `0..=100`. Default: 85
    pub confidence_threat: u8,
    /// Displayed confidence for safe verdicts, `0..=100`. Default: 92
    pub confidence_safe: u8,

    /// Gauge animation: `gauge_steps` ticks `gauge_tick_ms` apart. Default: 50 × 20 ms
    pub gauge_steps: u32,
    pub gauge_tick_ms: u64,

    /// Stat-card count-up duration and tick. Default: 2000 ms / 40 ms
    pub counter_duration_ms: u64,
    pub counter_tick_ms: u64,

    /// Live-feed reseed period. Default: 30
    pub feed_refresh_secs: u64,

    /// Built-in theme: `darkweb` or `daylight`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` is expanded.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for traces. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let endpoints = Endpoints::default();

        Self {
            base_url: endpoints.base_url,
            classify_path: endpoints.classify_path,
            explain_path: endpoints.explain_path,
            stats_path: endpoints.stats_path,
            request_timeout_ms: 30_000,
            debounce_ms: 300,
            confidence_threat: 85,
            confidence_safe: 92,
            gauge_steps: 50,
            gauge_tick_ms: 20,
            counter_duration_ms: 2000,
            counter_tick_ms: 40,
            feed_refresh_secs: 30,
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ThreatscopeError::Io`] if the file cannot be read and
    /// [`ThreatscopeError::Config`] if it is not valid TOML for this struct.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use threatscope::Config;
    ///
    /// let config = Config::from_file("/etc/threatscope.toml")?;
    /// # Ok::<(), threatscope::ThreatscopeError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;

        toml::from_str(&contents).map_err(|e| {
            ThreatscopeError::Config(format!("{}: {e}", path.as_ref().display()))
        })
    }

    /// Loads the config from the first source that exists: `explicit`, then
    /// the file named by `THREATSCOPE_CONFIG`, then
    /// `<config dir>/threatscope/config.toml`. With none of them, returns the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Fails if a named file is missing or malformed. A missing default file
    /// is not an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::from_file(path);
        }

        let default_file = infrastructure::default_config_file();
        if default_file.is_file() {
            return Self::from_file(default_file);
        }

        Ok(Self::default())
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ThreatscopeError::Config`] for an empty base URL, a confidence
    /// above 100, zero gauge steps, or any zero interval.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| Err(ThreatscopeError::Config(message.to_string()));

        if self.base_url.trim().is_empty() {
            return invalid("base_url must not be empty");
        }
        if self.confidence_threat > 100 || self.confidence_safe > 100 {
            return invalid("confidence values must be between 0 and 100");
        }
        if self.gauge_steps == 0 {
            return invalid("gauge_steps must be at least 1");
        }

        let intervals = [
            ("request_timeout_ms", self.request_timeout_ms),
            ("gauge_tick_ms", self.gauge_tick_ms),
            ("counter_duration_ms", self.counter_duration_ms),
            ("counter_tick_ms", self.counter_tick_ms),
            ("feed_refresh_secs", self.feed_refresh_secs),
        ];
        if let Some((name, _)) = intervals.iter().find(|(_, value)| *value == 0) {
            return Err(ThreatscopeError::Config(format!("{name} must be greater than 0")));
        }

        Ok(())
    }

    #[must_use]
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            base_url: self.base_url.clone(),
            classify_path: self.classify_path.clone(),
            explain_path: self.explain_path.clone(),
            stats_path: self.stats_path.clone(),
        }
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            confidence: ConfidenceProfile {
                threat: self.confidence_threat,
                safe: self.confidence_safe,
            },
            gauge_tween: Tween::new(self.gauge_steps, Duration::from_millis(self.gauge_tick_ms)),
            counter_tween: Tween::over(
                Duration::from_millis(self.counter_duration_ms),
                Duration::from_millis(self.counter_tick_ms),
            ),
        }
    }

    #[must_use]
    pub const fn timing(&self) -> RuntimeTiming {
        RuntimeTiming {
            debounce: Duration::from_millis(self.debounce_ms),
            feed_refresh: Duration::from_secs(self.feed_refresh_secs),
        }
    }
}

/// Builds the initial session state for `config`.
///
/// The theme comes from `theme_file`, then `theme_name`, then the default;
/// a theme that fails to load falls back to the default with a debug trace.
///
/// # Example
///
/// ```rust
/// use threatscope::{initialize, Config};
///
/// let config = Config { theme_name: Some("daylight".to_string()), ..Config::default() };
/// let state = initialize(&config);
/// assert_eq!(state.theme.name, "daylight");
/// ```
#[must_use]
pub fn initialize(config: &Config) -> SessionState {
    tracing::debug!(base_url = %config.base_url, "initializing threatscope session");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    SessionState::new(config.session_settings(), theme)
}
