//! Terminal entry point.
//!
//! A thin shim around the library: it resolves configuration, installs
//! tracing, wires the HTTP backend and the ANSI surface into a
//! [`Dashboard`], and forwards operator input from stdin.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   stdin reader task     │  ← one line per command
//! └─────────────────────────┘
//!             │ DashboardHandle
//!             ▼
//! ┌─────────────────────────┐
//! │   Dashboard event loop  │  ← owns SessionState
//! │   (current_thread)      │  ← spawns remote calls and timers
//! └─────────────────────────┘
//!             │
//!             ▼
//!      AnsiSurface → stdout
//! ```
//!
//! # Startup
//!
//! 1. **Config**: `--config`, `THREATSCOPE_CONFIG`, or the default config file
//! 2. **Overrides**: `--base-url`, `--theme`, `--trace-level`
//! 3. **Tracing**: spans go to `<data dir>/threatscope/threatscope-otlp.json`
//! 4. **Background**: feed timer and initial stats refresh
//! 5. **Loop**: until `:quit` or end of input
//!
//! # Commands
//!
//! - any text: becomes the input and triggers a debounced analysis
//! - `:refresh`: reloads statistics
//! - `:quit` or EOF: exits

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use threatscope::remote::{HttpBackend, Services};
use threatscope::ui::AnsiSurface;
use threatscope::{initialize, Config, Dashboard, DashboardHandle};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "threatscope", version, about = "Live threat-analysis dashboard")]
struct Cli {
    #[arg(long, env = "THREATSCOPE_CONFIG", help = "Path to a TOML config file")]
    config: Option<PathBuf>,
    #[arg(long, help = "Base URL of the analysis API")]
    base_url: Option<String>,
    #[arg(long, help = "Built-in theme name (darkweb, daylight)")]
    theme: Option<String>,
    #[arg(long, help = "Trace filter directive, e.g. debug or threatscope=trace")]
    trace_level: Option<String>,
    #[arg(long, default_value_t = 48, help = "Terminal rows")]
    rows: usize,
    #[arg(long, default_value_t = 100, help = "Terminal columns")]
    cols: usize,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(theme) = &self.theme {
            config.theme_name = Some(theme.clone());
            config.theme_file = None;
        }
        if let Some(trace_level) = &self.trace_level {
            config.trace_level.clone_from(trace_level);
        }
    }
}

/// One line of operator input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Analyze(String),
    Refresh,
    Quit,
    Empty,
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Self::Empty,
            ":quit" | ":q" => Self::Quit,
            ":refresh" => Self::Refresh,
            _ => Self::Analyze(line.to_string()),
        }
    }
}

/// Forwards stdin lines to the loop until `:quit` or EOF.
async fn forward_stdin(handle: DashboardHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "failed to read stdin");
                break;
            }
        };

        let sent = match Command::parse(&line) {
            Command::Empty => Ok(()),
            Command::Quit => break,
            Command::Refresh => handle.refresh_stats(),
            Command::Analyze(text) => handle.input(text).and_then(|()| handle.analyze()),
        };
        if sent.is_err() {
            return;
        }
    }

    if let Err(e) = handle.shutdown() {
        tracing::debug!(error = %e, "event loop already stopped");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> threatscope::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    if let Some(trace_file) = threatscope::observability::init_tracing(&config) {
        tracing::debug!(trace_file = %trace_file.display(), "tracing initialized");
    }

    let backend = HttpBackend::new(config.endpoints(), config.request_timeout())?;
    let services = Services::from_backend(Arc::new(backend));
    let surface = AnsiSurface::new(cli.rows, cli.cols);

    let mut dashboard = Dashboard::new(initialize(&config), services, surface, config.timing());
    dashboard.start_background();
    tokio::spawn(forward_stdin(dashboard.handle()));

    dashboard.run().await.inspect_err(|e| {
        tracing::error!(error = %e, "dashboard stopped unexpectedly");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("  "), Command::Empty);
        assert_eq!(Command::parse(":quit"), Command::Quit);
        assert_eq!(Command::parse(" :refresh "), Command::Refresh);
        assert_eq!(Command::parse("' OR 1=1 --"), Command::Analyze("' OR 1=1 --".to_string()));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let cli = Cli::parse_from(["threatscope", "--base-url", "http://10.0.0.5:8000", "--theme", "daylight"]);
        let mut config = Config {
            theme_file: Some("~/themes/custom.toml".to_string()),
            ..Config::default()
        };

        cli.apply_overrides(&mut config);
        assert_eq!(config.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.theme_name.as_deref(), Some("daylight"));
        assert_eq!(config.theme_file, None);
        assert_eq!(config.trace_level, "info");
        assert_eq!((cli.rows, cli.cols), (48, 100));
    }
}
