//! Subscriber installation for the file-exported trace pipeline.

use super::tracer;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace output inside the data directory.
pub const TRACE_FILE_NAME: &str = "threatscope-otlp.json";

/// Installs the global subscriber: an [`EnvFilter`] feeding an OpenTelemetry
/// layer whose spans are appended to `<data dir>/threatscope-otlp.json`.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `config.trace_level`.
///
/// # Returns
///
/// The trace file path, or `None` if the data directory could not be created
/// or a global subscriber was already installed. Tracing is optional, so
/// neither case is an error.
///
/// # Example
///
/// ```rust,no_run
/// use threatscope::observability::init_tracing;
/// use threatscope::Config;
///
/// let config = Config { trace_level: "debug".to_string(), ..Config::default() };
/// if let Some(path) = init_tracing(&config) {
///     tracing::debug!(path = %path.display(), "tracing active");
/// }
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let data_dir = paths::data_dir();
    std::fs::create_dir_all(&data_dir).ok()?;

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", "threatscope"),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let trace_file = data_dir.join(TRACE_FILE_NAME);
    let provider = tracer::create_tracer_provider(trace_file.clone(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer("threatscope"));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.trace_level.as_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .ok()?;

    Some(trace_file)
}
