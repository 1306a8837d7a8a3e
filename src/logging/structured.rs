//! Subscriber setup
//!
//! Human readable events go to stderr so they never interleave with the
//! console prompts on stdout. When `[logging] local_enabled` is set, the same
//! events are also written as JSON lines to `{local_path}/cncfab.log`.

use crate::config::LoggingConfig;
use crate::domain::{CncFabError, Result};
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// File name of the JSON log inside `local_path`
pub const LOG_FILE_NAME: &str = "cncfab.log";

/// Keeps the file writer alive; dropping it flushes pending lines
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `level` when set.
///
/// # Errors
///
/// Returns a configuration error if `level` is unknown, the log directory
/// cannot be created, or a subscriber is already installed.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(level)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("cncfab={level}")));

    let mut layers = vec![tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter.clone())
        .boxed()];

    let file_guard = if config.local_enabled {
        let (layer, guard) = json_file_layer(config)?;
        layers.push(layer.with_filter(filter).boxed());
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| CncFabError::Configuration(format!("Logging already initialized: {e}")))?;

    tracing::debug!(
        %level,
        local_enabled = config.local_enabled,
        local_path = %config.local_path,
        "Logging initialized"
    );
    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn json_file_layer<S>(config: &LoggingConfig) -> Result<(Box<dyn Layer<S> + Send + Sync>, WorkerGuard)>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        CncFabError::Configuration(format!("Failed to create log directory {}: {e}", config.local_path))
    })?;

    let appender = RollingFileAppender::new(rotation(&config.local_rotation), &config.local_path, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(writer)
        .boxed();
    Ok((layer, guard))
}

fn rotation(name: &str) -> Rotation {
    match name {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

/// Parse a level name, ignoring case
///
/// # Errors
///
/// Returns a configuration error for anything but trace, debug, info, warn
/// or error.
pub fn parse_log_level(name: &str) -> Result<Level> {
    match name.to_ascii_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(CncFabError::Configuration(format!(
            "Invalid log level '{name}'. Must be one of: trace, debug, info, warn, error"
        ))),
    }
}
