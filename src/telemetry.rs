//! Log file setup
//!
//! The terminal belongs to the UI, so tracing output goes to a file in the
//! configured log directory through a non-blocking writer.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::errors::{AppError, Result};

pub const LOG_FILE_NAME: &str = "health-log.log";

/// Install the global subscriber.
///
/// `level_override` (from -v flags) wins over the configured level; a
/// `RUST_LOG` environment variable wins over both. Keep the returned guard
/// alive for the whole process or buffered lines are lost.
pub fn init_logging(config: &LoggingConfig, level_override: Option<&str>) -> Result<WorkerGuard> {
    let log_dir = config.resolved_log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let level = level_override.unwrap_or(&config.level);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| AppError::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    Ok(guard)
}
