//! # OKR Tracker Logging Infrastructure
//!
//! Structured logging for the OKR tracker service: tracing subscriber setup
//! with JSON/pretty/compact output, optional file output and request IDs.

pub mod config;
pub mod macros;
pub mod request_id;

pub use config::LoggingConfig;
pub use request_id::{RequestId, REQUEST_ID_HEADER};
// Re-export tracing macros
pub use tracing::{debug, error, info, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// Keeps background log writers alive. Dropping it flushes and stops file output.
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug, Default)]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize the logging system.
///
/// # Arguments
///
/// * `level` - Log level or filter directives (debug, info, `server=debug,sea_orm=warn`)
/// * `format` - Output format (json, pretty, compact)
/// * `log_file` - Optional path to log file
pub fn init(
    level: &str,
    format: &str,
    log_file: Option<&str>,
) -> Result<LogGuard, tracing::subscriber::SetGlobalDefaultError> {
    init_with_config(LoggingConfig::from_env(level, format, log_file))
}

/// Initialize logging with a custom configuration.
pub fn init_with_config(config: LoggingConfig) -> Result<LogGuard, tracing::subscriber::SetGlobalDefaultError> {
    let (subscriber, file_guard) = config.build();
    tracing::subscriber::set_global_default(subscriber)?;
    info!(
        level = %config.level,
        format = %config.format,
        environment = %config.environment,
        log_file = config.log_file.as_deref().unwrap_or("-"),
        "Logging initialized"
    );
    Ok(LogGuard {
        _file: file_guard,
    })
}
