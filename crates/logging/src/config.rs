//! # Logging Configuration
//!
//! Configuration for the logging subsystem.
//! Supports environment variables and programmatic configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "OKR_LOG_FORMAT";
/// Environment variable naming an additional JSON log file.
pub const LOG_FILE_ENV: &str = "OKR_LOG_FILE";
/// Environment variable naming the deployment environment.
pub const ENVIRONMENT_ENV: &str = "OKR_ENV";

type BoxedSubscriber = Box<dyn tracing::Subscriber + Send + Sync>;

/// Logging configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directives
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format (json, pretty, compact)
    #[serde(default = "default_format")]
    pub format: String,

    /// Optional log file path, written as daily-rolled JSON
    #[serde(default)]
    pub log_file: Option<String>,

    /// Whether to include timestamps
    #[serde(default = "default::bool_true")]
    pub include_timestamp: bool,

    /// Environment (development, testing, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

mod default {
    pub fn bool_true() -> bool { true }
}

fn default_level() -> String { "info".to_string() }

fn default_format() -> String { "compact".to_string() }

fn default_environment() -> String { "development".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level:             default_level(),
            format:            default_format(),
            log_file:          None,
            include_timestamp: true,
            environment:       default_environment(),
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables, falling back to the given values.
    pub fn from_env(level: &str, format: &str, log_file: Option<&str>) -> Self {
        Self {
            level: std::env::var("RUST_LOG")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| level.to_string()),
            format: std::env::var(LOG_FORMAT_ENV)
                .ok()
                .unwrap_or_else(|| format.to_string()),
            log_file: std::env::var(LOG_FILE_ENV)
                .ok()
                .or(log_file.map(|s| s.to_string())),
            environment: std::env::var(ENVIRONMENT_ENV).unwrap_or_else(|_| default_environment()),
            ..Default::default()
        }
    }

    /// Whether this is a production deployment.
    pub fn is_production(&self) -> bool { self.environment.eq_ignore_ascii_case("production") }

    fn filter(&self) -> EnvFilter { EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info")) }

    /// Build the tracing subscriber from this configuration.
    ///
    /// The returned guard must be held for as long as file output is wanted.
    pub fn build(&self) -> (BoxedSubscriber, Option<WorkerGuard>) {
        let filter = self.filter();
        let (file_layer, guard) = match self.log_file.as_deref() {
            Some(path) => {
                let (layer, guard) = Self::file_layer(path);
                (Some(layer), Some(guard))
            },
            None => (None, None),
        };

        let registry = Registry::default().with(file_layer).with(filter);

        let subscriber: BoxedSubscriber = match (self.format.as_str(), self.include_timestamp) {
            ("pretty", true) => {
                Box::new(registry.with(
                    fmt::layer()
                        .pretty()
                        .with_timer(fmt::time::UtcTime::rfc_3339()),
                ))
            },
            ("pretty", false) => Box::new(registry.with(fmt::layer().pretty().without_time())),
            ("compact", true) => {
                Box::new(registry.with(
                    fmt::layer()
                        .compact()
                        .with_timer(fmt::time::UtcTime::rfc_3339()),
                ))
            },
            ("compact", false) => Box::new(registry.with(fmt::layer().compact().without_time())),
            (_, true) => {
                Box::new(registry.with(
                    fmt::layer()
                        .json()
                        .with_timer(fmt::time::UtcTime::rfc_3339()),
                ))
            },
            (_, false) => Box::new(registry.with(fmt::layer().json().without_time())),
        };

        (subscriber, guard)
    }

    fn file_layer(
        log_file: &str,
    ) -> (
        Box<dyn tracing_subscriber::Layer<Registry> + Send + Sync>,
        WorkerGuard,
    ) {
        let path = Path::new(log_file);
        let directory = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| "okr-tracker.log".to_string());

        let appender = tracing_appender::rolling::daily(directory, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .json()
            .with_ansi(false)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(non_blocking)
            .boxed();
        (layer, guard)
    }
}
