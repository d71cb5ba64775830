//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the console.

use std::time::Duration;
use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{ConsoleError, Result};

/// Initialize logging based on configuration
///
/// The console layer writes to stderr so log lines never interleave with the
/// rendered table on stdout. The returned guard must be held for the lifetime
/// of the program or buffered file output is lost.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.directory, &config.file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .try_init()
        .map_err(|e| ConsoleError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a completed call against the bot config service
pub fn log_api_call(operation: &str, target: Option<i64>, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;
    if success {
        debug!(
            operation = operation,
            id = target,
            duration_ms = duration_ms,
            "Bot config service call completed"
        );
    } else {
        warn!(
            operation = operation,
            id = target,
            duration_ms = duration_ms,
            "Bot config service call failed"
        );
    }
}

/// Log page actions with structured data
pub fn log_page_action(action: &str, id: Option<i64>, details: Option<&str>) {
    info!(
        action = action,
        id = id,
        details = details,
        "Console action performed"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log a response that arrived too late to be applied
pub fn log_stale_response(kind: &str, received: u64, latest: u64) {
    debug!(
        kind = kind,
        received = received,
        latest = latest,
        "Discarding stale response"
    );
}
