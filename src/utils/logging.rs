//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the calendar-mail application.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;

use crate::config::LoggingConfig;
use crate::utils::errors::{CalendarError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file appender when dropped and must be kept
/// alive for as long as the process logs.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| CalendarError::Config(format!("Invalid log filter {}: {}", config.level, e)))?;

    let json = config.format == "json";
    let stdout_layer = if json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(std::io::stdout).boxed()
    };

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, &config.file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CalendarError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a message accepted by the dispatcher
pub fn log_mail_queued(delivery_id: Uuid, kind: &str, recipients: usize) {
    info!(
        delivery_id = %delivery_id,
        kind = kind,
        recipients = recipients,
        "Mail queued for delivery"
    );
}

/// Log a notifier refusing to compose a message
pub fn log_mail_rejected(kind: &str, reason: &str) {
    debug!(kind = kind, reason = reason, "Mail rejected before sending");
}

/// Log the outcome of a deferred send
pub fn log_delivery(delivery_id: Uuid, subject: &str, error: Option<&str>) {
    match error {
        None => debug!(delivery_id = %delivery_id, subject = subject, "Mail delivered"),
        Some(error) => error!(
            delivery_id = %delivery_id,
            subject = subject,
            error = error,
            "Mail delivery failed"
        ),
    }
}

/// Log an event mailing list attempt by someone other than the owner
pub fn log_unauthorized_mailing(event_id: i64, requester_id: i64) {
    warn!(
        event_id = event_id,
        requester_id = requester_id,
        "Mailing list requested by non-owner"
    );
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}
