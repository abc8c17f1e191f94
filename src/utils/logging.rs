//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the event organizer.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{EventOrganizerError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file appender when dropped and must be kept
/// alive for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.directory, &config.file_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let (stdout_layer, file_layer) = if config.format == "json" {
        (
            tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout).boxed(),
            tracing_subscriber::fmt::layer().json().with_writer(non_blocking).boxed(),
        )
    } else {
        (
            tracing_subscriber::fmt::layer().with_writer(std::io::stdout).boxed(),
            tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking).boxed(),
        )
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| EventOrganizerError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(guard)
}

/// Log event lifecycle actions
pub fn log_event_action(event_id: i64, action: &str, user_id: Option<i64>, details: Option<&str>) {
    info!(
        event_id = event_id,
        action = action,
        user_id = user_id,
        details = details,
        "Event action performed"
    );
}

/// Log registration (RSVP) changes and refusals
pub fn log_registration_action(event_id: i64, user_id: i64, action: &str, reason: Option<&str>) {
    if let Some(reason) = reason {
        debug!(
            event_id = event_id,
            user_id = user_id,
            action = action,
            reason = reason,
            "Registration refused"
        );
    } else {
        info!(
            event_id = event_id,
            user_id = user_id,
            action = action,
            "Registration action performed"
        );
    }
}

/// Log notification fan-out results
pub fn log_notification_fanout(event_id: i64, notification_type: &str, recipients: usize) {
    if recipients == 0 {
        debug!(
            event_id = event_id,
            notification_type = notification_type,
            "No recipients for notification"
        );
    } else {
        info!(
            event_id = event_id,
            notification_type = notification_type,
            recipients = recipients,
            "Notifications created"
        );
    }
}

/// Log a notification failure that did not roll back the triggering change
pub fn log_notification_failure(event_id: i64, notification_type: &str, error: &EventOrganizerError) {
    warn!(
        event_id = event_id,
        notification_type = notification_type,
        error = %error,
        "Failed to create notifications; state change kept"
    );
}

/// Log archival sweep results
pub fn log_archive_sweep(archived: u64, duration_ms: u64) {
    info!(
        archived = archived,
        duration_ms = duration_ms,
        "Archival sweep completed"
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
