//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{EventOrganizerError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;
    validate_archive_config(&settings.archive)?;
    validate_notifications_config(&settings.notifications)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(EventOrganizerError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(EventOrganizerError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(EventOrganizerError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(EventOrganizerError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(EventOrganizerError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    let valid_formats = ["pretty", "json"];
    if !valid_formats.contains(&config.format.as_str()) {
        return Err(EventOrganizerError::Config(
            format!("Invalid log format: {}. Valid formats: {:?}", config.format, valid_formats)
        ));
    }

    if config.file_prefix.is_empty() {
        return Err(EventOrganizerError::Config(
            "Log file prefix is required".to_string()
        ));
    }

    Ok(())
}

/// Validate archival sweep configuration
fn validate_archive_config(config: &super::ArchiveConfig) -> Result<()> {
    if config.interval_seconds == 0 {
        return Err(EventOrganizerError::Config(
            "Archive interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate notification configuration
fn validate_notifications_config(config: &super::NotificationsConfig) -> Result<()> {
    if config.time_format.trim().is_empty() {
        return Err(EventOrganizerError::Config(
            "Notification time format is required".to_string()
        ));
    }

    Ok(())
}
