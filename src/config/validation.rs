//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{CalendarError, Result};
use crate::utils::helpers::verify_email_pattern;
use super::{Settings, TransportKind};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_smtp_config(&settings.smtp)?;
    validate_site_config(&settings.site)?;
    validate_dispatcher_config(&settings.dispatcher)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(CalendarError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(CalendarError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(CalendarError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate SMTP configuration
fn validate_smtp_config(config: &super::SmtpConfig) -> Result<()> {
    if !verify_email_pattern(&config.from) {
        return Err(CalendarError::Config(
            format!("Sender address is not a valid email: {}", config.from)
        ));
    }

    if config.transport == TransportKind::Log {
        return Ok(());
    }

    if config.host.is_empty() {
        return Err(CalendarError::Config(
            "SMTP host is required".to_string()
        ));
    }

    let valid_tls = ["starttls", "tls", "none"];
    if !valid_tls.contains(&config.tls.as_str()) {
        return Err(CalendarError::Config(
            format!("Invalid SMTP TLS mode: {}. Valid modes: {:?}", config.tls, valid_tls)
        ));
    }

    if config.username.is_some() != config.password.is_some() {
        return Err(CalendarError::Config(
            "SMTP username and password must be set together".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(CalendarError::Config(
            "SMTP timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate site configuration
fn validate_site_config(config: &super::SiteConfig) -> Result<()> {
    if config.site_name.is_empty() {
        return Err(CalendarError::Config(
            "Site name is required".to_string()
        ));
    }

    url::Url::parse(&config.domain).map_err(|e| {
        CalendarError::Config(format!("Site domain must be an absolute URL: {}", e))
    })?;

    Ok(())
}

/// Validate dispatcher configuration
fn validate_dispatcher_config(config: &super::DispatcherConfig) -> Result<()> {
    if config.queue_capacity == 0 {
        return Err(CalendarError::Config(
            "Queue capacity must be greater than 0".to_string()
        ));
    }

    if config.concurrency == 0 {
        return Err(CalendarError::Config(
            "Dispatcher concurrency must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(CalendarError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(CalendarError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if config.format != "text" && config.format != "json" {
        return Err(CalendarError::Config(
            format!("Invalid log format: {}", config.format)
        ));
    }

    Ok(())
}
