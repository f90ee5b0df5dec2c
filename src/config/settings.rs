//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub smtp: SmtpConfig,
    pub site: SiteConfig,
    pub templates: TemplatesConfig,
    pub dispatcher: DispatcherConfig,
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Which transport delivers queued mail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Smtp,
    Log,
}

/// SMTP configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    pub transport: TransportKind,
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Default sender address
    pub from: String,
    /// "starttls", "tls" or "none"
    pub tls: String,
    pub timeout_seconds: u64,
}

/// Public site details embedded in mail bodies
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    pub site_name: String,
    pub home_page: String,
    pub registration_page: String,
    /// Base URL used to build password reset links
    pub domain: String,
}

/// Mail template configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TemplatesConfig {
    /// Directory whose `*.html` files override the built-in templates
    pub directory: Option<String>,
}

/// Background dispatcher configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatcherConfig {
    pub queue_capacity: usize,
    pub concurrency: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// "text" or "json"
    pub format: String,
    pub directory: Option<String>,
    pub file_name: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Settings::default())?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("CALENDAR")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::CalendarError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/calendar".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            smtp: SmtpConfig {
                transport: TransportKind::Log,
                host: "localhost".to_string(),
                port: 587,
                username: None,
                password: None,
                from: "calendar@localhost.localdomain".to_string(),
                tls: "starttls".to_string(),
                timeout_seconds: 10,
            },
            site: SiteConfig {
                site_name: "Calendar".to_string(),
                home_page: "calendar.pythonic.guru".to_string(),
                registration_page: "calendar.pythonic.guru/registration".to_string(),
                domain: "http://localhost:8000".to_string(),
            },
            templates: TemplatesConfig { directory: None },
            dispatcher: DispatcherConfig {
                queue_capacity: 256,
                concurrency: 4,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
                directory: None,
                file_name: "calendar-mail.log".to_string(),
            },
        }
    }
}
