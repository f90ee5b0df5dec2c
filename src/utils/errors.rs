//! Error handling for calendar-mail
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

use crate::mail::MailError;

/// Main error type for calendar-mail
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for calendar-mail operations
pub type Result<T> = std::result::Result<T, CalendarError>;

impl From<config::ConfigError> for CalendarError {
    fn from(err: config::ConfigError) -> Self {
        CalendarError::Config(err.to_string())
    }
}

impl CalendarError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            CalendarError::Database(_) => false,
            CalendarError::Migration(_) => false,
            CalendarError::Mail(e) => e.is_transient(),
            CalendarError::Config(_) => false,
            CalendarError::UserNotFound { .. } => false,
            CalendarError::EventNotFound { .. } => false,
            CalendarError::Io(_) => true,
            CalendarError::UrlParse(_) => false,
            CalendarError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CalendarError::Database(_) => ErrorSeverity::Critical,
            CalendarError::Migration(_) => ErrorSeverity::Critical,
            CalendarError::Config(_) => ErrorSeverity::Critical,
            CalendarError::UserNotFound { .. } => ErrorSeverity::Warning,
            CalendarError::EventNotFound { .. } => ErrorSeverity::Warning,
            CalendarError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_classification() {
        assert_eq!(CalendarError::Config("x".into()).severity(), ErrorSeverity::Critical);
        assert_eq!(CalendarError::EventNotFound { event_id: 3 }.severity(), ErrorSeverity::Warning);
        assert_eq!(CalendarError::InvalidInput("x".into()).severity(), ErrorSeverity::Info);
        assert_eq!(CalendarError::Mail(MailError::QueueClosed).severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_mail_errors_follow_transport_recoverability() {
        assert!(CalendarError::Mail(MailError::Smtp("timeout".into())).is_recoverable());
        assert!(!CalendarError::Mail(MailError::InvalidAddress("nope".into())).is_recoverable());
        assert!(!CalendarError::Config("missing".into()).is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = CalendarError::UserNotFound { user_id: 42 };
        assert_eq!(err.to_string(), "User not found: 42");
        assert_eq!(ErrorSeverity::Critical.to_string(), "CRITICAL");
    }
}
