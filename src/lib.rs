//! Calendar mail
//!
//! Email notifications for the calendar application: event reminders,
//! participant mailings, invitations, file delivery and password resets.
//! Messages are composed synchronously and delivered by a background
//! dispatcher over a pluggable transport.

pub mod config;
pub mod database;
pub mod mail;
pub mod models;
pub mod salary;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CalendarError, Result};

// Re-export main components for easy access
pub use database::{CalendarStore, DatabaseService, MemoryStore};
pub use mail::{MailDispatcher, MailQueue, Transport};
pub use services::{EmailService, SendOutcome, ServiceFactory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
