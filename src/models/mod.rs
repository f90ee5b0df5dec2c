//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod event;
pub mod forgot_password;

// Re-export commonly used models
pub use user::{User, CreateUserRequest};
pub use event::{Event, UserEvent, CreateEventRequest};
pub use forgot_password::ForgotPassword;
