//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod user;
pub mod event;

// Re-export repositories
pub use user::UserRepository;
pub use event::EventRepository;
