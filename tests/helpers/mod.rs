//! Test helpers module
//!
//! This module provides utilities and helpers for testing the calendar mail
//! notifiers: an in-memory data session with the standard fixtures, a test
//! context wiring the dispatcher to a capturing transport, and an optional
//! PostgreSQL database.

#![allow(dead_code)]

pub mod database_helper;
pub mod session;
pub mod test_context;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}
