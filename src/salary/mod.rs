//! Salary configuration shared with the payroll calculator.

pub mod config;

pub use config::Numeric;
