//! Database Module
//!
//! Database connection management and utilities.

pub mod connection;

// Re-export commonly used types
pub use connection::{DatabaseConfig, DatabasePool, Pagination};
