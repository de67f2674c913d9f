//! Database Connection Management
//!
//! Utilities for managing SQLite connections with SQLx.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// Database connection pool type alias for convenience
pub type DatabasePool = SqlitePool;

/// Database configuration for connection setup
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://tutor_match.db".to_string(),
            max_connections: 5,
            connect_timeout: Duration::from_secs(30),
        }
    }
}

impl DatabaseConfig {
    /// Create database configuration from environment variables
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let url = std::env::var("DATABASE_URL")?;

        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        let connect_timeout_secs = std::env::var("DB_CONNECT_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            url,
            max_connections,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }

    /// Create a database connection pool from this configuration
    pub async fn create_pool(&self) -> Result<SqlitePool, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&self.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.connect_timeout)
            .connect_with(options)
            .await
    }
}

/// Optional limit/offset bounds for list queries
#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self { limit, offset }
    }

    /// Renders a `LIMIT ? OFFSET ?`-equivalent suffix with inline bounds.
    /// Values are clamped to non-negative integers so they are safe to splice.
    pub fn sql_suffix(&self) -> String {
        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) => {
                format!(" LIMIT {} OFFSET {}", limit.max(0), offset.max(0))
            }
            (Some(limit), None) => format!(" LIMIT {}", limit.max(0)),
            // SQLite needs a LIMIT clause to carry an OFFSET; -1 means unbounded.
            (None, Some(offset)) => format!(" LIMIT -1 OFFSET {}", offset.max(0)),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 5);
        assert!(config.url.starts_with("sqlite://"));
    }

    #[test]
    fn test_pagination_suffix() {
        assert_eq!(Pagination::default().sql_suffix(), "");
        assert_eq!(
            Pagination::new(Some(10), Some(20)).sql_suffix(),
            " LIMIT 10 OFFSET 20"
        );
        assert_eq!(Pagination::new(Some(10), None).sql_suffix(), " LIMIT 10");
        assert_eq!(
            Pagination::new(None, Some(20)).sql_suffix(),
            " LIMIT -1 OFFSET 20"
        );
        // Negative bounds are clamped, never spliced raw
        assert_eq!(
            Pagination::new(Some(-5), Some(-1)).sql_suffix(),
            " LIMIT 0 OFFSET 0"
        );
    }
}
