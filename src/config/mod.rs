//! Configuration Module
//!
//! Centralized, environment-driven configuration for the service.

use crate::utils::error::{AppError, AppResult};

/// Environment variable helpers
pub mod env {
    use std::env;

    /// Get environment variable as string with default
    pub fn get_string(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get environment variable as u16 with default
    pub fn get_u16(key: &str, default: u16) -> u16 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as u32 with default
    pub fn get_u32(key: &str, default: u32) -> u32 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as bool with default
    pub fn get_bool(key: &str, default: bool) -> bool {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// JWT signing settings
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `APP_ACCESS_TOKEN` (the JWT signing secret) is required; everything
    /// else has a development default.
    pub fn from_env() -> AppResult<Self> {
        let secret = std::env::var("APP_ACCESS_TOKEN").map_err(|_| {
            AppError::Configuration("APP_ACCESS_TOKEN environment variable is required".to_string())
        })?;

        Ok(Self {
            server: ServerConfig {
                host: env::get_string("HOSTNAME", "127.0.0.1"),
                port: env::get_u16("PORT", 8080),
            },
            database_url: env::get_string("DATABASE_URL", "sqlite://tutor_match.db"),
            jwt: JwtConfig { secret },
        })
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.jwt.secret.len() < 16 {
            return Err(AppError::Configuration(
                "APP_ACCESS_TOKEN must be at least 16 characters".to_string(),
            ));
        }
        Ok(())
    }
}
