//! Application configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. There are no CLI flags: the process is configured entirely by
//! its environment, and every variable has a development-friendly default.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use banca_core::LOW_STOCK_THRESHOLD;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub http_addr: SocketAddr,

    /// Path to the SQLite database file. Created on first start.
    pub database_path: PathBuf,

    /// Stock level below which the inventory view flags a product.
    pub low_stock_threshold: i64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// ## Variables
    /// - `BANCA_HTTP_ADDR` (default `127.0.0.1:8080`)
    /// - `BANCA_DATABASE_PATH` (default `banca.db`)
    /// - `BANCA_LOW_STOCK_THRESHOLD` (default `5`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = AppConfig {
            http_addr: env::var("BANCA_HTTP_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BANCA_HTTP_ADDR".to_string()))?,

            database_path: env::var("BANCA_DATABASE_PATH")
                .unwrap_or_else(|_| "banca.db".to_string())
                .into(),

            low_stock_threshold: env::var("BANCA_LOW_STOCK_THRESHOLD")
                .unwrap_or_else(|_| LOW_STOCK_THRESHOLD.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BANCA_LOW_STOCK_THRESHOLD".to_string()))?,
        };

        Ok(config)
    }
}

impl Default for AppConfig {
    /// Defaults suitable for development and tests.
    fn default() -> Self {
        AppConfig {
            http_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            database_path: PathBuf::from("banca.db"),
            low_stock_threshold: LOW_STOCK_THRESHOLD,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.low_stock_threshold, 5);
        assert_eq!(config.database_path, PathBuf::from("banca.db"));
    }
}
