//! Configuration module for the kanban server.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("KANBAN_DB_PATH")
            .unwrap_or_else(|_| "./data/kanban.sqlite".to_string())
            .into();

        let raw_addr =
            env::var("KANBAN_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = raw_addr.parse().map_err(|e| {
            AppError::Validation(format!("Invalid KANBAN_BIND_ADDR {:?}: {}", raw_addr, e))
        })?;

        let log_level = env::var("KANBAN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    // Tests in this module mutate process-wide environment variables.
    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn clear_env() {
        env::remove_var("KANBAN_DB_PATH");
        env::remove_var("KANBAN_BIND_ADDR");
        env::remove_var("KANBAN_LOG_LEVEL");
    }

    #[test]
    fn test_default_config() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.db_path, PathBuf::from("./data/kanban.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_bind_addr() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("KANBAN_BIND_ADDR", "not-an-address");

        let result = Config::from_env();
        env::remove_var("KANBAN_BIND_ADDR");

        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("KANBAN_BIND_ADDR")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
