//! Environment variable handling and .env file support

use crate::config::Config;
use crate::error::{AppError, Result};
use std::env;
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load a `.env` file from the current directory if one exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        if Path::new(".env").exists() {
            dotenv::from_filename(".env")
                .map_err(|e| AppError::config(format!("Failed to load .env file: {}", e)))?;

            if debug {
                eprintln!("Loaded configuration from .env file");
            }
        }

        Ok(())
    }

    /// Apply `NETPULSE_*` environment overrides onto `config`
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(value) = read_var("NETPULSE_COUNT") {
            config.sample_count = value
                .parse()
                .map_err(|_| AppError::config(format!("Invalid NETPULSE_COUNT: {}", value)))?;
        }

        if let Some(value) = read_var("NETPULSE_INTERNET_HOST") {
            config.internet_host = value;
        }

        if let Some(value) = read_var("NETPULSE_LOOKUP_HOST") {
            config.lookup_host = value;
        }

        if let Some(value) = read_var("NETPULSE_ROUTER") {
            config.router_override = Some(value);
        }

        if let Some(value) = read_var("NETPULSE_DNS_SERVER") {
            config.dns_server_override = Some(value);
        }

        if let Some(value) = read_var("NETPULSE_TIMEOUT") {
            config.probe_timeout_seconds = value
                .parse()
                .map_err(|_| AppError::config(format!("Invalid NETPULSE_TIMEOUT: {}", value)))?;
        }

        if let Some(value) = read_var("NETPULSE_COLOR") {
            config.enable_color = value
                .parse()
                .map_err(|_| AppError::config(format!("Invalid NETPULSE_COLOR: {}", value)))?;
        }

        Ok(())
    }
}

fn read_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    // Process environment is shared mutable state; serialize these tests
    use crate::config::ENV_TEST_LOCK as ENV_LOCK;

    #[test]
    fn test_count_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("NETPULSE_COUNT", "9");
        let mut config = Config::default();
        EnvManager::apply_overrides(&mut config).unwrap();
        assert_eq!(config.sample_count, 9);
        env::remove_var("NETPULSE_COUNT");
    }

    #[test]
    fn test_invalid_numeric_override_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("NETPULSE_TIMEOUT", "soon");
        let mut config = Config::default();
        let error = EnvManager::apply_overrides(&mut config).unwrap_err();
        assert_eq!(error.category(), "CONFIG");
        env::remove_var("NETPULSE_TIMEOUT");
    }

    #[test]
    fn test_empty_value_ignored() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("NETPULSE_ROUTER", "  ");
        let mut config = Config::default();
        EnvManager::apply_overrides(&mut config).unwrap();
        assert!(config.router_override.is_none());
        env::remove_var("NETPULSE_ROUTER");
    }
}
