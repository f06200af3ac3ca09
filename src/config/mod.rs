//! Configuration management
//!
//! Resolution order: built-in defaults, then `.env` / `NETPULSE_*`
//! environment variables, then command-line arguments.

pub mod env;

pub use env::EnvManager;

use crate::cli::Cli;
use crate::defaults;
use crate::error::{AppError, Result};
use serde::Serialize;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Ping sample count for both ping probes
    pub sample_count: u32,

    /// Internet reachability ping target
    pub internet_host: String,

    /// Hostname resolved by the DNS lookup probe
    pub lookup_host: String,

    /// Router ping target override; default is the discovered gateway
    pub router_override: Option<String>,

    /// DNS server override; default is the discovered nameserver
    pub dns_server_override: Option<String>,

    /// Whether to run the throughput test
    pub run_speed_test: bool,

    /// Per-probe external process timeout in seconds
    pub probe_timeout_seconds: u64,

    /// Emit the report as JSON instead of formatted text
    pub output_json: bool,

    /// Enable colored terminal output
    pub enable_color: bool,

    /// Enable verbose output
    pub verbose: bool,

    /// Enable debug output (JSON event log)
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_count: defaults::DEFAULT_SAMPLE_COUNT,
            internet_host: defaults::DEFAULT_INTERNET_HOST.to_string(),
            lookup_host: defaults::DEFAULT_LOOKUP_HOST.to_string(),
            router_override: None,
            dns_server_override: None,
            run_speed_test: false,
            probe_timeout_seconds: defaults::DEFAULT_PROBE_TIMEOUT.as_secs(),
            output_json: false,
            enable_color: defaults::DEFAULT_ENABLE_COLOR,
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Get the per-probe process timeout as a Duration
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_seconds)
    }

    /// Timeout for the throughput test, which legitimately runs far
    /// longer than the other probes
    pub fn speed_test_timeout(&self) -> Duration {
        defaults::SPEED_TEST_TIMEOUT.max(self.probe_timeout())
    }

    /// Validate the configuration and return any errors.
    ///
    /// This is the one check that aborts before collection begins: a bad
    /// sample count is a usage error, not a probe failure.
    pub fn validate(&self) -> Result<()> {
        if self.sample_count == 0 {
            return Err(AppError::validation("sample count must be greater than 0"));
        }

        if self.sample_count > 100 {
            return Err(AppError::validation("sample count cannot exceed 100"));
        }

        if self.probe_timeout_seconds == 0 {
            return Err(AppError::validation("probe timeout must be greater than 0"));
        }

        if self.internet_host.trim().is_empty() {
            return Err(AppError::validation("internet host cannot be empty"));
        }

        if self.lookup_host.trim().is_empty() {
            return Err(AppError::validation("lookup host cannot be empty"));
        }

        Ok(())
    }
}

/// Build the effective configuration from defaults, environment and CLI
pub fn load_config(cli: Cli) -> Result<Config> {
    cli.validate().map_err(AppError::validation)?;

    EnvManager::load_env_file(cli.debug)?;

    let mut config = Config::default();
    EnvManager::apply_overrides(&mut config)?;

    // CLI arguments win over environment values
    if let Some(count) = cli.count {
        config.sample_count = count;
    }
    if let Some(host) = cli.internet_host {
        config.internet_host = host;
    }
    if let Some(host) = cli.lookup_host {
        config.lookup_host = host;
    }
    if cli.router.is_some() {
        config.router_override = cli.router;
    }
    if cli.dns_server.is_some() {
        config.dns_server_override = cli.dns_server;
    }
    if cli.speed_test {
        config.run_speed_test = true;
    }
    if let Some(timeout) = cli.timeout {
        config.probe_timeout_seconds = timeout;
    }
    if cli.json {
        config.output_json = true;
    }
    if cli.color {
        config.enable_color = true;
    }
    if cli.no_color {
        config.enable_color = false;
    }
    config.verbose = cli.verbose;
    config.debug = cli.debug;

    config.validate()?;
    Ok(config)
}

/// Serializes tests that touch the shared process environment
#[cfg(test)]
pub(crate) static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["netpulse"];
        argv.extend(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.sample_count, defaults::DEFAULT_SAMPLE_COUNT);
        assert_eq!(config.internet_host, defaults::DEFAULT_INTERNET_HOST);
        assert!(!config.run_speed_test);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_sample_count_rejected() {
        let config = Config {
            sample_count: 0,
            ..Config::default()
        };
        let error = config.validate().unwrap_err();
        assert_eq!(error.category(), "VALIDATION");
    }

    #[test]
    fn test_excessive_sample_count_rejected() {
        let config = Config {
            sample_count: 101,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = Config {
            probe_timeout_seconds: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let _guard = ENV_TEST_LOCK.lock().unwrap();
        let config = load_config(cli(&[
            "--count",
            "7",
            "--router",
            "10.0.0.1",
            "--speed-test",
            "--json",
            "--no-color",
        ]))
        .unwrap();

        assert_eq!(config.sample_count, 7);
        assert_eq!(config.router_override.as_deref(), Some("10.0.0.1"));
        assert!(config.run_speed_test);
        assert!(config.output_json);
        assert!(!config.enable_color);
    }

    #[test]
    fn test_load_config_rejects_zero_count() {
        let _guard = ENV_TEST_LOCK.lock().unwrap();
        let error = load_config(cli(&["--count", "0"])).unwrap_err();
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_speed_test_timeout_floor() {
        let config = Config::default();
        assert!(config.speed_test_timeout() >= defaults::SPEED_TEST_TIMEOUT);

        let long = Config {
            probe_timeout_seconds: 600,
            ..Config::default()
        };
        assert_eq!(long.speed_test_timeout(), Duration::from_secs(600));
    }
}
