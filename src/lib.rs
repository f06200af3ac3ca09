//! netpulse
//!
//! A single-shot local network health diagnostic tool. Collects Wi-Fi
//! radio state, gateway reachability, DNS resolution latency and
//! optional throughput by invoking the host's own diagnostic utilities,
//! parses their text output defensively, and folds everything into one
//! structured report.

pub mod app;
pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod parsers;
pub mod probes;
pub mod runner;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{
    DiagnosticReport, DnsCheck, DnsServerSource, PingCheck, PingStats, ProbeOutcome, RouterCheck,
    SpeedTestResult, WifiState,
};
pub use runner::{CommandOutput, CommandRunner, FakeRunner, SystemRunner};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_SAMPLE_COUNT: u32 = 5;
    pub const DEFAULT_INTERNET_HOST: &str = "8.8.8.8";
    pub const DEFAULT_LOOKUP_HOST: &str = "google.com";
    pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);
    pub const SPEED_TEST_TIMEOUT: Duration = Duration::from_secs(120);
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
