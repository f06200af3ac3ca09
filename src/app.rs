//! Main application orchestration

use crate::{
    cli::Cli,
    collector,
    config::load_config,
    error::Result,
    logging::{EventLog, LogFormat, LogLevel, NoopSink, StderrSink},
    output,
    runner::SystemRunner,
};
use std::sync::Arc;

/// Coordinates configuration, collection and rendering for one run
pub struct App {
    cli: Cli,
}

impl App {
    /// Create a new application instance with CLI configuration
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the full collection.
    ///
    /// Returns the overall "had error" signal; individual probe failures
    /// never surface as an `Err` here, only usage errors do.
    pub async fn run(self) -> Result<bool> {
        let config = load_config(self.cli)?;

        let log = if config.debug {
            EventLog::new(Arc::new(StderrSink::new(
                LogLevel::Debug,
                config.enable_color,
                LogFormat::Json,
            )))
        } else if config.verbose {
            EventLog::new(Arc::new(StderrSink::new(
                LogLevel::Info,
                config.enable_color,
                LogFormat::Console,
            )))
        } else {
            EventLog::new(Arc::new(NoopSink))
        };

        let runner = SystemRunner::new();
        let report = collector::collect(&config, &runner, &log).await;

        if config.output_json {
            println!("{}", output::render_json(&report)?);
        } else {
            let formatter = output::formatter_for(config.enable_color);
            print!("{}", formatter.format_report(&report));
        }

        Ok(report.had_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_app_construction() {
        let cli = Cli::parse_from(["netpulse", "--count", "3"]);
        let app = App::new(cli);
        assert_eq!(app.cli.count, Some(3));
    }
}
