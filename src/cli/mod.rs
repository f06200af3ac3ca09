//! Command-line interface

use clap::Parser;

/// netpulse - single-shot local network health diagnostics
#[derive(Parser, Debug, Clone)]
#[command(name = "netpulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Number of ping samples per target
    #[arg(short, long)]
    pub count: Option<u32>,

    /// Internet reachability target host
    #[arg(long, value_name = "HOST")]
    pub internet_host: Option<String>,

    /// Hostname to resolve in the DNS lookup probe
    #[arg(long, value_name = "HOST")]
    pub lookup_host: Option<String>,

    /// Router address to ping instead of the discovered gateway
    #[arg(long, value_name = "ADDR")]
    pub router: Option<String>,

    /// DNS server to query instead of the discovered nameserver
    #[arg(long, value_name = "ADDR")]
    pub dns_server: Option<String>,

    /// Also run the throughput test (slow)
    #[arg(long)]
    pub speed_test: bool,

    /// Per-probe process timeout in seconds
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Emit the report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose probe event output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output (JSON event log on stderr)
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["netpulse"];
        argv.extend(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_defaults_are_unset() {
        let cli = parse(&[]);
        assert!(cli.count.is_none());
        assert!(cli.router.is_none());
        assert!(!cli.speed_test);
        assert!(!cli.json);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_all_flags_parse() {
        let cli = parse(&[
            "--count",
            "3",
            "--internet-host",
            "1.1.1.1",
            "--lookup-host",
            "example.com",
            "--router",
            "10.0.0.1",
            "--dns-server",
            "9.9.9.9",
            "--speed-test",
            "--timeout",
            "15",
            "--json",
            "--verbose",
        ]);

        assert_eq!(cli.count, Some(3));
        assert_eq!(cli.internet_host.as_deref(), Some("1.1.1.1"));
        assert_eq!(cli.dns_server.as_deref(), Some("9.9.9.9"));
        assert!(cli.speed_test);
        assert_eq!(cli.timeout, Some(15));
        assert!(cli.json);
    }

    #[test]
    fn test_conflicting_color_flags() {
        let cli = parse(&["--color", "--no-color"]);
        assert!(cli.validate().is_err());
    }
}
