//! DNS server discovery and lookup timing probes

use crate::logging::EventLog;
use crate::models::{DnsLookupTiming, ProbeOutcome};
use crate::runner::CommandRunner;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

static NAMESERVER: OnceLock<Regex> = OnceLock::new();
static QUERY_TIME: OnceLock<Regex> = OnceLock::new();

fn nameserver_re() -> &'static Regex {
    NAMESERVER.get_or_init(|| Regex::new(r"nameserver\[0\]\s*:\s*(\S+)").expect("valid regex"))
}

fn query_time_re() -> &'static Regex {
    QUERY_TIME.get_or_init(|| Regex::new(r"Query time:\s*(\d+)\s*msec").expect("valid regex"))
}

/// Per-query timeout handed to the lookup utility itself
const DIG_QUERY_TIMEOUT_SECS: u32 = 2;

/// Discover the first configured system nameserver.
///
/// Runs `scutil --dns` and extracts the first `nameserver[0] : <addr>`
/// entry. No match or a failed invocation is `None`.
pub async fn system_dns_server(
    runner: &dyn CommandRunner,
    log: &EventLog,
    limit: Duration,
) -> Option<String> {
    const PROBE: &str = "dns-server";

    log.probe_started(PROBE, "reading system DNS configuration");

    let output = runner.run("scutil", &["--dns"], limit).await;
    if let Some(error) = &output.error {
        log.probe_failed(PROBE, format!("scutil failed: {}", error));
        return None;
    }

    match nameserver_re()
        .captures(&output.stdout)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
    {
        Some(server) => {
            log.probe_succeeded(PROBE, format!("nameserver {}", server));
            Some(server)
        }
        None => {
            log.probe_failed(PROBE, "no nameserver entry in scutil output");
            None
        }
    }
}

/// Time one DNS lookup for `host`, optionally against an explicit
/// server (resolver default otherwise).
///
/// Runs the lookup utility with a single try and a short per-query
/// timeout, and extracts the `Query time: <N> msec` figure. A missing
/// figure is an error outcome with `lookup_ms: None`.
pub async fn lookup_timing(
    runner: &dyn CommandRunner,
    log: &EventLog,
    limit: Duration,
    host: &str,
    server: Option<&str>,
) -> ProbeOutcome<DnsLookupTiming> {
    const PROBE: &str = "dns-lookup";

    let tries = "+tries=1".to_string();
    let time = format!("+time={}", DIG_QUERY_TIMEOUT_SECS);
    let at_server = server.map(|s| format!("@{}", s));

    let mut args: Vec<&str> = vec![&tries, &time];
    if let Some(at) = &at_server {
        args.push(at);
    }
    args.push(host);

    log.probe_started(
        PROBE,
        format!(
            "resolving {} via {}",
            host,
            server.unwrap_or("system default")
        ),
    );

    let output = runner.run("dig", &args, limit).await;
    let lookup_ms = query_time_re()
        .captures(&output.stdout)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok());

    match lookup_ms {
        Some(ms) => {
            log.probe_succeeded(PROBE, format!("{} resolved in {} ms", host, ms));
            ProbeOutcome {
                value: DnsLookupTiming {
                    lookup_ms: Some(ms),
                },
                error: output.error,
            }
        }
        None => {
            let error = output
                .error
                .unwrap_or_else(|| "no query time in dig output".to_string());
            log.probe_failed(PROBE, format!("{}: {}", host, error));
            ProbeOutcome::with_error(DnsLookupTiming::default(), error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{CommandOutput, FakeRunner};

    const SCUTIL_OUT: &str = "
DNS configuration

resolver #1
  search domain[0] : lan
  nameserver[0] : 192.168.1.1
  nameserver[1] : 8.8.8.8
  if_index : 14 (en0)
";

    const DIG_OUT: &str = "
;; ANSWER SECTION:
google.com.             whatever IN A 142.250.80.46

;; Query time: 23 msec
;; SERVER: 192.168.1.1#53(192.168.1.1)
";

    fn limit() -> Duration {
        Duration::from_secs(10)
    }

    #[tokio::test]
    async fn test_discovers_first_nameserver() {
        let runner = FakeRunner::new().with_output("scutil", CommandOutput::ok(SCUTIL_OUT, ""));
        let server = system_dns_server(&runner, &EventLog::disabled(), limit()).await;

        assert_eq!(server.as_deref(), Some("192.168.1.1"));
        assert_eq!(runner.invocations()[0], vec!["scutil", "--dns"]);
    }

    #[tokio::test]
    async fn test_no_nameserver_is_none() {
        let runner =
            FakeRunner::new().with_output("scutil", CommandOutput::ok("DNS configuration\n", ""));
        let server = system_dns_server(&runner, &EventLog::disabled(), limit()).await;
        assert!(server.is_none());
    }

    #[tokio::test]
    async fn test_lookup_with_explicit_server() {
        let runner = FakeRunner::new().with_output("dig", CommandOutput::ok(DIG_OUT, ""));
        let outcome = lookup_timing(
            &runner,
            &EventLog::disabled(),
            limit(),
            "google.com",
            Some("192.168.1.1"),
        )
        .await;

        assert!(!outcome.is_failure());
        assert_eq!(outcome.value.lookup_ms, Some(23));
        assert_eq!(
            runner.invocations()[0],
            vec!["dig", "+tries=1", "+time=2", "@192.168.1.1", "google.com"]
        );
    }

    #[tokio::test]
    async fn test_lookup_without_server_uses_default() {
        let runner = FakeRunner::new().with_output("dig", CommandOutput::ok(DIG_OUT, ""));
        let outcome =
            lookup_timing(&runner, &EventLog::disabled(), limit(), "google.com", None).await;

        assert_eq!(outcome.value.lookup_ms, Some(23));
        assert_eq!(
            runner.invocations()[0],
            vec!["dig", "+tries=1", "+time=2", "google.com"]
        );
    }

    #[tokio::test]
    async fn test_missing_query_time_is_error_outcome() {
        let runner =
            FakeRunner::new().with_output("dig", CommandOutput::ok(";; connection timed out\n", ""));
        let outcome =
            lookup_timing(&runner, &EventLog::disabled(), limit(), "google.com", None).await;

        assert!(outcome.is_failure());
        assert_eq!(outcome.value.lookup_ms, None);
        assert!(outcome.error.unwrap().contains("no query time"));
    }

    #[tokio::test]
    async fn test_process_failure_is_error_outcome() {
        let runner = FakeRunner::new();
        let outcome =
            lookup_timing(&runner, &EventLog::disabled(), limit(), "google.com", None).await;

        assert!(outcome.is_failure());
        assert!(outcome.error.unwrap().contains("failed to run dig"));
    }
}
