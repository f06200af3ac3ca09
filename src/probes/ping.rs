//! ICMP ping probe

use crate::logging::EventLog;
use crate::models::{Measured, PingCheck, PingStats, ProbeOutcome};
use crate::parsers;
use crate::runner::CommandRunner;
use std::time::Duration;

/// Ping a host and parse the resulting statistics.
///
/// Leniency policy: parsed statistics are trusted over a non-zero exit
/// code. Partial loss makes ping exit non-zero while still printing a
/// valid summary; in that case the statistics are kept and the process
/// error rides along as an advisory. Only when nothing parses *and* the
/// process failed is the outcome a plain error.
pub async fn ping_host(
    runner: &dyn CommandRunner,
    log: &EventLog,
    limit: Duration,
    probe: &str,
    target: Option<&str>,
    samples: u32,
) -> PingCheck {
    let Some(target) = target else {
        log.probe_failed(probe, "no target address available, skipping ping");
        return PingCheck::no_target(samples, "no target address available");
    };

    log.probe_started(probe, format!("pinging {} with {} samples", target, samples));

    let count = samples.to_string();
    let output = runner
        .run("ping", &["-n", "-c", &count, target], limit)
        .await;
    let stats = parsers::ping::parse(&output.stdout);

    match (&output.error, stats.has_data()) {
        (None, true) => log.probe_succeeded(
            probe,
            format!(
                "{}: avg {:?} ms, loss {:?}%",
                target, stats.avg_ms, stats.loss_pct
            ),
        ),
        (Some(error), true) => log.probe_succeeded(
            probe,
            format!("{}: partial statistics despite error: {}", target, error),
        ),
        (Some(error), false) => log.probe_failed(probe, format!("{}: {}", target, error)),
        (None, false) => log.probe_failed(probe, format!("{}: no statistics in ping output", target)),
    }

    PingCheck {
        target: Some(target.to_string()),
        samples,
        outcome: ProbeOutcome {
            value: stats,
            error: output.error,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{CommandOutput, FakeRunner};

    const CLEAN_RUN: &str = "
--- 8.8.8.8 ping statistics ---
5 packets transmitted, 5 packets received, 0.0% packet loss
round-trip min/avg/max/stddev = 9.123/10.456/11.789/0.987 ms
";

    const PARTIAL_LOSS: &str = "
--- 8.8.8.8 ping statistics ---
5 packets transmitted, 3 packets received, 40.0% packet loss
round-trip min/avg/max/stddev = 9.123/10.456/11.789/0.987 ms
";

    fn limit() -> Duration {
        Duration::from_secs(30)
    }

    #[tokio::test]
    async fn test_clean_run() {
        let runner = FakeRunner::new().with_output("ping", CommandOutput::ok(CLEAN_RUN, ""));
        let check = ping_host(
            &runner,
            &EventLog::disabled(),
            limit(),
            "ping-internet",
            Some("8.8.8.8"),
            5,
        )
        .await;

        assert_eq!(check.target.as_deref(), Some("8.8.8.8"));
        assert_eq!(check.samples, 5);
        assert!(!check.is_failure());
        assert_eq!(check.outcome.value.avg_ms, Some(10.456));
        assert_eq!(check.outcome.value.jitter_ms, Some(0.987));
        assert_eq!(check.outcome.value.loss_pct, Some(0.0));
        // Non-interactive invocation with the requested sample count
        assert_eq!(
            runner.invocations()[0],
            vec!["ping", "-n", "-c", "5", "8.8.8.8"]
        );
    }

    #[tokio::test]
    async fn test_statistics_survive_nonzero_exit() {
        let runner = FakeRunner::new().with_output(
            "ping",
            CommandOutput::failed(PARTIAL_LOSS, "", "ping exited with code 2"),
        );
        let check = ping_host(
            &runner,
            &EventLog::disabled(),
            limit(),
            "ping-internet",
            Some("8.8.8.8"),
            5,
        )
        .await;

        // Parsed statistics preferred; process error kept as advisory
        assert_eq!(check.outcome.value.avg_ms, Some(10.456));
        assert_eq!(check.outcome.value.loss_pct, Some(40.0));
        assert_eq!(
            check.outcome.error.as_deref(),
            Some("ping exited with code 2")
        );
    }

    #[tokio::test]
    async fn test_total_failure_is_error_outcome() {
        let runner = FakeRunner::new().with_output(
            "ping",
            CommandOutput::failed("", "ping: cannot resolve host", "ping exited with code 68"),
        );
        let check = ping_host(
            &runner,
            &EventLog::disabled(),
            limit(),
            "ping-internet",
            Some("nosuchhost.invalid"),
            5,
        )
        .await;

        assert!(check.is_failure());
        assert!(check.outcome.error.is_some());
        assert_eq!(check.outcome.value, PingStats::empty());
    }

    #[tokio::test]
    async fn test_partial_parse_preserved() {
        // 100% loss: loss parses, no rtt line exists
        let total_loss = "5 packets transmitted, 0 packets received, 100.0% packet loss\n";
        let runner = FakeRunner::new().with_output(
            "ping",
            CommandOutput::failed(total_loss, "", "ping exited with code 2"),
        );
        let check = ping_host(
            &runner,
            &EventLog::disabled(),
            limit(),
            "ping-router",
            Some("192.168.1.1"),
            5,
        )
        .await;

        assert_eq!(check.outcome.value.loss_pct, Some(100.0));
        assert_eq!(check.outcome.value.avg_ms, None);
        assert!(check.outcome.error.is_some());
    }

    #[tokio::test]
    async fn test_no_target_skips_invocation() {
        let runner = FakeRunner::new();
        let check = ping_host(
            &runner,
            &EventLog::disabled(),
            limit(),
            "ping-router",
            None,
            5,
        )
        .await;

        assert!(check.is_failure());
        assert!(check.target.is_none());
        assert!(runner.invocations().is_empty());
    }
}
