//! Default gateway discovery probe

use crate::logging::EventLog;
use crate::runner::CommandRunner;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

static GATEWAY: OnceLock<Regex> = OnceLock::new();

fn gateway_re() -> &'static Regex {
    GATEWAY.get_or_init(|| Regex::new(r"gateway:\s*(\S+)").expect("valid regex"))
}

const PROBE: &str = "gateway";

/// Discover the default gateway address from the routing table.
///
/// Runs `route -n get default` and extracts the `gateway: <addr>` line.
/// No address found (or a failed invocation) is `None`, not an error
/// record: there is no natural target to report an error against.
pub async fn default_gateway(
    runner: &dyn CommandRunner,
    log: &EventLog,
    limit: Duration,
) -> Option<String> {
    log.probe_started(PROBE, "querying default route");

    let output = runner.run("route", &["-n", "get", "default"], limit).await;
    if let Some(error) = &output.error {
        log.probe_failed(PROBE, format!("route query failed: {}", error));
        return None;
    }

    match gateway_re()
        .captures(&output.stdout)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
    {
        Some(address) => {
            log.probe_succeeded(PROBE, format!("default gateway {}", address));
            Some(address)
        }
        None => {
            log.probe_failed(PROBE, "no gateway line in route output");
            None
        }
    }
}
