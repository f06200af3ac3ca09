//! Throughput test probe (optional)

use crate::logging::EventLog;
use crate::models::{ProbeOutcome, SpeedTestResult};
use crate::runner::CommandRunner;
use serde::Deserialize;
use std::time::Duration;

const PROBE: &str = "speedtest";

/// Raw machine-readable output of the throughput tool. All fields are
/// optional: newer OS versions add and remove keys freely.
#[derive(Debug, Deserialize)]
struct NetworkQualityOutput {
    dl_throughput: Option<f64>,
    ul_throughput: Option<f64>,
    responsiveness: Option<f64>,
    base_rtt: Option<f64>,
    interface_name: Option<String>,
    test_endpoint: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    os_version: Option<String>,
}

/// Run the throughput test in machine-readable mode.
///
/// Two distinct failure modes, kept distinguishable: the process failing
/// outright, and the process succeeding but emitting output that does
/// not decode as its documented JSON shape.
pub async fn speed_test(
    runner: &dyn CommandRunner,
    log: &EventLog,
    limit: Duration,
) -> ProbeOutcome<SpeedTestResult> {
    log.probe_started(PROBE, "running networkQuality in machine-readable mode");

    let output = runner.run("networkQuality", &["-c"], limit).await;
    if let Some(error) = output.error {
        log.probe_failed(PROBE, format!("process failed: {}", error));
        return ProbeOutcome::with_error(SpeedTestResult::default(), error);
    }

    let raw: NetworkQualityOutput = match serde_json::from_str(&output.stdout) {
        Ok(raw) => raw,
        Err(e) => {
            let error = format!("unparseable networkQuality output: {}", e);
            log.probe_failed(PROBE, error.as_str());
            return ProbeOutcome::with_error(SpeedTestResult::default(), error);
        }
    };

    let result = SpeedTestResult {
        download_mbps: raw.dl_throughput.map(bps_to_mbps),
        upload_mbps: raw.ul_throughput.map(bps_to_mbps),
        responsiveness_rpm: raw.responsiveness.map(|r| r.round() as u64),
        base_rtt_ms: raw.base_rtt,
        interface_name: raw.interface_name,
        endpoint: raw.test_endpoint,
        started_at: raw.start_date,
        finished_at: raw.end_date,
        os_version: raw.os_version,
    };

    log.probe_succeeded(
        PROBE,
        format!(
            "down {:?} Mbps, up {:?} Mbps",
            result.download_mbps, result.upload_mbps
        ),
    );
    ProbeOutcome::ok(result)
}

/// Normalize a bits-per-second figure to integer-rounded Mbps
fn bps_to_mbps(bps: f64) -> u64 {
    (bps / 1_000_000.0).round() as u64
}
