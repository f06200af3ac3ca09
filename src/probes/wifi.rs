//! Wi-Fi state probe with a primary/fallback source chain

use crate::logging::EventLog;
use crate::models::WifiState;
use crate::parsers::{airport, system_profiler};
use crate::runner::CommandRunner;
use std::path::Path;
use std::time::Duration;

/// Fixed filesystem path of the private Wi-Fi adapter tool.
pub const AIRPORT_PATH: &str =
    "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/Current/Resources/airport";

const PROBE: &str = "wifi";

/// One source in the fallback chain: an availability check, an
/// invocation shape, and the parser matching its output format.
struct WifiSource {
    name: &'static str,
    program: String,
    args: &'static [&'static str],
    requires_path: bool,
    parse: fn(&str) -> WifiState,
}

/// Collect the current Wi-Fi radio state.
///
/// Tries the adapter tool first (skipped when its fixed path does not
/// exist), then the generic system-info tool. The first source that runs
/// cleanly and yields any data wins. Total failure is `None` — absence,
/// not an error record, since there is no target to attach an error to.
pub async fn wifi_state(
    runner: &dyn CommandRunner,
    log: &EventLog,
    limit: Duration,
) -> Option<WifiState> {
    wifi_state_with_primary(runner, log, limit, AIRPORT_PATH).await
}

/// Same as [`wifi_state`] with the primary tool path injected, so tests
/// can point it at an existing or missing file.
pub async fn wifi_state_with_primary(
    runner: &dyn CommandRunner,
    log: &EventLog,
    limit: Duration,
    primary_path: &str,
) -> Option<WifiState> {
    let sources = [
        WifiSource {
            name: "adapter tool",
            program: primary_path.to_string(),
            args: &["-I"],
            requires_path: true,
            parse: airport::parse,
        },
        WifiSource {
            name: "system profiler",
            program: "system_profiler".to_string(),
            args: &["SPAirPortDataType", "-detailLevel", "basic"],
            requires_path: false,
            parse: system_profiler::parse,
        },
    ];

    log.probe_started(PROBE, "collecting Wi-Fi radio state");

    for source in &sources {
        if source.requires_path && !Path::new(&source.program).exists() {
            log.probe_fell_back(
                PROBE,
                format!("{} not present at {}", source.name, source.program),
            );
            continue;
        }

        let output = runner.run(&source.program, source.args, limit).await;
        if let Some(error) = output.error {
            log.probe_fell_back(PROBE, format!("{} failed: {}", source.name, error));
            continue;
        }

        let state = (source.parse)(&output.stdout);
        if state.has_data() {
            log.probe_succeeded(
                PROBE,
                format!(
                    "{} reported ssid={}",
                    source.name,
                    state.ssid.as_deref().unwrap_or("<none>")
                ),
            );
            return Some(state);
        }

        log.probe_fell_back(PROBE, format!("{} output held no radio data", source.name));
    }

    log.probe_failed(PROBE, "no Wi-Fi source produced data");
    None
}
