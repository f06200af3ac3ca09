//! Parser for the Wi-Fi adapter tool's `key: value` output format

use crate::models::WifiState;
use std::collections::HashMap;

/// Parse the adapter tool's line-oriented `key: value` output.
///
/// Each line is split on its first `:` with both sides trimmed; the last
/// occurrence of a duplicate key wins. Unknown keys are ignored, absent
/// keys yield `None` fields. Total: never fails on any input.
pub fn parse(text: &str) -> WifiState {
    let mut fields: HashMap<&str, &str> = HashMap::new();

    for line in text.lines() {
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            let value = value.trim();
            if !key.is_empty() {
                fields.insert(key, value);
            }
        }
    }

    let channel = fields.get("channel").and_then(|v| leading_number(v));

    WifiState {
        ssid: non_empty(fields.get("SSID")),
        bssid: non_empty(fields.get("BSSID")),
        signal_dbm: fields.get("agrCtlRSSI").and_then(|v| v.parse().ok()),
        noise_dbm: fields.get("agrCtlNoise").and_then(|v| v.parse().ok()),
        channel,
        band: channel.map(|c| WifiState::band_for_channel(c).to_string()),
        link_rate_mbps: fields.get("lastTxRate").and_then(|v| v.parse().ok()),
    }
}

/// Extract the leading numeric token; channel values may carry a
/// trailing qualifier such as `48,1` where only `48` is the channel.
fn leading_number(value: &str) -> Option<u32> {
    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn non_empty(value: Option<&&str>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
