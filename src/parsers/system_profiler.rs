//! Parser for the generic system-info tool's nested Wi-Fi block format

use crate::models::WifiState;
use regex::Regex;
use std::sync::OnceLock;

static SIGNAL_NOISE: OnceLock<Regex> = OnceLock::new();
static CHANNEL: OnceLock<Regex> = OnceLock::new();
static TRANSMIT_RATE: OnceLock<Regex> = OnceLock::new();
static INTERFACE_NAME: OnceLock<Regex> = OnceLock::new();

fn signal_noise_re() -> &'static Regex {
    SIGNAL_NOISE.get_or_init(|| {
        Regex::new(r"Signal / Noise:\s*(-?\d+)\s*dBm\s*/\s*(-?\d+)\s*dBm").expect("valid regex")
    })
}

fn channel_re() -> &'static Regex {
    CHANNEL.get_or_init(|| Regex::new(r"Channel:\s*(\d+)(?:\s*\((\d+)GHz)?").expect("valid regex"))
}

fn transmit_rate_re() -> &'static Regex {
    TRANSMIT_RATE.get_or_init(|| Regex::new(r"Transmit Rate:\s*(\d+)").expect("valid regex"))
}

fn interface_name_re() -> &'static Regex {
    INTERFACE_NAME.get_or_init(|| {
        Regex::new(r"^(en|p2p|awdl|utun|bridge|llw)\d*$").expect("valid regex")
    })
}

/// Parse the system-info tool's indented Wi-Fi data block.
///
/// Targeted extraction over the whole text: the first SSID header line,
/// the first `Signal / Noise` pair, the first `Channel` figure with its
/// band annotation, and the first `Transmit Rate` figure. The band comes
/// from the explicit annotation next to the channel (normalized to
/// `"<N> GHz"`), not from the channel number. Total: never fails.
pub fn parse(text: &str) -> WifiState {
    let (signal_dbm, noise_dbm) = match signal_noise_re().captures(text) {
        Some(caps) => (
            caps.get(1).and_then(|m| m.as_str().parse().ok()),
            caps.get(2).and_then(|m| m.as_str().parse().ok()),
        ),
        None => (None, None),
    };

    let (channel, band) = match channel_re().captures(text) {
        Some(caps) => (
            caps.get(1).and_then(|m| m.as_str().parse().ok()),
            caps.get(2).map(|m| format!("{} GHz", m.as_str())),
        ),
        None => (None, None),
    };

    WifiState {
        ssid: extract_ssid(text),
        // This tool does not expose the access point address
        bssid: None,
        signal_dbm,
        noise_dbm,
        channel,
        band,
        link_rate_mbps: transmit_rate_re()
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok()),
    }
}

/// The SSID is the header line of the current-network block: the first
/// line after `Current Network Information:` that ends with a colon.
/// When the section marker is absent (older tool versions), fall back to
/// the first header-shaped line in the input.
fn extract_ssid(text: &str) -> Option<String> {
    let mut in_network_section = false;
    let mut fallback: Option<String> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed == "Current Network Information:" {
            in_network_section = true;
            continue;
        }

        if let Some(name) = header_name(trimmed) {
            if in_network_section {
                return Some(name);
            }
            if fallback.is_none() {
                fallback = Some(name);
            }
        }
    }

    if text.contains("Current Network Information:") {
        // Marker present but no header followed it
        None
    } else {
        fallback
    }
}

/// A header line is `<name>:` with a non-empty name and no value after
/// the colon. `field: value` lines, the tool's own section labels and
/// interface-name headers do not qualify.
fn header_name(trimmed: &str) -> Option<String> {
    let name = trimmed.strip_suffix(':')?;
    if name.is_empty() || name.contains(':') {
        return None;
    }
    if is_section_label(name) {
        return None;
    }
    Some(name.to_string())
}

fn is_section_label(name: &str) -> bool {
    matches!(
        name,
        "Wi-Fi" | "Software Versions" | "Interfaces" | "Other Local Wi-Fi Networks"
    ) || interface_name_re().is_match(name)
}
