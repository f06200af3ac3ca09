//! Parser for ping's statistics summary format

use crate::models::PingStats;
use regex::Regex;
use std::sync::OnceLock;

static PACKET_LOSS: OnceLock<Regex> = OnceLock::new();
static ROUND_TRIP: OnceLock<Regex> = OnceLock::new();

fn packet_loss_re() -> &'static Regex {
    PACKET_LOSS.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)%\s*packet loss").expect("valid regex"))
}

fn round_trip_re() -> &'static Regex {
    ROUND_TRIP.get_or_init(|| {
        // round-trip min/avg/max/stddev = 9.123/10.456/11.789/0.987 ms
        Regex::new(r"=\s*(\d+(?:\.\d+)?)/(\d+(?:\.\d+)?)/(\d+(?:\.\d+)?)/(\d+(?:\.\d+)?)\s*ms")
            .expect("valid regex")
    })
}

/// Parse ping's trailing statistics block in a single pass.
///
/// Extracts the packet-loss percentage and the min/avg/max/stddev
/// round-trip quadruple, taking the avg and stddev positions as latency
/// and jitter. `0.0% packet loss` parses to `Some(0.0)`, which stays
/// distinct from the `None` of an absent loss line. Total: never fails.
pub fn parse(text: &str) -> PingStats {
    let loss_pct = packet_loss_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok());

    let (avg_ms, jitter_ms) = match round_trip_re().captures(text) {
        Some(caps) => (
            caps.get(2).and_then(|m| m.as_str().parse().ok()),
            caps.get(4).and_then(|m| m.as_str().parse().ok()),
        ),
        None => (None, None),
    };

    PingStats {
        avg_ms,
        jitter_ms,
        loss_pct,
    }
}
