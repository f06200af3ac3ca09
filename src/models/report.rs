//! Diagnostic report data model
//!
//! All records here are built exactly once per run from parsed utility
//! output and never mutated afterward. Every field is independently
//! nullable so a report can always be produced, even when every probe
//! failed.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Wi-Fi radio state as reported by the adapter tooling.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WifiState {
    /// Network name, if associated
    pub ssid: Option<String>,

    /// Access point hardware address (only the adapter tool exposes this)
    pub bssid: Option<String>,

    /// Received signal strength in dBm
    pub signal_dbm: Option<i32>,

    /// Noise floor in dBm
    pub noise_dbm: Option<i32>,

    /// Radio channel number
    pub channel: Option<u32>,

    /// Frequency band, derived from the channel and never set independently
    pub band: Option<String>,

    /// Negotiated link rate in Mbps
    pub link_rate_mbps: Option<u32>,
}

impl WifiState {
    /// Create a state with every field unknown
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when at least one field was extracted from tool output
    pub fn has_data(&self) -> bool {
        self.ssid.is_some()
            || self.bssid.is_some()
            || self.signal_dbm.is_some()
            || self.noise_dbm.is_some()
            || self.channel.is_some()
            || self.band.is_some()
            || self.link_rate_mbps.is_some()
    }

    /// Classify the frequency band for a channel number.
    ///
    /// Channels above 14 belong to the 5 GHz family; everything else is
    /// 2.4 GHz.
    pub fn band_for_channel(channel: u32) -> &'static str {
        if channel > 14 {
            "5 GHz"
        } else {
            "2.4 GHz"
        }
    }
}

/// Round-trip statistics from a single ping run against one target.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PingStats {
    /// Average round-trip time in milliseconds
    pub avg_ms: Option<f64>,

    /// Round-trip standard deviation, used as a jitter proxy
    pub jitter_ms: Option<f64>,

    /// Packet loss percentage (0-100). `Some(0.0)` means measured zero
    /// loss and must stay distinguishable from `None` (unknown).
    pub loss_pct: Option<f64>,
}

impl PingStats {
    /// Create statistics with every field unknown
    pub fn empty() -> Self {
        Self::default()
    }
}

/// DNS lookup timing extracted from the lookup utility.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DnsLookupTiming {
    /// Query time in milliseconds
    pub lookup_ms: Option<u64>,
}

/// Throughput test results, normalized to Mbps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpeedTestResult {
    /// Download throughput in Mbps
    pub download_mbps: Option<u64>,

    /// Upload throughput in Mbps
    pub upload_mbps: Option<u64>,

    /// Responsiveness in round-trips per minute
    pub responsiveness_rpm: Option<u64>,

    /// Baseline round-trip time in milliseconds
    pub base_rtt_ms: Option<f64>,

    /// Interface the test ran over, echoed verbatim
    pub interface_name: Option<String>,

    /// Test endpoint host, echoed verbatim
    pub endpoint: Option<String>,

    /// Test start timestamp as reported by the tool
    pub started_at: Option<String>,

    /// Test end timestamp as reported by the tool
    pub finished_at: Option<String>,

    /// OS version string as reported by the tool
    pub os_version: Option<String>,
}

/// Value types that can tell whether any of their mandatory metrics
/// were actually measured.
pub trait Measured {
    /// True when at least one mandatory numeric field is populated
    fn has_data(&self) -> bool;
}

impl Measured for PingStats {
    fn has_data(&self) -> bool {
        self.avg_ms.is_some() || self.jitter_ms.is_some() || self.loss_pct.is_some()
    }
}

impl Measured for DnsLookupTiming {
    fn has_data(&self) -> bool {
        self.lookup_ms.is_some()
    }
}

impl Measured for SpeedTestResult {
    fn has_data(&self) -> bool {
        self.download_mbps.is_some()
            || self.upload_mbps.is_some()
            || self.responsiveness_rpm.is_some()
            || self.base_rtt_ms.is_some()
    }
}

/// Generic probe result wrapper.
///
/// `error` and populated metrics are not mutually exclusive: a ping run
/// can exit non-zero (partial loss) and still produce valid statistics,
/// in which case the statistics are kept and the process error is
/// carried alongside as an advisory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeOutcome<T> {
    /// Parsed value, possibly with only some fields populated
    pub value: T,

    /// Error reported by the underlying process, if any
    pub error: Option<String>,
}

impl<T> ProbeOutcome<T> {
    /// Wrap a value with no error
    pub fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    /// Wrap a value together with an error string
    pub fn with_error<S: Into<String>>(value: T, error: S) -> Self {
        Self {
            value,
            error: Some(error.into()),
        }
    }
}

impl<T: Measured> ProbeOutcome<T> {
    /// A probe failed when it carries an error or when none of its
    /// mandatory metrics could be measured.
    pub fn is_failure(&self) -> bool {
        self.error.is_some() || !self.value.has_data()
    }
}

/// One ping probe with its target and sample count echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct PingCheck {
    /// Address that was pinged, `None` when no target could be resolved
    pub target: Option<String>,

    /// Requested sample count
    pub samples: u32,

    /// Parsed statistics plus any process error
    pub outcome: ProbeOutcome<PingStats>,
}

impl PingCheck {
    /// Build a check that never ran because no target address existed
    pub fn no_target(samples: u32, reason: &str) -> Self {
        Self {
            target: None,
            samples,
            outcome: ProbeOutcome::with_error(PingStats::empty(), reason),
        }
    }

    /// True when the check failed outright
    pub fn is_failure(&self) -> bool {
        self.target.is_none() || self.outcome.is_failure()
    }
}

/// Where the DNS server used for the lookup probe came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DnsServerSource {
    /// Read from system DNS configuration
    Discovered,
    /// Supplied explicitly by the user
    Override,
    /// No server known; the lookup used the resolver default
    SystemDefault,
}

/// DNS server discovery plus lookup timing.
#[derive(Debug, Clone, Serialize)]
pub struct DnsCheck {
    /// Nameserver address the lookup targeted, if known
    pub server: Option<String>,

    /// Classification of where `server` came from
    pub source: DnsServerSource,

    /// Lookup timing outcome
    pub lookup: ProbeOutcome<DnsLookupTiming>,
}

impl DnsCheck {
    /// True when either discovery or the lookup itself failed
    pub fn is_failure(&self) -> bool {
        self.server.is_none() || self.lookup.is_failure()
    }
}

/// Default gateway discovery plus the ping run against it.
#[derive(Debug, Clone, Serialize)]
pub struct RouterCheck {
    /// Default gateway address, `None` when discovery found nothing
    pub gateway: Option<String>,

    /// Ping statistics against the gateway (or the user override)
    pub ping: PingCheck,
}

impl RouterCheck {
    /// True when gateway discovery or the router ping failed
    pub fn is_failure(&self) -> bool {
        self.gateway.is_none() || self.ping.is_failure()
    }
}

/// Collection run metadata echoed into the report.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionMeta {
    /// Ping sample count used for both ping probes
    pub sample_count: u32,

    /// Internet ping target host
    pub internet_host: String,

    /// DNS lookup hostname
    pub lookup_host: String,

    /// Wall-clock time the whole collection took, in milliseconds
    pub elapsed_ms: u64,
}

/// The complete single-run diagnostic report.
///
/// Always fully constructed: an individual probe failure shows up as a
/// null field or an error-carrying outcome, never as a missing report.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    /// When this report was generated
    pub generated_at: DateTime<Utc>,

    /// Wi-Fi radio state, `None` when both sources failed
    pub wifi: Option<WifiState>,

    /// Gateway discovery and router reachability
    pub router: RouterCheck,

    /// Internet reachability
    pub internet: PingCheck,

    /// DNS server discovery and lookup latency
    pub dns: DnsCheck,

    /// Throughput test, present only when requested
    pub speed_test: Option<ProbeOutcome<SpeedTestResult>>,

    /// Collection metadata
    pub meta: CollectionMeta,
}

impl DiagnosticReport {
    /// Overall failure signal: true when any mandatory probe is absent
    /// or error-carrying, or when a requested speed test failed.
    pub fn had_error(&self) -> bool {
        let wifi_failed = match &self.wifi {
            Some(state) => !state.has_data(),
            None => true,
        };
        let speed_failed = self
            .speed_test
            .as_ref()
            .map(|outcome| outcome.is_failure())
            .unwrap_or(false);

        wifi_failed
            || self.router.is_failure()
            || self.internet.is_failure()
            || self.dns.is_failure()
            || speed_failed
    }
}
