//! Data models for netpulse

pub mod report;

pub use report::{
    CollectionMeta, DiagnosticReport, DnsCheck, DnsLookupTiming, DnsServerSource, Measured,
    PingCheck, PingStats, ProbeOutcome, RouterCheck, SpeedTestResult, WifiState,
};
