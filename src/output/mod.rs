//! Report rendering
//!
//! Every field that could not be determined renders as an explicit
//! `n/a`, never as a silently omitted line: readers must be able to tell
//! "measured zero" apart from "not measured".

use crate::error::Result;
use crate::models::{DiagnosticReport, DnsServerSource, PingCheck, ProbeOutcome};
use colored::Colorize;
use std::fmt::Write as _;

/// Trait for rendering a diagnostic report as text
pub trait ReportFormatter {
    /// Render the full report
    fn format_report(&self, report: &DiagnosticReport) -> String;
}

/// Plain text formatter without ANSI colors
pub struct PlainFormatter;

/// Colored terminal formatter
pub struct ColoredFormatter;

/// Pick a formatter based on the color setting
pub fn formatter_for(enable_color: bool) -> Box<dyn ReportFormatter> {
    if enable_color {
        Box::new(ColoredFormatter)
    } else {
        Box::new(PlainFormatter)
    }
}

/// Render the report as pretty-printed JSON
pub fn render_json(report: &DiagnosticReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

const NA: &str = "n/a";

fn fmt_opt_str(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| NA.to_string())
}

fn fmt_opt_ms(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1} ms", v))
        .unwrap_or_else(|| NA.to_string())
}

fn fmt_opt_pct(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}%", v))
        .unwrap_or_else(|| NA.to_string())
}

fn fmt_opt_num<T: std::fmt::Display>(value: Option<T>, unit: &str) -> String {
    value
        .map(|v| format!("{} {}", v, unit))
        .unwrap_or_else(|| NA.to_string())
}

fn ping_lines(out: &mut String, check: &PingCheck) {
    let stats = &check.outcome.value;
    let _ = writeln!(out, "  target:   {}", fmt_opt_str(&check.target));
    let _ = writeln!(out, "  latency:  {}", fmt_opt_ms(stats.avg_ms));
    let _ = writeln!(out, "  jitter:   {}", fmt_opt_ms(stats.jitter_ms));
    let _ = writeln!(out, "  loss:     {}", fmt_opt_pct(stats.loss_pct));
    if let Some(error) = &check.outcome.error {
        let _ = writeln!(out, "  error:    {}", error);
    }
}

fn render(report: &DiagnosticReport, color: bool) -> String {
    let mut out = String::new();

    let header = |text: &str| {
        if color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    };
    let status = |failed: bool| {
        if color {
            if failed {
                "FAIL".red().bold().to_string()
            } else {
                "OK".green().bold().to_string()
            }
        } else if failed {
            "FAIL".to_string()
        } else {
            "OK".to_string()
        }
    };

    let _ = writeln!(
        out,
        "{} ({})",
        header("Network Health Report"),
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out);

    // Wi-Fi
    match &report.wifi {
        Some(wifi) => {
            let _ = writeln!(out, "{} [{}]", header("Wi-Fi"), status(!wifi.has_data()));
            let _ = writeln!(out, "  ssid:     {}", fmt_opt_str(&wifi.ssid));
            let _ = writeln!(out, "  bssid:    {}", fmt_opt_str(&wifi.bssid));
            let _ = writeln!(
                out,
                "  signal:   {} / noise {}",
                fmt_opt_num(wifi.signal_dbm, "dBm"),
                fmt_opt_num(wifi.noise_dbm, "dBm")
            );
            let channel = wifi
                .channel
                .map(|c| c.to_string())
                .unwrap_or_else(|| NA.to_string());
            let _ = writeln!(
                out,
                "  channel:  {} ({})",
                channel,
                wifi.band.as_deref().unwrap_or(NA)
            );
            let _ = writeln!(
                out,
                "  tx rate:  {}",
                fmt_opt_num(wifi.link_rate_mbps, "Mbps")
            );
        }
        None => {
            let _ = writeln!(out, "{} [{}]", header("Wi-Fi"), status(true));
            let _ = writeln!(out, "  state:    {}", NA);
        }
    }
    let _ = writeln!(out);

    // Router
    let _ = writeln!(
        out,
        "{} [{}]",
        header("Router"),
        status(report.router.is_failure())
    );
    let _ = writeln!(out, "  gateway:  {}", fmt_opt_str(&report.router.gateway));
    ping_lines(&mut out, &report.router.ping);
    let _ = writeln!(out);

    // Internet
    let _ = writeln!(
        out,
        "{} [{}]",
        header("Internet"),
        status(report.internet.is_failure())
    );
    ping_lines(&mut out, &report.internet);
    let _ = writeln!(out);

    // DNS
    let _ = writeln!(out, "{} [{}]", header("DNS"), status(report.dns.is_failure()));
    let source = match report.dns.source {
        DnsServerSource::Discovered => "discovered",
        DnsServerSource::Override => "override",
        DnsServerSource::SystemDefault => "system default",
    };
    let _ = writeln!(
        out,
        "  server:   {} ({})",
        fmt_opt_str(&report.dns.server),
        source
    );
    let _ = writeln!(
        out,
        "  lookup:   {}",
        fmt_opt_num(report.dns.lookup.value.lookup_ms, "ms")
    );
    if let Some(error) = &report.dns.lookup.error {
        let _ = writeln!(out, "  error:    {}", error);
    }

    // Speed test
    if let Some(speed) = &report.speed_test {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} [{}]",
            header("Speed Test"),
            status(speed.is_failure())
        );
        speed_lines(&mut out, speed);
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} samples per ping, collected in {} ms, overall: {}",
        report.meta.sample_count,
        report.meta.elapsed_ms,
        status(report.had_error())
    );

    out
}

fn speed_lines(out: &mut String, speed: &ProbeOutcome<crate::models::SpeedTestResult>) {
    let value = &speed.value;
    let _ = writeln!(out, "  download: {}", fmt_opt_num(value.download_mbps, "Mbps"));
    let _ = writeln!(out, "  upload:   {}", fmt_opt_num(value.upload_mbps, "Mbps"));
    let _ = writeln!(
        out,
        "  rpm:      {}",
        fmt_opt_num(value.responsiveness_rpm, "round-trips/min")
    );
    let _ = writeln!(out, "  base rtt: {}", fmt_opt_ms(value.base_rtt_ms));
    let _ = writeln!(out, "  iface:    {}", fmt_opt_str(&value.interface_name));
    let _ = writeln!(out, "  endpoint: {}", fmt_opt_str(&value.endpoint));
    if let Some(error) = &speed.error {
        let _ = writeln!(out, "  error:    {}", error);
    }
}

impl ReportFormatter for PlainFormatter {
    fn format_report(&self, report: &DiagnosticReport) -> String {
        render(report, false)
    }
}

impl ReportFormatter for ColoredFormatter {
    fn format_report(&self, report: &DiagnosticReport) -> String {
        render(report, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CollectionMeta, DiagnosticReport, DnsCheck, DnsLookupTiming, PingCheck, PingStats,
        RouterCheck, WifiState,
    };
    use chrono::Utc;

    fn empty_report() -> DiagnosticReport {
        DiagnosticReport {
            generated_at: Utc::now(),
            wifi: None,
            router: RouterCheck {
                gateway: None,
                ping: PingCheck::no_target(5, "no target address available"),
            },
            internet: PingCheck {
                target: Some("8.8.8.8".to_string()),
                samples: 5,
                outcome: ProbeOutcome::with_error(PingStats::empty(), "ping failed"),
            },
            dns: DnsCheck {
                server: None,
                source: DnsServerSource::SystemDefault,
                lookup: ProbeOutcome::with_error(DnsLookupTiming::default(), "dig failed"),
            },
            speed_test: None,
            meta: CollectionMeta {
                sample_count: 5,
                internet_host: "8.8.8.8".to_string(),
                lookup_host: "google.com".to_string(),
                elapsed_ms: 12,
            },
        }
    }

    #[test]
    fn test_unknown_fields_render_as_na() {
        let text = PlainFormatter.format_report(&empty_report());
        assert!(text.contains("n/a"));
        assert!(text.contains("FAIL"));
        // Errors are surfaced, not swallowed
        assert!(text.contains("ping failed"));
        assert!(text.contains("dig failed"));
    }

    #[test]
    fn test_measured_zero_distinct_from_unknown() {
        let mut report = empty_report();
        report.internet.outcome = ProbeOutcome::ok(PingStats {
            avg_ms: Some(10.0),
            jitter_ms: None,
            loss_pct: Some(0.0),
        });
        let text = PlainFormatter.format_report(&report);
        assert!(text.contains("loss:     0.0%"));
        assert!(text.contains("jitter:   n/a"));
    }

    #[test]
    fn test_wifi_section_renders_values() {
        let mut report = empty_report();
        report.wifi = Some(WifiState {
            ssid: Some("MyHome".to_string()),
            channel: Some(48),
            band: Some("5 GHz".to_string()),
            signal_dbm: Some(-51),
            ..WifiState::empty()
        });
        let text = PlainFormatter.format_report(&report);
        assert!(text.contains("MyHome"));
        assert!(text.contains("5 GHz"));
        assert!(text.contains("-51 dBm"));
    }

    #[test]
    fn test_json_rendering() {
        let json = render_json(&empty_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["wifi"].is_null());
        assert_eq!(value["dns"]["source"], "system_default");
    }

    #[test]
    fn test_colored_formatter_keeps_content() {
        let text = ColoredFormatter.format_report(&empty_report());
        assert!(text.contains("gateway:"));
    }
}
