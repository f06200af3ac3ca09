//! Probe aggregation
//!
//! Fires the independent probes concurrently in two waves and folds
//! every result, including failures, into one [`DiagnosticReport`].
//! Wave one runs the lookups with no inter-dependency (Wi-Fi, gateway,
//! DNS server discovery). Wave two runs the probes that consume wave
//! one's addresses (router ping, DNS lookup) together with the remaining
//! independent ones (internet ping, optional speed test). All waits are
//! joins: a slow probe never cancels a faster one, and there is no
//! partial-result early return.

use crate::config::Config;
use crate::logging::EventLog;
use crate::models::{
    CollectionMeta, DiagnosticReport, DnsCheck, DnsServerSource, RouterCheck,
};
use crate::probes;
use crate::runner::CommandRunner;
use chrono::Utc;
use std::time::Instant;

/// Run the full collection and build the report.
///
/// Never fails: every probe failure is captured as data in the report.
pub async fn collect(
    config: &Config,
    runner: &dyn CommandRunner,
    log: &EventLog,
) -> DiagnosticReport {
    let started = Instant::now();
    let generated_at = Utc::now();
    let limit = config.probe_timeout();

    // Wave one: independent discovery lookups
    let gateway_fut = async {
        match &config.router_override {
            Some(addr) => Some(addr.clone()),
            None => probes::default_gateway(runner, log, limit).await,
        }
    };
    let dns_server_fut = async {
        match &config.dns_server_override {
            Some(addr) => (Some(addr.clone()), DnsServerSource::Override),
            None => match probes::system_dns_server(runner, log, limit).await {
                Some(addr) => (Some(addr), DnsServerSource::Discovered),
                None => (None, DnsServerSource::SystemDefault),
            },
        }
    };

    let (wifi, gateway, (dns_server, dns_source)) = tokio::join!(
        probes::wifi_state(runner, log, limit),
        gateway_fut,
        dns_server_fut,
    );

    // Wave two: probes parameterized by wave one, plus the remaining
    // independent ones
    let router_ping_fut = probes::ping_host(
        runner,
        log,
        limit,
        "ping-router",
        gateway.as_deref(),
        config.sample_count,
    );
    let internet_ping_fut = probes::ping_host(
        runner,
        log,
        limit,
        "ping-internet",
        Some(config.internet_host.as_str()),
        config.sample_count,
    );
    let lookup_fut = probes::lookup_timing(
        runner,
        log,
        limit,
        &config.lookup_host,
        dns_server.as_deref(),
    );
    let speed_fut = async {
        if config.run_speed_test {
            Some(probes::speed_test(runner, log, config.speed_test_timeout()).await)
        } else {
            None
        }
    };

    let (router_ping, internet_ping, lookup, speed_test) =
        tokio::join!(router_ping_fut, internet_ping_fut, lookup_fut, speed_fut);

    DiagnosticReport {
        generated_at,
        wifi,
        router: RouterCheck {
            gateway,
            ping: router_ping,
        },
        internet: internet_ping,
        dns: DnsCheck {
            server: dns_server,
            source: dns_source,
            lookup,
        },
        speed_test,
        meta: CollectionMeta {
            sample_count: config.sample_count,
            internet_host: config.internet_host.clone(),
            lookup_host: config.lookup_host.clone(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        },
    }
}
