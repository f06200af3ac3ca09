//! Data-collection probes
//!
//! One async function per data source. Each probe composes the command
//! runner with its parser, emits structured lifecycle events through the
//! injected [`EventLog`](crate::logging::EventLog), and captures every
//! failure as data instead of propagating it: no probe failure can abort
//! the others or the overall run.

pub mod dns;
pub mod gateway;
pub mod ping;
pub mod speedtest;
pub mod wifi;

pub use dns::{lookup_timing, system_dns_server};
pub use gateway::default_gateway;
pub use ping::ping_host;
pub use speedtest::speed_test;
pub use wifi::{wifi_state, AIRPORT_PATH};
