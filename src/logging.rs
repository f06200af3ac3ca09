//! Structured probe event logging
//!
//! Probes report their lifecycle (started, succeeded, fell back, failed)
//! through an injected [`EventSink`] rather than global state, so they
//! stay testable in isolation and sinks are swappable: colored stderr
//! for interactive runs, JSON lines for debug mode, a no-op sink for
//! quiet runs, and an in-memory sink for tests.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Log level for emitted events
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum LogLevel {
    /// Detailed information for debugging
    Debug = 0,
    /// General lifecycle information
    Info = 1,
    /// Potentially harmful situations
    Warn = 2,
    /// Probe failures
    Error = 3,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Get ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Debug => "\x1b[36m", // Cyan
            LogLevel::Info => "\x1b[32m",  // Green
            LogLevel::Warn => "\x1b[33m",  // Yellow
            LogLevel::Error => "\x1b[31m", // Red
        }
    }

    /// Reset ANSI color code
    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

/// Probe lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbePhase {
    /// Probe dispatched
    Started,
    /// Probe produced a usable value
    Succeeded,
    /// Primary source failed, trying the next one
    FellBack,
    /// Probe produced no usable value
    Failed,
}

/// One structured probe lifecycle event
#[derive(Debug, Clone, Serialize)]
pub struct ProbeEvent {
    /// When the event was emitted
    pub timestamp: DateTime<Utc>,
    /// Event severity
    pub level: LogLevel,
    /// Probe name (wifi, gateway, ping, dns, speedtest, ...)
    pub probe: String,
    /// Lifecycle phase
    pub phase: ProbePhase,
    /// Human-readable detail
    pub message: String,
    /// Correlation ID shared by every event of one run
    pub session_id: Uuid,
}

/// Sink capability for probe events
pub trait EventSink: Send + Sync {
    /// Consume one event
    fn emit(&self, event: &ProbeEvent);
}

/// Sink output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    /// Human-readable console format
    Console,
    /// JSON lines for structured consumption
    Json,
}

/// Stderr sink with level filtering and console/JSON formatting
pub struct StderrSink {
    min_level: LogLevel,
    use_color: bool,
    format: LogFormat,
}

impl StderrSink {
    /// Create a stderr sink
    pub fn new(min_level: LogLevel, use_color: bool, format: LogFormat) -> Self {
        Self {
            min_level,
            use_color,
            format,
        }
    }

    fn format_console(&self, event: &ProbeEvent) -> String {
        let level = if self.use_color {
            format!(
                "{}{}{}",
                event.level.color_code(),
                event.level.as_str(),
                LogLevel::reset_code()
            )
        } else {
            event.level.as_str().to_string()
        };

        format!(
            "{} [{}] {} {:?}: {}",
            event.timestamp.format("%H:%M:%S%.3f"),
            level,
            event.probe,
            event.phase,
            event.message
        )
    }
}

impl EventSink for StderrSink {
    fn emit(&self, event: &ProbeEvent) {
        if event.level < self.min_level {
            return;
        }

        let line = match self.format {
            LogFormat::Console => self.format_console(event),
            LogFormat::Json => {
                serde_json::to_string(event).unwrap_or_else(|_| self.format_console(event))
            }
        };

        // Diagnostics go to stderr so stdout stays clean for the report
        let _ = writeln!(io::stderr(), "{}", line);
    }
}

/// Sink that discards every event
#[derive(Debug, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: &ProbeEvent) {}
}

/// Sink that records events in memory, for assertions in tests
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ProbeEvent>>,
}

impl MemorySink {
    /// Create an empty memory sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded event
    pub fn events(&self) -> Vec<ProbeEvent> {
        self.events.lock().expect("event log poisoned").clone()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: &ProbeEvent) {
        self.events
            .lock()
            .expect("event log poisoned")
            .push(event.clone());
    }
}

/// Handle passed into probes for emitting lifecycle events.
///
/// Cloneable; every clone shares the sink and the run's session ID.
#[derive(Clone)]
pub struct EventLog {
    sink: Arc<dyn EventSink>,
    session_id: Uuid,
}

impl EventLog {
    /// Create an event log over a sink with a fresh session ID
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self {
            sink,
            session_id: Uuid::new_v4(),
        }
    }

    /// Create an event log that discards everything
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopSink))
    }

    /// Session correlation ID for this run
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Record that a probe was dispatched
    pub fn probe_started(&self, probe: &str, message: impl Into<String>) {
        self.emit(LogLevel::Debug, probe, ProbePhase::Started, message.into());
    }

    /// Record that a probe produced a usable value
    pub fn probe_succeeded(&self, probe: &str, message: impl Into<String>) {
        self.emit(LogLevel::Info, probe, ProbePhase::Succeeded, message.into());
    }

    /// Record that a probe source failed and the next one is being tried
    pub fn probe_fell_back(&self, probe: &str, message: impl Into<String>) {
        self.emit(LogLevel::Warn, probe, ProbePhase::FellBack, message.into());
    }

    /// Record that a probe produced no usable value
    pub fn probe_failed(&self, probe: &str, message: impl Into<String>) {
        self.emit(LogLevel::Error, probe, ProbePhase::Failed, message.into());
    }

    fn emit(&self, level: LogLevel, probe: &str, phase: ProbePhase, message: String) {
        self.sink.emit(&ProbeEvent {
            timestamp: Utc::now(),
            level,
            probe: probe.to_string(),
            phase,
            message,
            session_id: self.session_id,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_memory_sink_records_events() {
        let sink = Arc::new(MemorySink::new());
        let log = EventLog::new(sink.clone());

        log.probe_started("wifi", "running airport -I");
        log.probe_fell_back("wifi", "airport failed, trying system_profiler");
        log.probe_failed("wifi", "no source produced data");

        let events = sink.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].phase, ProbePhase::Started);
        assert_eq!(events[1].phase, ProbePhase::FellBack);
        assert_eq!(events[1].level, LogLevel::Warn);
        assert_eq!(events[2].level, LogLevel::Error);
    }

    #[test]
    fn test_events_share_session_id() {
        let sink = Arc::new(MemorySink::new());
        let log = EventLog::new(sink.clone());

        log.probe_started("gateway", "querying default route");
        log.probe_succeeded("gateway", "192.168.1.1");

        let events = sink.events();
        assert_eq!(events[0].session_id, events[1].session_id);
        assert_eq!(events[0].session_id, log.session_id());
    }

    #[test]
    fn test_event_serializes_to_json() {
        let sink = Arc::new(MemorySink::new());
        let log = EventLog::new(sink.clone());
        log.probe_succeeded("dns", "nameserver 1.1.1.1");

        let json = serde_json::to_value(&sink.events()[0]).expect("event must serialize");
        assert_eq!(json["probe"], "dns");
        assert_eq!(json["phase"], "succeeded");
    }

    #[test]
    fn test_disabled_log_does_not_panic() {
        let log = EventLog::disabled();
        log.probe_started("ping", "5 samples to 8.8.8.8");
        log.probe_failed("ping", "timed out");
    }
}
