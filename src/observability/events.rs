//! Lifecycle and request events

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    BootStart,
    ConfigLoaded,
    SeedComplete,
    ServerListening,
    ShutdownComplete,

    // Requests
    /// Search answered
    SearchServed,
    /// Search refused by validation or the store
    SearchRejected,
    BulkUpdateApplied,
    BulkDeleteApplied,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "ROSTER_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SeedComplete => "SEED_COMPLETE",
            Event::ServerListening => "SERVER_LISTENING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::SearchServed => "SEARCH_SERVED",
            Event::SearchRejected => "SEARCH_REJECTED",
            Event::BulkUpdateApplied => "BULK_UPDATE_APPLIED",
            Event::BulkDeleteApplied => "BULK_DELETE_APPLIED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::SearchRejected => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
