//! Observability: structured logging and store metrics
//!
//! - `Logger` writes one JSON object per line
//! - `Event` names every lifecycle and request event
//! - `StoreMetrics` counts store round trips
//!
//! # Usage
//!
//! ```ignore
//! use roster::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::SearchServed, &[("rows", "2"), ("total", "4")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, StoreMetrics};

/// Log an event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log an event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        log_event(Event::BootStart);
        log_event_with_fields(Event::ConfigLoaded, &[("path", "/tmp/roster.json")]);
    }
}
