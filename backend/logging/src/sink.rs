//! The logging sink seam.
//!
//! `emit` is synchronous and never fails: implementations hand the event off
//! and return, so a slow or dead webhook cannot hold up an invocation.

use std::sync::{Arc, Mutex};

use crate::event::{LogDestination, LogEvent};

/// Best-effort, non-blocking log delivery.
pub trait LogSink: Send + Sync {
    fn emit(&self, event: LogEvent);
}

/// Discards every event. Used when no webhook is configured at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn emit(&self, event: LogEvent) {
        tracing::trace!(destination = ?event.destination, "Dropping log event (no sink)");
    }
}

/// Records events in memory, in emission order.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn count(&self, destination: LogDestination) -> usize {
        self.events()
            .iter()
            .filter(|e| e.destination == destination)
            .count()
    }
}

impl LogSink for MemorySink {
    fn emit(&self, event: LogEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_keeps_order_and_counts() {
        let sink = MemorySink::new();
        sink.emit(LogEvent::interaction("first"));
        sink.emit(LogEvent::error("second"));
        sink.emit(LogEvent::interaction("third"));

        let texts: Vec<_> = sink.events().into_iter().map(|e| e.text).collect();
        assert_eq!(texts, ["first", "second", "third"]);
        assert_eq!(sink.count(LogDestination::Interaction), 2);
        assert_eq!(sink.count(LogDestination::Error), 1);
    }

    #[test]
    fn clones_share_storage() {
        let sink = MemorySink::new();
        let handle = sink.clone();
        sink.emit(LogEvent::interaction("x"));
        assert_eq!(handle.events().len(), 1);
    }
}
