//! Diagnostics and webhook log delivery for Parley.
//!
//! Two separate concerns live here: the local `tracing` subscriber (console
//! plus optional rolling NDJSON file), and the logging sink that mirrors
//! interaction and error events to external webhooks.

pub mod event;
pub mod logger;
pub mod redact;
pub mod sink;
pub mod webhook;

pub use event::{LogDestination, LogEvent, MAX_MESSAGE_CHARS, truncate_message};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
pub use sink::{LogSink, MemorySink, NullSink};
pub use webhook::WebhookSink;
