//! Log events mirrored to the external webhook destinations.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::redact::redact_sensitive_data;

/// Platform limit on message content, shared by webhook posts and replies.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Which configured webhook receives an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogDestination {
    Interaction,
    Error,
}

/// A single text line bound for one log destination. Delivered at most once.
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub destination: LogDestination,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    pub fn interaction(text: impl Into<String>) -> Self {
        Self {
            destination: LogDestination::Interaction,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Error text is redacted on construction so secrets echoed by remote
    /// errors never leave the process.
    pub fn error(text: impl AsRef<str>) -> Self {
        Self {
            destination: LogDestination::Error,
            text: redact_sensitive_data(text.as_ref()),
            timestamp: Utc::now(),
        }
    }
}

/// Cut `text` to at most `MAX_MESSAGE_CHARS` characters, marking the cut with `…`.
pub fn truncate_message(text: &str) -> String {
    if text.chars().count() <= MAX_MESSAGE_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_MESSAGE_CHARS - 1).collect();
    out.push('…');
    out
}
