//! Log Redaction Layer
//!
//! Scrubs API keys and access tokens from strings before they are mirrored
//! to a webhook. Remote HTTP errors routinely echo the request URL, which for
//! the grammar API carries the key as a query parameter.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9_\-]{20,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap()
});
static QUERY_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([?&](?:key|api_key|apikey|token)=)[^&\s)]+").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]");
    QUERY_KEY_RE
        .replace_all(&redacted, "${1}[REDACTED]")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redaction() {
        let raw = "Sending with Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"));
        assert!(clean.contains("[REDACTED_TOKEN]"));
    }

    #[test]
    fn query_keys_are_masked() {
        let raw = "error sending request for url (https://api.textgears.com/grammar?text=hi&key=abc123)";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("abc123"));
        assert!(clean.contains("text=hi&key=[REDACTED])"));
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(redact_sensitive_data("no secrets here"), "no secrets here");
    }
}
