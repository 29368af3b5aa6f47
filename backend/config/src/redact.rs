//! Config redaction: produce safe-to-display config snapshots by masking
//! tokens, API keys and webhook URLs (a webhook URL embeds its own secret).

use serde_json::Value;

static SENSITIVE_KEYS: &[&str] = &[
    "token",
    "apiKey",
    "api_key",
    "openaiApiKey",
    "textGearsApiKey",
    "interactionWebhookUrl",
    "errorWebhookUrl",
    "secret",
    "password",
];

/// Redact a config JSON value, replacing sensitive strings with a short hint.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_sensitive_key(key) && !s.is_empty() => {
            // Preserve a length hint: first 4 chars + ***
            let hint = if s.chars().count() > 4 {
                format!("{}***", s.chars().take(4).collect::<String>())
            } else {
                "***".to_string()
            };
            Value::String(hint)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                result.insert(k.clone(), redact_recursive(v, k));
            }
            Value::Object(result)
        }
        other => other.clone(),
    }
}
