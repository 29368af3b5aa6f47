//! Parley configuration schema.
//!
//! Keys are camelCase so an existing `config.json` with `token`, `guildId`,
//! `openaiApiKey`, `textGearsApiKey`, the two webhook URLs, `owner` and
//! `githubUrl` deserializes unchanged.

use parley_core::ParleyError;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::defaults::{
    DEFAULT_COMPLETION_BASE_URL, DEFAULT_COMPLETION_MAX_TOKENS, DEFAULT_COMPLETION_MODEL,
    DEFAULT_GRAMMAR_BASE_URL, DEFAULT_LANG_PAIR, DEFAULT_LOG_LEVEL, DEFAULT_TRANSLATION_BASE_URL,
};

/// Root configuration. Loaded once, then shared read-only behind an `Arc`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParleyConfig {
    /// Chat-platform bot token
    #[serde(default)]
    pub token: String,

    /// Deployment target (guild) the commands are registered to
    #[serde(default, deserialize_with = "string_or_number")]
    pub guild_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_gears_api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_webhook_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_webhook_url: Option<String>,

    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub github_url: String,

    /// Overrides the platform username in `/info`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_name: Option<String>,

    #[serde(default)]
    pub completion: CompletionConfig,

    #[serde(default)]
    pub grammar: GrammarConfig,

    #[serde(default)]
    pub translation: TranslationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ParleyConfig {
    /// The deployment target as a platform snowflake.
    pub fn guild_id(&self) -> Result<u64, ParleyError> {
        match self.guild_id.trim().parse::<u64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(ParleyError::Config(format!(
                "guildId must be a non-zero integer, got {:?}",
                self.guild_id
            ))),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Remote API sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Generation-length cap for `/ask`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl CompletionConfig {
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_COMPLETION_MODEL)
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_COMPLETION_MAX_TOKENS)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_COMPLETION_BASE_URL)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl GrammarConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_GRAMMAR_BASE_URL)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Source|target pair, e.g. `auto|en`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang_pair: Option<String>,
}

impl TranslationConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_TRANSLATION_BASE_URL)
    }

    pub fn lang_pair(&self) -> &str {
        self.lang_pair.as_deref().unwrap_or(DEFAULT_LANG_PAIR)
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling JSON log files; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn guild_id_accepts_number_or_string() {
        let a: ParleyConfig = serde_json::from_value(json!({"guildId": 42})).unwrap();
        let b: ParleyConfig = serde_json::from_value(json!({"guildId": "42"})).unwrap();
        assert_eq!(a.guild_id().unwrap(), 42);
        assert_eq!(b.guild_id().unwrap(), 42);
    }

    #[test]
    fn zero_or_garbage_guild_id_is_rejected() {
        let zero: ParleyConfig = serde_json::from_value(json!({"guildId": 0})).unwrap();
        let junk: ParleyConfig = serde_json::from_value(json!({"guildId": "abc"})).unwrap();
        assert!(zero.guild_id().is_err());
        assert!(junk.guild_id().is_err());
    }

    #[test]
    fn section_getters_fall_back_to_defaults() {
        let config = ParleyConfig::default();
        assert_eq!(config.completion.max_tokens(), 150);
        assert_eq!(config.translation.lang_pair(), "auto|en");
        assert_eq!(config.logging.level(), "info");
    }

    #[test]
    fn overrides_are_respected() {
        let config: ParleyConfig = serde_json::from_value(json!({
            "completion": {"model": "local", "maxTokens": 64, "baseUrl": "http://llm"}
        }))
        .unwrap();
        assert_eq!(config.completion.model(), "local");
        assert_eq!(config.completion.max_tokens(), 64);
        assert_eq!(config.completion.base_url(), "http://llm");
    }
}
