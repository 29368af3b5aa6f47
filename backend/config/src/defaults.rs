//! Config defaults: applies default values to a parsed config so the
//! effective settings are visible when the config is displayed.

use crate::schema::ParleyConfig;

pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo-instruct";

/// Generation-length cap for `/ask` (tokens).
pub const DEFAULT_COMPLETION_MAX_TOKENS: u32 = 150;

pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_GRAMMAR_BASE_URL: &str = "https://api.textgears.com";
pub const DEFAULT_TRANSLATION_BASE_URL: &str = "https://api.mymemory.translated.net";
pub const DEFAULT_LANG_PAIR: &str = "auto|en";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: ParleyConfig) -> ParleyConfig {
    let config = apply_completion_defaults(config);
    let config = apply_remote_defaults(config);
    apply_logging_defaults(config)
}

fn apply_completion_defaults(mut config: ParleyConfig) -> ParleyConfig {
    let completion = &mut config.completion;
    completion
        .model
        .get_or_insert_with(|| DEFAULT_COMPLETION_MODEL.to_string());
    completion.max_tokens.get_or_insert(DEFAULT_COMPLETION_MAX_TOKENS);
    completion
        .base_url
        .get_or_insert_with(|| DEFAULT_COMPLETION_BASE_URL.to_string());
    config
}

fn apply_remote_defaults(mut config: ParleyConfig) -> ParleyConfig {
    config
        .grammar
        .base_url
        .get_or_insert_with(|| DEFAULT_GRAMMAR_BASE_URL.to_string());
    config
        .translation
        .base_url
        .get_or_insert_with(|| DEFAULT_TRANSLATION_BASE_URL.to_string());
    config
        .translation
        .lang_pair
        .get_or_insert_with(|| DEFAULT_LANG_PAIR.to_string());
    config
}

fn apply_logging_defaults(mut config: ParleyConfig) -> ParleyConfig {
    config
        .logging
        .level
        .get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_unset_field() {
        let config = apply_all_defaults(ParleyConfig::default());
        assert_eq!(config.completion.model.as_deref(), Some(DEFAULT_COMPLETION_MODEL));
        assert_eq!(config.completion.max_tokens, Some(150));
        assert_eq!(config.grammar.base_url.as_deref(), Some(DEFAULT_GRAMMAR_BASE_URL));
        assert_eq!(config.translation.lang_pair.as_deref(), Some("auto|en"));
        assert_eq!(config.logging.level.as_deref(), Some("info"));
    }

    #[test]
    fn keeps_explicit_values() {
        let mut config = ParleyConfig::default();
        config.completion.max_tokens = Some(10);
        let config = apply_all_defaults(config);
        assert_eq!(config.completion.max_tokens, Some(10));
    }
}
