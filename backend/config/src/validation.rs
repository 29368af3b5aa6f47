//! Config validation: field checks with dotted-path error messages.

use crate::schema::ParleyConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &ParleyConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_session(config, &mut report);
    validate_api_keys(config, &mut report);
    validate_webhooks(config, &mut report);
    validate_profile(config, &mut report);
    validate_completion(config, &mut report);
    report
}

/// Token and deployment target are required to open a session at all.
fn validate_session(config: &ParleyConfig, report: &mut ValidationReport) {
    if config.token.trim().is_empty() {
        report.error("token", "Bot token is required");
    }
    if config.guild_id.trim().is_empty() {
        report.error("guildId", "Deployment target (guild id) is required");
    } else if let Err(e) = config.guild_id() {
        report.error("guildId", e.to_string());
    }
}

fn validate_api_keys(config: &ParleyConfig, report: &mut ValidationReport) {
    if is_blank(config.openai_api_key.as_deref()) {
        report.warn("openaiApiKey", "No completion API key; /ask will fail");
    }
    if is_blank(config.text_gears_api_key.as_deref()) {
        report.warn("textGearsApiKey", "No grammar API key; /grammarcheck will fail");
    }
}

fn validate_webhooks(config: &ParleyConfig, report: &mut ValidationReport) {
    let hooks = [
        ("interactionWebhookUrl", config.interaction_webhook_url.as_deref()),
        ("errorWebhookUrl", config.error_webhook_url.as_deref()),
    ];
    for (path, url) in hooks {
        match url {
            None | Some("") => report.warn(path, "Not set; these events are only logged locally"),
            Some(url) if !(url.starts_with("https://") || url.starts_with("http://")) => {
                report.error(path, format!("Webhook URL must be http(s), got {url:?}"));
            }
            Some(_) => {}
        }
    }
}

fn validate_profile(config: &ParleyConfig, report: &mut ValidationReport) {
    if config.owner.trim().is_empty() {
        report.warn("owner", "Owner is empty; /info and /help will show a blank owner");
    }
    if config.github_url.trim().is_empty() {
        report.warn("githubUrl", "Project URL is empty; /info will show a blank link");
    }
}

fn validate_completion(config: &ParleyConfig, report: &mut ValidationReport) {
    if config.completion.max_tokens == Some(0) {
        report.error("completion.maxTokens", "maxTokens must be >= 1");
    }
    if config.translation.lang_pair().split('|').count() != 2 {
        report.error("translation.langPair", "langPair must look like `auto|en`");
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(str::trim).map(str::is_empty).unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: serde_json::Value) -> ParleyConfig {
        serde_json::from_value(value).unwrap()
    }

    fn complete() -> serde_json::Value {
        json!({
            "token": "t",
            "guildId": "123",
            "openaiApiKey": "sk",
            "textGearsApiKey": "tg",
            "interactionWebhookUrl": "https://hooks/i",
            "errorWebhookUrl": "https://hooks/e",
            "owner": "Ada",
            "githubUrl": "https://github.com/ada/parley"
        })
    }

    #[test]
    fn complete_config_is_clean() {
        let report = validate(&config(complete()));
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn empty_config_reports_session_errors() {
        let report = validate(&ParleyConfig::default());
        let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["token", "guildId"]);
    }

    #[test]
    fn missing_keys_and_hooks_are_warnings() {
        let report = validate(&config(json!({"token": "t", "guildId": 1})));
        assert!(report.is_valid());
        let paths: Vec<_> = report.warnings.iter().map(|w| w.path.as_str()).collect();
        assert!(paths.contains(&"openaiApiKey"));
        assert!(paths.contains(&"errorWebhookUrl"));
    }

    #[test]
    fn non_http_webhook_is_an_error() {
        let mut value = complete();
        value["errorWebhookUrl"] = json!("ftp://nope");
        let report = validate(&config(value));
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "errorWebhookUrl");
    }

    #[test]
    fn zero_max_tokens_is_an_error() {
        let mut value = complete();
        value["completion"] = json!({"maxTokens": 0});
        let report = validate(&config(value));
        assert_eq!(report.errors[0].path, "completion.maxTokens");
    }
}
