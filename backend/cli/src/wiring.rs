//! Builds the remote collaborators and log sink from the loaded config.

use std::sync::Arc;

use parley_commands::BotServices;
use parley_config::ParleyConfig;
use parley_logging::{LogSink, WebhookSink};
use parley_providers::{MyMemoryTranslator, OpenAiCompletions, TextGearsChecker};

pub fn build_services(config: &ParleyConfig) -> BotServices {
    let completion = OpenAiCompletions::new(
        config.openai_api_key.clone().unwrap_or_default(),
        config.completion.model(),
    )
    .with_base_url(config.completion.base_url());

    let grammar = TextGearsChecker::new(config.text_gears_api_key.clone().unwrap_or_default())
        .with_base_url(config.grammar.base_url());

    let translator = MyMemoryTranslator::new().with_base_url(config.translation.base_url());

    BotServices {
        completion: Arc::new(completion),
        grammar: Arc::new(grammar),
        translator: Arc::new(translator),
    }
}

pub fn build_sink(config: &ParleyConfig) -> Arc<dyn LogSink> {
    Arc::new(WebhookSink::new(
        config.interaction_webhook_url.clone(),
        config.error_webhook_url.clone(),
    ))
}
