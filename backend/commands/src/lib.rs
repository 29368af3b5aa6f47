pub mod args;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod registry;
pub mod types;

pub use args::{ArgMap, FromArgs, NoArgs};
pub use dispatch::{
    CommandContext, CommandDispatcher, CommandHandler, DispatchOutcome, Responder, SlashCommand,
};
pub use error::CommandError;
pub use handlers::{
    AskHandler, GrammarCheckHandler, HelpHandler, InfoHandler, TranslateHandler, UptimeHandler,
};
pub use registry::{CommandRegistry, WireCommand, WireOption};
pub use types::{
    BotProfile, CommandSpec, Embed, EmbedField, EmbedFooter, GENERIC_FAILURE, Invocation,
    InvocationParam, InvokingUser, ParamType, ParamValue, ParameterSpec, Reply, ReplyBody,
    Visibility,
};

use std::sync::Arc;
use std::time::Instant;

use parley_config::ParleyConfig;
use parley_core::{CompletionProvider, GrammarChecker, ParleyError, Translator};
use parley_logging::LogSink;

/// Remote collaborators the built-in handlers call out to.
#[derive(Clone)]
pub struct BotServices {
    pub completion: Arc<dyn CompletionProvider>,
    pub grammar: Arc<dyn GrammarChecker>,
    pub translator: Arc<dyn Translator>,
}

/// The built-in handlers, in registration order.
pub fn builtin_handlers(
    config: Arc<ParleyConfig>,
    services: BotServices,
    started: Instant,
) -> Vec<Arc<dyn CommandHandler>> {
    vec![
        Arc::new(HelpHandler {
            config: Arc::clone(&config),
        }),
        Arc::new(AskHandler {
            provider: services.completion,
            max_tokens: config.completion.max_tokens(),
        }),
        Arc::new(GrammarCheckHandler {
            checker: services.grammar,
        }),
        Arc::new(TranslateHandler {
            translator: services.translator,
            lang_pair: config.translation.lang_pair().to_string(),
        }),
        Arc::new(InfoHandler {
            config: Arc::clone(&config),
        }),
        Arc::new(UptimeHandler { started }),
    ]
}

/// Build a dispatcher pre-wired with all built-in handlers.
pub fn build_default_dispatcher(
    config: Arc<ParleyConfig>,
    services: BotServices,
    sink: Arc<dyn LogSink>,
    started: Instant,
) -> Result<CommandDispatcher, ParleyError> {
    CommandDispatcher::new(builtin_handlers(config, services, started), sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parley_core::GrammarIssue;
    use parley_logging::{LogDestination, MemorySink};
    use parley_providers::MockProvider;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Collect(Arc<Mutex<Vec<Reply>>>);

    #[async_trait]
    impl Responder for Collect {
        async fn respond(self, reply: Reply) -> anyhow::Result<()> {
            self.0.lock().unwrap().push(reply);
            Ok(())
        }
    }

    fn services(provider: MockProvider) -> BotServices {
        let provider = Arc::new(provider);
        BotServices {
            completion: provider.clone(),
            grammar: provider.clone(),
            translator: provider,
        }
    }

    fn config() -> Arc<ParleyConfig> {
        Arc::new(ParleyConfig {
            owner: "Ada".into(),
            github_url: "https://github.com/ada/parley".into(),
            ..Default::default()
        })
    }

    fn valid_params(spec: &CommandSpec) -> Vec<InvocationParam> {
        spec.parameters
            .iter()
            .map(|p| InvocationParam::string(&p.name, "some text"))
            .collect()
    }

    fn invocation(name: &str, parameters: Vec<InvocationParam>) -> Invocation {
        Invocation {
            command_name: name.into(),
            user: InvokingUser {
                id: "7".into(),
                tag: "grace".into(),
            },
            parameters,
        }
    }

    #[test]
    fn registers_the_six_builtins_in_order() {
        let d = build_default_dispatcher(
            config(),
            services(MockProvider::new()),
            Arc::new(MemorySink::new()),
            Instant::now(),
        )
        .unwrap();
        let names: Vec<_> = d.registry().all().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["help", "ask", "grammarcheck", "translate", "info", "uptime"]);
    }

    #[tokio::test]
    async fn every_builtin_replies_once_with_one_interaction_log() {
        let provider = MockProvider::new()
            .with_choices(["answer"])
            .with_issues(vec![GrammarIssue {
                bad: "teh".into(),
                better: vec!["the".into()],
            }])
            .with_translation("hello");
        let sink = MemorySink::new();
        let d = build_default_dispatcher(
            config(),
            services(provider),
            Arc::new(sink.clone()),
            Instant::now(),
        )
        .unwrap();

        let specs = d.registry().all().to_vec();
        for spec in &specs {
            let replies = Collect::default();
            let outcome = d
                .on_invocation(
                    invocation(&spec.name, valid_params(spec)),
                    BotProfile::default(),
                    replies.clone(),
                )
                .await;
            assert!(outcome.is_handled(), "/{} failed: {outcome:?}", spec.name);
            assert_eq!(replies.0.lock().unwrap().len(), 1);
        }
        assert_eq!(sink.count(LogDestination::Interaction), specs.len());
        assert_eq!(sink.count(LogDestination::Error), 0);
    }

    #[tokio::test]
    async fn remote_failures_become_the_generic_reply() {
        let sink = MemorySink::new();
        let d = build_default_dispatcher(
            config(),
            services(MockProvider::failing("connection reset")),
            Arc::new(sink.clone()),
            Instant::now(),
        )
        .unwrap();

        for name in ["ask", "grammarcheck", "translate"] {
            let replies = Collect::default();
            let params = vec![InvocationParam::string(
                if name == "ask" { "question" } else { "text" },
                "x",
            )];
            d.on_invocation(invocation(name, params), BotProfile::default(), replies.clone())
                .await;
            let replies = replies.0.lock().unwrap().clone();
            assert_eq!(replies, vec![Reply::failure()]);
        }

        let errors: Vec<_> = sink
            .events()
            .into_iter()
            .filter(|e| e.destination == LogDestination::Error)
            .collect();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].text.contains("Command: /ask"));
        assert!(errors[1].text.contains("Command: /grammarcheck"));
        assert!(errors[2].text.contains("connection reset"));
    }
}
