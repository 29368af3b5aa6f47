//! Built-in command handlers.
//!
//! Each handler is a concrete struct implementing `SlashCommand`; remote
//! collaborators and configuration are injected at construction.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use parley_config::ParleyConfig;
use parley_core::{
    CompletionProvider, CompletionRequest, GrammarChecker, GrammarIssue, ParleyError, Translator,
};
use tracing::debug;

use crate::args::{ArgMap, FromArgs, NoArgs};
use crate::dispatch::{CommandContext, SlashCommand};
use crate::error::CommandError;
use crate::types::{CommandSpec, Embed, EmbedField, EmbedFooter, ParameterSpec, Reply};

const HELP_COLOR: u32 = 0x3498db;

// ---------------------------------------------------------------------------
// Shared argument shapes
// ---------------------------------------------------------------------------

pub struct QuestionArgs {
    pub question: String,
}

impl FromArgs for QuestionArgs {
    fn from_args(args: &ArgMap) -> Result<Self, CommandError> {
        Ok(Self {
            question: args.string("question")?.to_string(),
        })
    }
}

pub struct TextArgs {
    pub text: String,
}

impl FromArgs for TextArgs {
    fn from_args(args: &ArgMap) -> Result<Self, CommandError> {
        Ok(Self {
            text: args.string("text")?.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// /help
// ---------------------------------------------------------------------------

pub struct HelpHandler {
    pub config: Arc<ParleyConfig>,
}

#[async_trait]
impl SlashCommand for HelpHandler {
    type Args = NoArgs;

    fn definition(&self) -> CommandSpec {
        CommandSpec::new("help", "Show all commands")
    }

    async fn run(&self, ctx: &CommandContext, _args: NoArgs) -> Result<Reply> {
        let fields = ctx
            .registry
            .all()
            .iter()
            .map(|cmd| EmbedField {
                name: cmd.usage(),
                value: cmd.description.clone(),
            })
            .collect();

        let embed = Embed {
            title: Some("Help - List of Commands".into()),
            description: Some("Here are the available commands:".into()),
            color: Some(HELP_COLOR),
            fields,
            footer: Some(EmbedFooter {
                text: format!("Bot by {}", self.config.owner),
                icon_url: ctx.bot.avatar_url.clone(),
            }),
        };
        Ok(Reply::embed(embed).ephemeral())
    }
}

// ---------------------------------------------------------------------------
// /ask
// ---------------------------------------------------------------------------

pub struct AskHandler {
    pub provider: Arc<dyn CompletionProvider>,
    pub max_tokens: u32,
}

#[async_trait]
impl SlashCommand for AskHandler {
    type Args = QuestionArgs;

    fn definition(&self) -> CommandSpec {
        CommandSpec::new("ask", "Ask the AI assistant a question")
            .param(ParameterSpec::required_string("question", "Your question"))
    }

    async fn run(&self, _ctx: &CommandContext, args: QuestionArgs) -> Result<Reply> {
        let request = CompletionRequest {
            prompt: args.question,
            max_tokens: self.max_tokens,
        };
        let response = self.provider.complete(&request).await?;
        debug!(provider = self.provider.name(), choices = response.choices.len(), "Completion received");

        match response.first_trimmed() {
            Some(text) if !text.is_empty() => Ok(Reply::plain(text)),
            Some(_) => Err(ParleyError::remote("completion", "completion text was empty").into()),
            None => Err(ParleyError::remote("completion", "no completion choices returned").into()),
        }
    }
}

// ---------------------------------------------------------------------------
// /grammarcheck
// ---------------------------------------------------------------------------

pub struct GrammarCheckHandler {
    pub checker: Arc<dyn GrammarChecker>,
}

/// `No grammar errors found!`, or one `Error: <bad> (<suggestions>)` line per issue.
pub fn format_grammar_issues(issues: &[GrammarIssue]) -> String {
    if issues.is_empty() {
        return "No grammar errors found!".to_string();
    }
    issues
        .iter()
        .map(|issue| format!("Error: {} ({})", issue.bad, issue.better.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl SlashCommand for GrammarCheckHandler {
    type Args = TextArgs;

    fn definition(&self) -> CommandSpec {
        CommandSpec::new("grammarcheck", "Check the grammar of a text")
            .param(ParameterSpec::required_string("text", "Text to check"))
    }

    async fn run(&self, _ctx: &CommandContext, args: TextArgs) -> Result<Reply> {
        let issues = self.checker.check(&args.text).await?;
        Ok(Reply::plain(format_grammar_issues(&issues)))
    }
}

// ---------------------------------------------------------------------------
// /translate
// ---------------------------------------------------------------------------

pub struct TranslateHandler {
    pub translator: Arc<dyn Translator>,
    pub lang_pair: String,
}

#[async_trait]
impl SlashCommand for TranslateHandler {
    type Args = TextArgs;

    fn definition(&self) -> CommandSpec {
        CommandSpec::new("translate", "Translate text to English")
            .param(ParameterSpec::required_string("text", "Text to translate"))
    }

    async fn run(&self, _ctx: &CommandContext, args: TextArgs) -> Result<Reply> {
        let translated = self.translator.translate(&args.text, &self.lang_pair).await?;
        Ok(Reply::plain(format!("Translated text: {translated}")))
    }
}

// ---------------------------------------------------------------------------
// /info
// ---------------------------------------------------------------------------

pub struct InfoHandler {
    pub config: Arc<ParleyConfig>,
}

#[async_trait]
impl SlashCommand for InfoHandler {
    type Args = NoArgs;

    fn definition(&self) -> CommandSpec {
        CommandSpec::new("info", "Show bot information, owner, and GitHub page")
    }

    async fn run(&self, ctx: &CommandContext, _args: NoArgs) -> Result<Reply> {
        let name = self.config.bot_name.as_deref().unwrap_or(&ctx.bot.name);
        Ok(Reply::plain(format!(
            "Bot Name: {name}\nOwner: {}\nGitHub: {}",
            self.config.owner, self.config.github_url
        )))
    }
}

// ---------------------------------------------------------------------------
// /uptime
// ---------------------------------------------------------------------------

pub struct UptimeHandler {
    pub started: Instant,
}

/// `<h>h <m>m <s>s`, hours unbounded.
pub fn format_uptime(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{}h {}m {}s", total / 3600, (total % 3600) / 60, total % 60)
}

#[async_trait]
impl SlashCommand for UptimeHandler {
    type Args = NoArgs;

    fn definition(&self) -> CommandSpec {
        CommandSpec::new("uptime", "Show bot uptime")
    }

    async fn run(&self, _ctx: &CommandContext, _args: NoArgs) -> Result<Reply> {
        Ok(Reply::plain(format_uptime(self.started.elapsed())))
    }
}
