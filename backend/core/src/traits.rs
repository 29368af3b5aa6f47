use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for text-completion providers used by `/ask`.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and return every choice the provider produced.
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse>;
}

/// Request to a completion provider.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
}

/// Response from a completion provider.
#[derive(Debug, Clone, Default)]
pub struct CompletionResponse {
    pub choices: Vec<String>,
}

impl CompletionResponse {
    /// First choice, trimmed. `None` when the provider returned no choices.
    pub fn first_trimmed(&self) -> Option<&str> {
        self.choices.first().map(|c| c.trim())
    }
}

/// A single issue reported by a grammar checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarIssue {
    pub bad: String,
    #[serde(default)]
    pub better: Vec<String>,
}

/// Trait for grammar-checking services used by `/grammarcheck`.
#[async_trait]
pub trait GrammarChecker: Send + Sync {
    fn name(&self) -> &str;

    /// Return every issue found in `text`; empty when the text is clean.
    async fn check(&self, text: &str) -> Result<Vec<GrammarIssue>>;
}

/// Trait for translation services used by `/translate`.
#[async_trait]
pub trait Translator: Send + Sync {
    fn name(&self) -> &str;

    /// Translate `text` according to `lang_pair` (e.g. `auto|en`).
    async fn translate(&self, text: &str, lang_pair: &str) -> Result<String>;
}
