use anyhow::Result;
use async_trait::async_trait;

use parley_core::{
    CompletionProvider, CompletionRequest, CompletionResponse, GrammarChecker, GrammarIssue,
    ParleyError, Translator,
};

/// Canned stand-in for all three remote APIs.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    choices: Vec<String>,
    issues: Vec<GrammarIssue>,
    translation: Option<String>,
    failure: Option<String>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_issues(mut self, issues: Vec<GrammarIssue>) -> Self {
        self.issues = issues;
        self
    }

    pub fn with_translation(mut self, text: impl Into<String>) -> Self {
        self.translation = Some(text.into());
        self
    }

    /// Every call fails with a `RemoteApi` error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    fn fail_if_configured(&self, service: &str) -> Result<()> {
        match &self.failure {
            Some(message) => Err(ParleyError::remote(service, message.clone()).into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<CompletionResponse> {
        self.fail_if_configured("completion")?;
        Ok(CompletionResponse {
            choices: self.choices.clone(),
        })
    }
}

#[async_trait]
impl GrammarChecker for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn check(&self, _text: &str) -> Result<Vec<GrammarIssue>> {
        self.fail_if_configured("grammar")?;
        Ok(self.issues.clone())
    }
}

#[async_trait]
impl Translator for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(&self, text: &str, _lang_pair: &str) -> Result<String> {
        self.fail_if_configured("translation")?;
        Ok(self.translation.clone().unwrap_or_else(|| text.to_string()))
    }
}
