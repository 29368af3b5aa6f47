use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use parley_core::{CompletionProvider, CompletionRequest, CompletionResponse};

use crate::{ensure_success, transport_error};

const SERVICE: &str = "completion";

/// OpenAI-compatible legacy text-completion endpoint (`POST /completions`).
pub struct OpenAiCompletions {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiCompletions {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionReply {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl CompletionProvider for OpenAiCompletions {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let body = CompletionBody {
            model: &self.model,
            prompt: &request.prompt,
            max_tokens: request.max_tokens,
        };

        debug!(model = %self.model, max_tokens = request.max_tokens, "Sending completion request");

        let response = self
            .client
            .post(format!("{}/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        let reply: CompletionReply = ensure_success(SERVICE, response)
            .await?
            .json()
            .await
            .context("Failed to parse completion response")?;

        Ok(CompletionResponse {
            choices: reply.choices.into_iter().map(|c| c.text).collect(),
        })
    }
}
