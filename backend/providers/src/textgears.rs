use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use parley_core::{GrammarChecker, GrammarIssue, ParleyError};

use crate::{ensure_success, transport_error};

const SERVICE: &str = "grammar";

/// TextGears grammar API (`POST /grammar?text=..&key=..`).
pub struct TextGearsChecker {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TextGearsChecker {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.textgears.com".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

/// The issue list may sit at the top level or under `response`; a
/// `status: false` body carries a `description` instead.
#[derive(Deserialize)]
struct GrammarReply {
    status: Option<bool>,
    description: Option<String>,
    errors: Option<Vec<GrammarIssue>>,
    response: Option<GrammarResult>,
}

#[derive(Deserialize)]
struct GrammarResult {
    errors: Option<Vec<GrammarIssue>>,
}

#[async_trait]
impl GrammarChecker for TextGearsChecker {
    fn name(&self) -> &str {
        "textgears"
    }

    async fn check(&self, text: &str) -> Result<Vec<GrammarIssue>> {
        debug!(chars = text.chars().count(), "Sending grammar check");

        let response = self
            .client
            .post(format!("{}/grammar", self.base_url))
            .query(&[("text", text), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        let reply: GrammarReply = ensure_success(SERVICE, response)
            .await?
            .json()
            .await
            .context("Failed to parse grammar response")?;

        if reply.status == Some(false) {
            let reason = reply.description.unwrap_or_else(|| "request rejected".into());
            return Err(ParleyError::remote(SERVICE, reason).into());
        }

        reply
            .errors
            .or_else(|| reply.response.and_then(|r| r.errors))
            .ok_or_else(|| ParleyError::remote(SERVICE, "response has no errors list").into())
    }
}
