use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use parley_core::{ParleyError, Translator};

use crate::{ensure_success, transport_error};

const SERVICE: &str = "translation";

/// MyMemory translation API (`GET /get?q=..&langpair=..`).
pub struct MyMemoryTranslator {
    client: Client,
    base_url: String,
}

impl MyMemoryTranslator {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: "https://api.mymemory.translated.net".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for MyMemoryTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationReply {
    response_data: Option<ResponseData>,
    /// Sent as a number or a numeric string depending on the outcome.
    response_status: Option<Value>,
    response_details: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: String,
}

fn status_code(status: &Value) -> Option<u64> {
    match status {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    fn name(&self) -> &str {
        "mymemory"
    }

    async fn translate(&self, text: &str, lang_pair: &str) -> Result<String> {
        debug!(lang_pair, "Sending translation request");

        let response = self
            .client
            .get(format!("{}/get", self.base_url))
            .query(&[("q", text), ("langpair", lang_pair)])
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        let reply: TranslationReply = ensure_success(SERVICE, response)
            .await?
            .json()
            .await
            .context("Failed to parse translation response")?;

        if let Some(code) = reply.response_status.as_ref().and_then(status_code) {
            if code != 200 {
                let reason = reply.response_details.unwrap_or_default();
                return Err(ParleyError::remote(SERVICE, format!("status {code}: {reason}")).into());
            }
        }

        reply
            .response_data
            .map(|d| d.translated_text)
            .ok_or_else(|| ParleyError::remote(SERVICE, "response has no translation").into())
    }
}
