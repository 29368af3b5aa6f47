//! Webhook log delivery.
//!
//! Each destination is an independently configured URL accepting
//! `{"content": "..."}`. Delivery runs on a spawned task; failures are
//! reported through `tracing` only.

use parley_core::ParleyError;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::event::{LogDestination, LogEvent, truncate_message};
use crate::sink::LogSink;

#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Mirrors log events to the interaction and error webhooks.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: Client,
    interaction_url: Option<String>,
    error_url: Option<String>,
}

impl WebhookSink {
    /// Blank URLs count as unconfigured.
    pub fn new(interaction_url: Option<String>, error_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            interaction_url: interaction_url.filter(|u| !u.trim().is_empty()),
            error_url: error_url.filter(|u| !u.trim().is_empty()),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn url_for(&self, destination: LogDestination) -> Option<&str> {
        match destination {
            LogDestination::Interaction => self.interaction_url.as_deref(),
            LogDestination::Error => self.error_url.as_deref(),
        }
    }

    /// Deliver one event and wait for the webhook's answer.
    pub async fn deliver(&self, event: &LogEvent) -> Result<(), ParleyError> {
        let Some(url) = self.url_for(event.destination) else {
            debug!(destination = ?event.destination, "No webhook configured; skipping");
            return Ok(());
        };
        post(&self.client, url, &event.text).await
    }
}

async fn post(client: &Client, url: &str, text: &str) -> Result<(), ParleyError> {
    let content = truncate_message(text);
    let response = client
        .post(url)
        .json(&WebhookPayload { content: &content })
        .send()
        .await
        .map_err(|e| ParleyError::LoggingDelivery(e.without_url().to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ParleyError::LoggingDelivery(format!("webhook returned {status}")));
    }
    Ok(())
}

impl LogSink for WebhookSink {
    fn emit(&self, event: LogEvent) {
        let Some(url) = self.url_for(event.destination).map(str::to_string) else {
            debug!(destination = ?event.destination, "No webhook configured; skipping");
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(destination = ?event.destination, "No async runtime; dropping log event");
            return;
        };
        let client = self.client.clone();
        runtime.spawn(async move {
            if let Err(e) = post(&client, &url, &event.text).await {
                warn!(destination = ?event.destination, error = %e, "Failed to send log to webhook");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post as post_route};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    async fn spawn_hook(status: StatusCode) -> (String, Arc<Mutex<Vec<Value>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let store = Arc::clone(&seen);
        let app = Router::new().route(
            "/hook",
            post_route(move |Json(body): Json<Value>| {
                let store = Arc::clone(&store);
                async move {
                    store.lock().unwrap().push(body);
                    status
                }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/hook"), seen)
    }

    #[tokio::test]
    async fn delivers_content_to_matching_destination() {
        let (url, seen) = spawn_hook(StatusCode::NO_CONTENT).await;
        let sink = WebhookSink::new(None, Some(url));

        sink.deliver(&LogEvent::error("boom")).await.unwrap();
        // Interaction destination is unconfigured: a no-op, not an error.
        sink.deliver(&LogEvent::interaction("ignored")).await.unwrap();

        let bodies = seen.lock().unwrap().clone();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["content"], "boom");
    }

    #[tokio::test]
    async fn blank_urls_are_skipped() {
        let sink = WebhookSink::new(Some(String::new()), Some("  ".into()));
        sink.deliver(&LogEvent::interaction("hi")).await.unwrap();
        sink.deliver(&LogEvent::error("boom")).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_a_delivery_error() {
        let (url, _seen) = spawn_hook(StatusCode::BAD_REQUEST).await;
        let sink = WebhookSink::new(Some(url), None);

        let err = sink.deliver(&LogEvent::interaction("hi")).await.unwrap_err();
        assert!(matches!(err, ParleyError::LoggingDelivery(_)));
    }

    #[tokio::test]
    async fn unreachable_webhook_is_a_delivery_error() {
        let sink = WebhookSink::new(Some("http://127.0.0.1:9/hook".into()), None);
        let err = sink.deliver(&LogEvent::interaction("hi")).await.unwrap_err();
        assert!(matches!(err, ParleyError::LoggingDelivery(_)));
    }

    #[tokio::test]
    async fn emit_returns_immediately_and_delivers_in_background() {
        let (url, seen) = spawn_hook(StatusCode::OK).await;
        let sink = WebhookSink::new(Some(url), None);

        sink.emit(LogEvent::interaction("async"));

        for _ in 0..50 {
            if !seen.lock().unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        assert_eq!(seen.lock().unwrap()[0]["content"], "async");
    }
}
