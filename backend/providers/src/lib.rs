pub mod mock;
pub mod mymemory;
pub mod openai;
pub mod textgears;

pub use mock::MockProvider;
pub use mymemory::MyMemoryTranslator;
pub use openai::OpenAiCompletions;
pub use textgears::TextGearsChecker;

use reqwest::Response;

use parley_core::ParleyError;

/// Turn a non-success HTTP status into a `RemoteApi` error carrying the body.
pub(crate) async fn ensure_success(service: &str, response: Response) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ParleyError::remote(service, format!("returned {status}: {body}")).into())
}

/// Map a transport failure to a `RemoteApi` error. The URL is dropped
/// because some APIs take their key as a query parameter.
pub(crate) fn transport_error(service: &str, err: reqwest::Error) -> anyhow::Error {
    ParleyError::remote(service, err.without_url().to_string()).into()
}
