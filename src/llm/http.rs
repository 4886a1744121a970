//! JSON-over-HTTP plumbing shared by the providers.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProviderError;

use super::router::Provider;

/// Response bodies longer than this are cut in error messages.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// A single chat turn, shared by the chat-style request shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatMessage<'a> {
    pub fn user(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

/// The assistant message inside a chat-style response.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: String,
}

/// Build an HTTP client with the optional request timeout.
pub fn build_client(timeout: Option<Duration>) -> Result<Client, ProviderError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("aigit/", env!("CARGO_PKG_VERSION"))),
    );

    let mut builder = Client::builder().default_headers(headers);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(ProviderError::ClientBuild)
}

/// POST `body` as JSON and decode the response into `T`.
///
/// Transport failures map to [`ProviderError::Request`], non-2xx statuses to
/// [`ProviderError::Status`] and undecodable bodies to [`ProviderError::Response`].
pub async fn post_json<B, T>(
    client: &Client,
    provider: Provider,
    endpoint: &str,
    body: &B,
    api_key: Option<&SecretString>,
) -> Result<T, ProviderError>
where
    B: Serialize + Sync,
    T: DeserializeOwned,
{
    let request_error = |source| ProviderError::Request {
        provider,
        endpoint: endpoint.to_string(),
        source,
    };

    let mut request = client.post(endpoint).json(body);
    if let Some(key) = api_key {
        request = request.header(AUTHORIZATION, format!("Bearer {}", key.expose_secret()));
    }

    let response = request.send().await.map_err(request_error)?;
    let status = response.status();
    let text = response.text().await.map_err(request_error)?;

    debug!("{} responded with HTTP {} ({} bytes)", provider, status, text.len());

    if !status.is_success() {
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
            body: truncate(&text),
        });
    }

    serde_json::from_str(&text).map_err(|e| ProviderError::Response {
        provider,
        detail: format!("{}. Body: {}", e, truncate(&text)),
    })
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
