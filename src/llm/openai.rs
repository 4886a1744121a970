//! OpenAI-compatible chat completions API.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ProviderError;

use super::http::{ChatMessage, ResponseMessage, build_client, post_json};
use super::router::{Provider, TextGenerator};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

/// Chat completions client authenticated with a bearer token.
#[derive(Debug)]
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
    /// Stored as `SecretString` so it never shows up in debug output.
    api_key: SecretString,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let api_key = config
            .api_key
            .as_ref()
            .map(|key| SecretString::from(key.expose_secret()))
            .ok_or(ProviderError::MissingCredential {
                provider: Provider::OpenAi,
            })?;

        Ok(Self {
            client: build_client(config.timeout)?,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            api_key,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: self.max_tokens,
        };

        let response: ChatCompletionResponse = post_json(
            &self.client,
            Provider::OpenAi,
            &self.endpoint,
            &body,
            Some(&self.api_key),
        )
        .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyChoices {
                provider: Provider::OpenAi,
            })
    }
}
