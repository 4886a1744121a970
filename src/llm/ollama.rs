//! Local Ollama server, via either the generate or the chat endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ProviderError;

use super::http::{ChatMessage, ResponseMessage, build_client, post_json};
use super::router::{Provider, TextGenerator};

/// Which Ollama endpoint shape to speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OllamaApi {
    Generate,
    Chat,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

/// Ollama HTTP client.
#[derive(Debug)]
pub struct OllamaClient {
    client: Client,
    api: OllamaApi,
    endpoint: String,
    model: String,
}

impl OllamaClient {
    pub fn new(config: &Config, api: OllamaApi) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(config.timeout)?,
            api,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        })
    }

    fn provider(&self) -> Provider {
        match self.api {
            OllamaApi::Generate => Provider::OllamaGenerate,
            OllamaApi::Chat => Provider::OllamaChat,
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let provider = self.provider();

        match self.api {
            OllamaApi::Generate => {
                let body = GenerateRequest {
                    model: &self.model,
                    prompt,
                    stream: false,
                };
                let response: GenerateResponse =
                    post_json(&self.client, provider, &self.endpoint, &body, None).await?;
                Ok(response.response)
            }
            OllamaApi::Chat => {
                let body = ChatRequest {
                    model: &self.model,
                    messages: vec![ChatMessage::user(prompt)],
                    stream: false,
                };
                let response: ChatResponse =
                    post_json(&self.client, provider, &self.endpoint, &body, None).await?;
                Ok(response.message.content)
            }
        }
    }
}
