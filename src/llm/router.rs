//! Provider selection.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use tracing::debug;

use crate::config::Config;
use crate::error::{ConfigError, ProviderError};

use super::ollama::{OllamaApi, OllamaClient};
use super::openai::OpenAiClient;

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Local Ollama server, `/api/generate` endpoint.
    OllamaGenerate,
    /// Local Ollama server, `/api/chat` endpoint.
    OllamaChat,
    /// OpenAI-compatible chat completions API.
    OpenAi,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OllamaGenerate => "Ollama",
            Provider::OllamaChat => "Ollama chat",
            Provider::OpenAi => "OpenAI",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OllamaGenerate | Provider::OllamaChat => "llama3",
            Provider::OpenAi => "gpt-4o-mini",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Provider::OllamaGenerate => "http://localhost:11434/api/generate",
            Provider::OllamaChat => "http://localhost:11434/api/chat",
            Provider::OpenAi => "https://api.openai.com/v1/chat/completions",
        }
    }

    /// Whether the provider refuses to run without an API key.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Provider::OpenAi)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generate" | "ollama" => Ok(Provider::OllamaGenerate),
            "chat" | "ollama-chat" => Ok(Provider::OllamaChat),
            "openai" => Ok(Provider::OpenAi),
            _ => Err(ConfigError::UnknownProvider(s.to_string())),
        }
    }
}

/// Anything that can turn a prompt into free text.
///
/// This abstraction allows mocking the HTTP providers in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send the prompt and return the model's raw text, untrimmed.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Build the generator selected by `config`.
///
/// Fails with [`ProviderError::MissingCredential`] before any network call
/// when the provider needs an API key and none is configured.
pub fn build_generator(config: &Config) -> Result<Box<dyn TextGenerator>, ProviderError> {
    debug!(
        "Using {} model '{}' at {}",
        config.provider, config.model, config.endpoint
    );

    if config.provider.requires_api_key() && config.api_key.is_none() {
        return Err(ProviderError::MissingCredential {
            provider: config.provider,
        });
    }

    match config.provider {
        Provider::OllamaGenerate => Ok(Box::new(OllamaClient::new(config, OllamaApi::Generate)?)),
        Provider::OllamaChat => Ok(Box::new(OllamaClient::new(config, OllamaApi::Chat)?)),
        Provider::OpenAi => Ok(Box::new(OpenAiClient::new(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str_accepts_aliases() {
        assert_eq!("generate".parse::<Provider>().unwrap(), Provider::OllamaGenerate);
        assert_eq!("Ollama".parse::<Provider>().unwrap(), Provider::OllamaGenerate);
        assert_eq!(" chat ".parse::<Provider>().unwrap(), Provider::OllamaChat);
        assert_eq!("OPENAI".parse::<Provider>().unwrap(), Provider::OpenAi);
    }

    #[test]
    fn test_provider_from_str_rejects_unknown() {
        let err = "gemini".parse::<Provider>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProvider(ref s) if s == "gemini"));
    }

    #[test]
    fn test_only_openai_requires_api_key() {
        assert!(!Provider::OllamaGenerate.requires_api_key());
        assert!(!Provider::OllamaChat.requires_api_key());
        assert!(Provider::OpenAi.requires_api_key());
    }

    #[test]
    fn test_local_defaults_point_at_ollama() {
        assert_eq!(Provider::OllamaGenerate.default_model(), "llama3");
        assert!(Provider::OllamaGenerate
            .default_endpoint()
            .starts_with("http://localhost:11434/"));
        assert!(Provider::OllamaChat.default_endpoint().ends_with("/api/chat"));
    }

    #[test]
    fn test_build_generator_fails_without_openai_key() {
        let config = Config {
            api_key: None,
            ..Config::for_provider(Provider::OpenAi)
        };

        let result = build_generator(&config);
        assert!(matches!(
            result,
            Err(ProviderError::MissingCredential {
                provider: Provider::OpenAi
            })
        ));
    }

    #[test]
    fn test_build_generator_rejects_key_required_providers_without_key() {
        for provider in [Provider::OllamaGenerate, Provider::OllamaChat, Provider::OpenAi] {
            let result = build_generator(&Config::for_provider(provider));
            if provider.requires_api_key() {
                assert!(matches!(
                    result,
                    Err(ProviderError::MissingCredential { provider: p }) if p == provider
                ));
            } else {
                assert!(result.is_ok(), "{provider} should build without a key");
            }
        }
    }

    #[test]
    fn test_build_generator_local_needs_no_key() {
        let config = Config::for_provider(Provider::OllamaChat);
        assert!(build_generator(&config).is_ok());
    }
}
