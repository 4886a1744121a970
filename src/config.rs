//! Runtime configuration, read once from the environment at startup.
//!
//! Values may be seeded from a `.env` file in the working directory or one of
//! its parents. The file never overrides variables that are already set in the
//! process environment.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::llm::Provider;

/// Selects the provider: `generate`, `chat` or `openai`.
pub const PROVIDER_ENV_VAR: &str = "AIGIT_PROVIDER";
/// Model name override.
pub const MODEL_ENV_VAR: &str = "AIGIT_MODEL";
/// Model name override honored for compatibility with Ollama setups.
pub const OLLAMA_MODEL_ENV_VAR: &str = "OLLAMA_MODEL";
/// Endpoint URL override.
pub const ENDPOINT_ENV_VAR: &str = "AIGIT_ENDPOINT";
/// API key for providers that need one.
pub const API_KEY_ENV_VAR: &str = "AIGIT_API_KEY";
/// Fallback API key variable.
pub const OPENAI_API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
/// `max_tokens` for chat completions.
pub const MAX_TOKENS_ENV_VAR: &str = "AIGIT_MAX_TOKENS";
/// Set to `false`/`0`/`off`/`no` to disable branch prefixing.
pub const BRANCH_PREFIX_ENV_VAR: &str = "AIGIT_BRANCH_PREFIX";
/// Request timeout in seconds.
pub const TIMEOUT_ENV_VAR: &str = "AIGIT_TIMEOUT";

const ENV_FILE_NAME: &str = ".env";

/// Default `max_tokens` for chat completions.
const DEFAULT_MAX_TOKENS: u32 = 512;

/// Everything the commit pipeline needs to know about its environment.
#[derive(Debug)]
pub struct Config {
    pub provider: Provider,
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<SecretString>,
    pub max_tokens: u32,
    /// Prefix generated messages with the branch prefix.
    pub branch_prefix: bool,
    /// `None` leaves the HTTP client's defaults in place.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Defaults for `provider`, ignoring the environment.
    pub fn for_provider(provider: Provider) -> Self {
        Self {
            provider,
            model: provider.default_model().to_string(),
            endpoint: provider.default_endpoint().to_string(),
            api_key: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            branch_prefix: true,
            timeout: None,
        }
    }

    /// Read configuration from the process environment.
    ///
    /// Only an unknown provider name is an error. Malformed numbers log a
    /// warning and fall back to their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider = match env_non_empty(PROVIDER_ENV_VAR) {
            Some(name) => name.parse()?,
            None => Provider::OllamaGenerate,
        };

        let defaults = Self::for_provider(provider);

        let model = env_non_empty(MODEL_ENV_VAR)
            .or_else(|| env_non_empty(OLLAMA_MODEL_ENV_VAR))
            .unwrap_or(defaults.model);

        let endpoint = env_non_empty(ENDPOINT_ENV_VAR).unwrap_or(defaults.endpoint);

        let api_key = env_non_empty(API_KEY_ENV_VAR)
            .or_else(|| env_non_empty(OPENAI_API_KEY_ENV_VAR))
            .map(SecretString::from);

        let max_tokens = parse_positive(MAX_TOKENS_ENV_VAR).unwrap_or(DEFAULT_MAX_TOKENS);

        let branch_prefix = env_non_empty(BRANCH_PREFIX_ENV_VAR)
            .map_or(true, |value| parse_flag(&value));

        let timeout = parse_positive::<u64>(TIMEOUT_ENV_VAR).map(Duration::from_secs);

        Ok(Self {
            provider,
            model,
            endpoint,
            api_key,
            max_tokens,
            branch_prefix,
            timeout,
        })
    }
}

/// Load the nearest `.env` (working directory or a parent) into the environment.
pub fn load_env_file() {
    let Ok(cwd) = env::current_dir() else {
        return;
    };
    if let Some(path) = find_env_file(&cwd) {
        load_env_from(&path);
    }
}

/// First `.env` found walking up from `start`.
fn find_env_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(ENV_FILE_NAME))
        .find(|path| path.is_file())
}

/// Load variables from `path` without overriding ones already set.
///
/// A missing file is silently ignored; a malformed one logs a warning.
pub fn load_env_from(path: &Path) {
    match dotenvy::from_path(path) {
        Ok(()) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring {}: {}", path.display(), e),
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Anything other than an explicit "off" value counts as enabled.
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}

/// Read a strictly positive integer, warning on anything else.
fn parse_positive<T>(name: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let raw = env_non_empty(name)?;
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Some(value),
        _ => {
            warn!("Invalid {} value '{}', using default", name, raw);
            None
        }
    }
}
