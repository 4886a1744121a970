//! Error types for aigit modules using thiserror.

use thiserror::Error;

use crate::llm::Provider;

/// Errors from running the `git` executable.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to run git {command}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {command} exited with code {code}: {stderr}")]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Failed to get staged diff")]
    DiffCapture(#[source] Box<GitError>),

    #[error("Failed to get current branch name")]
    BranchCapture(#[source] Box<GitError>),
}

/// Errors from LLM provider calls.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} requires an API key. Set AIGIT_API_KEY or OPENAI_API_KEY")]
    MissingCredential { provider: Provider },

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Failed to call {provider} at {endpoint}")]
    Request {
        provider: Provider,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: Provider,
        status: u16,
        body: String,
    },

    #[error("Failed to decode {provider} response: {detail}")]
    Response { provider: Provider, detail: String },

    #[error("{provider} returned no choices")]
    EmptyChoices { provider: Provider },
}

/// Errors from reading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown provider '{0}'. Expected one of: generate, chat, openai")]
    UnknownProvider(String),
}

/// Errors from the commit message pipeline.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("The model returned an empty commit message")]
    EmptyMessage,
}

/// Errors surfaced by the command dispatcher.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Invalid aigit configuration")]
    Config(#[source] ConfigError),

    #[error("Failed to generate commit message")]
    Generate(#[source] CommitError),

    #[error("Failed to run git")]
    Git(#[source] GitError),
}
