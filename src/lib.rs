//! aigit - a git wrapper that writes commit messages with an LLM.
//!
//! # Overview
//!
//! `aigit commit` captures the staged diff, asks a text-generation provider
//! (a local Ollama server or an OpenAI-compatible API) for a commit message,
//! prefixes it with the current branch prefix and runs `git commit -m`.
//! Every other invocation is forwarded to `git` unchanged.

pub mod commit;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod git;
pub mod llm;

// Re-export commonly used types
pub use commit::{CommitMessage, generate_commit_message};
pub use config::Config;
pub use dispatch::{Invocation, dispatch};
pub use error::{CommitError, ConfigError, DispatchError, GitError, ProviderError};
pub use git::{GitExecutor, SystemGit};
pub use llm::{Provider, TextGenerator, build_generator};
