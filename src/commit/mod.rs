//! AI-generated commit messages using LLM providers.

pub mod message;
pub mod prompt;

pub use message::{CommitMessage, generate_commit_message};
pub use prompt::build_commit_prompt;
