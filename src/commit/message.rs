//! Commit message generation via LLM.

use std::fmt;

use tracing::{debug, warn};

use crate::commit::prompt::build_commit_prompt;
use crate::error::CommitError;
use crate::git::{GitExecutor, message_prefix};
use crate::llm::TextGenerator;

/// A generated commit message, optionally tagged with the branch prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    /// Branch prefix, never empty when present.
    pub prefix: Option<String>,
    /// Trimmed model output, never empty.
    pub text: String,
}

impl CommitMessage {
    /// Normalize raw model output into a commit message.
    ///
    /// Fails with [`CommitError::EmptyMessage`] when nothing but whitespace
    /// came back, so an empty `-m` is never passed to git.
    pub fn new(generated: &str, prefix: Option<&str>) -> Result<Self, CommitError> {
        let text = generated.trim();
        if text.is_empty() {
            return Err(CommitError::EmptyMessage);
        }

        Ok(Self {
            prefix: prefix.filter(|p| !p.is_empty()).map(str::to_string),
            text: text.to_string(),
        })
    }

    /// Format the message for `git commit -m`.
    ///
    /// Produces `<prefix> <text>` when a prefix is present, `<text>` otherwise.
    pub fn format(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{} {}", prefix, self.text),
            None => self.text.clone(),
        }
    }

}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Generate a commit message from the staged diff.
///
/// Steps, each aborting the whole run on failure:
/// 1. capture the staged diff
/// 2. capture the branch name (only when `with_branch_prefix`)
/// 3. build the prompt and send it to the provider
/// 4. trim the result and apply the branch prefix
pub async fn generate_commit_message(
    git: &dyn GitExecutor,
    llm: &dyn TextGenerator,
    with_branch_prefix: bool,
) -> Result<CommitMessage, CommitError> {
    let diff = git.staged_diff().await?;
    if diff.trim().is_empty() {
        warn!("No staged changes found; generating from an empty diff");
    }

    let prefix = if with_branch_prefix {
        let branch = git.current_branch().await?;
        debug!("Current branch: {}", branch);
        message_prefix(&branch).map(str::to_string)
    } else {
        None
    };

    let prompt = build_commit_prompt(&diff);
    debug!(
        "Commit prompt length: {} chars (diff {} chars)",
        prompt.len(),
        diff.len()
    );

    let generated = llm.generate(&prompt).await?;
    debug!("Raw model output: {:?}", generated);

    CommitMessage::new(&generated, prefix.as_deref())
}
