//! Prompt construction for AI-generated commit messages.

/// Instructions appended after the fenced diff.
pub const COMMIT_INSTRUCTIONS: &str = "Write a git commit message for the diff above. \
Be precise and do not overthink the purpose of the change. \
The first line is always a short imperative summary without any special symbols, \
followed by a blank line and an optional longer description.";

/// Build the LLM prompt for generating a commit message.
///
/// The diff is embedded verbatim inside a fenced block.
pub fn build_commit_prompt(diff: &str) -> String {
    format!("```\n{diff}\n```\n{COMMIT_INSTRUCTIONS}")
}
