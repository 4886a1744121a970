//! Branch prefix derivation.

/// Separator between the prefix and the rest of a branch name.
pub const PREFIX_SEPARATOR: &str = "--";

/// What `git rev-parse --abbrev-ref HEAD` prints on a detached HEAD.
const DETACHED_HEAD: &str = "HEAD";

/// Everything before the first `--`, or the whole name when there is none.
///
/// `feature--login` gives `feature`; `main` gives `main`.
pub fn branch_prefix(branch: &str) -> &str {
    branch
        .split_once(PREFIX_SEPARATOR)
        .map_or(branch, |(prefix, _)| prefix)
}

/// The prefix to put in front of a commit message, if any.
///
/// Returns `None` for an empty prefix and for a detached HEAD.
pub fn message_prefix(branch: &str) -> Option<&str> {
    let branch = branch.trim();
    if branch == DETACHED_HEAD {
        return None;
    }
    Some(branch_prefix(branch)).filter(|prefix| !prefix.is_empty())
}
