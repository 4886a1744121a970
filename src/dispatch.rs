//! Command dispatch: generate-and-commit for `commit`, passthrough for everything else.

use std::ffi::OsString;

use tracing::debug;

use crate::commit::generate_commit_message;
use crate::config::Config;
use crate::error::{ConfigError, DispatchError};
use crate::git::GitExecutor;
use crate::llm::{TextGenerator, build_generator};

/// Printed when aigit is run without arguments.
pub const USAGE: &str =
    "Please provide a git command to run, e.g. 'aigit status' or 'aigit commit'";

/// What a command line asks aigit to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// No arguments at all.
    Usage,
    /// `commit`, with a generated message. Further arguments are ignored.
    Commit,
    /// Anything else, forwarded to git verbatim. Arguments need not be UTF-8.
    Forward(Vec<OsString>),
}

impl Invocation {
    /// Classify the arguments that follow the program name.
    ///
    /// Nothing is interpreted except a leading `commit`; `--` and flags are
    /// left for git.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        match args.first() {
            None => Invocation::Usage,
            Some(first) if first == "commit" => Invocation::Commit,
            Some(_) => Invocation::Forward(args),
        }
    }
}

/// Run an invocation and return the exit code to leave with.
///
/// `load_config` is only called for `commit`, so a broken provider setting
/// never gets in the way of plain git commands.
pub async fn dispatch<F>(
    invocation: Invocation,
    git: &dyn GitExecutor,
    load_config: F,
) -> Result<i32, DispatchError>
where
    F: FnOnce() -> Result<Config, ConfigError>,
{
    debug!("Dispatching {:?}", invocation);

    match invocation {
        Invocation::Usage => {
            println!("{USAGE}");
            Ok(0)
        }
        Invocation::Forward(args) => forward(git, &args).await,
        Invocation::Commit => {
            let config = load_config().map_err(DispatchError::Config)?;
            let generator = build_generator(&config)
                .map_err(|e| DispatchError::Generate(e.into()))?;
            commit(git, generator.as_ref(), config.branch_prefix).await
        }
    }
}

/// Forward `args` to git unchanged and return git's exit code.
pub async fn forward(git: &dyn GitExecutor, args: &[OsString]) -> Result<i32, DispatchError> {
    git.passthrough(args).await.map_err(DispatchError::Git)
}

/// Generate a message and commit with it.
///
/// `git commit` only runs once a message exists; any generation failure
/// returns before touching the repository.
pub async fn commit(
    git: &dyn GitExecutor,
    llm: &dyn TextGenerator,
    with_branch_prefix: bool,
) -> Result<i32, DispatchError> {
    let message = generate_commit_message(git, llm, with_branch_prefix)
        .await
        .map_err(DispatchError::Generate)?;

    println!("Generated commit message: {}", message);

    git.commit(&message.format())
        .await
        .map_err(DispatchError::Git)
}
