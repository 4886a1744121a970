//! Shelling out to the system `git` binary.
//!
//! All operations use `tokio::process::Command`, inheriting the user's git
//! config, SSH agent, hooks and credential store.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::GitError;

/// Exit code reported when git was killed by a signal.
const SIGNALED_EXIT_CODE: i32 = 1;

/// Trait for the git operations aigit performs.
///
/// This abstraction allows mocking git in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Output of `git diff --cached`.
    async fn staged_diff(&self) -> Result<String, GitError>;

    /// Trimmed output of `git rev-parse --abbrev-ref HEAD`.
    async fn current_branch(&self) -> Result<String, GitError>;

    /// Run `git commit -m <message>` on the terminal and return its exit code.
    async fn commit(&self, message: &str) -> Result<i32, GitError>;

    /// Run `git <args>` on the terminal and return its exit code.
    async fn passthrough(&self, args: &[OsString]) -> Result<i32, GitError>;
}

/// Executor that calls the real git binary.
#[derive(Debug, Clone, Default)]
pub struct SystemGit {
    workdir: Option<PathBuf>,
}

impl SystemGit {
    /// Run git in the current working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git inside `dir` instead of the current working directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(dir.into()),
        }
    }

    fn command<S: AsRef<OsStr>>(&self, args: &[S]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Run git with stdout captured and return it as text.
    async fn capture(&self, args: &[&str]) -> Result<String, GitError> {
        let command = args.join(" ");
        debug!("Capturing git {}", command);

        let output = self
            .command(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| GitError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::NonZeroExit {
                command,
                code: exit_code(output.status),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run git attached to the terminal and return its exit code.
    async fn run_inherited<S: AsRef<OsStr>>(&self, args: &[S]) -> Result<i32, GitError> {
        let command = args
            .iter()
            .map(|arg| arg.as_ref().to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        debug!("Running git {}", command);

        let status = self
            .command(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| GitError::SpawnFailed { command, source })?;

        Ok(exit_code(status))
    }
}

#[async_trait]
impl GitExecutor for SystemGit {
    async fn staged_diff(&self) -> Result<String, GitError> {
        self.capture(&["diff", "--cached"])
            .await
            .map_err(|e| GitError::DiffCapture(Box::new(e)))
    }

    async fn current_branch(&self) -> Result<String, GitError> {
        self.capture(&["rev-parse", "--abbrev-ref", "HEAD"])
            .await
            .map(|branch| branch.trim().to_string())
            .map_err(|e| GitError::BranchCapture(Box::new(e)))
    }

    async fn commit(&self, message: &str) -> Result<i32, GitError> {
        self.run_inherited(&["commit", "-m", message]).await
    }

    async fn passthrough(&self, args: &[OsString]) -> Result<i32, GitError> {
        self.run_inherited(args).await
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(SIGNALED_EXIT_CODE)
}
