//! aigit - CLI entry point.
//!
//! `aigit commit` generates a message from the staged diff and commits with
//! it. Any other arguments are passed to git untouched, including `--`,
//! `--help`, `--version` and arguments that are not valid UTF-8.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use aigit::config::{Config, load_env_file};
use aigit::dispatch::{Invocation, dispatch};
use aigit::git::SystemGit;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup_logging();

    // Existing environment variables win over .env entries.
    load_env_file();

    let invocation = Invocation::from_args(std::env::args_os().skip(1));
    let git = SystemGit::new();

    let code = dispatch(invocation, &git, Config::from_env).await?;

    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

/// Set up logging/tracing on stderr.
///
/// Defaults to warnings only; set `RUST_LOG=aigit=debug` for details.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
