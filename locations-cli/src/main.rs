//! Binary crate for the `locations` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive prompts for each location action
//! - Human-friendly output formatting

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod console;
mod flows;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    init_tracing(cmd.verbose);

    match cmd.run().await {
        Err(err) if console::is_interrupt(&err) => {
            tracing::debug!("Interrupted: {err}");
            Ok(())
        }
        other => other,
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the level.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
