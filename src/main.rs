//! Strictly Mastermind - terminal game entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use strictly_mastermind::{SessionManager, StdConsole};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing(cli.verbose);

    run(&cli)
}

/// Logs go to stderr so the game transcript on stdout stays clean.
fn initialize_tracing(verbose: bool) {
    let default = if verbose {
        "warn,strictly_mastermind=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[instrument(skip_all)]
fn run(cli: &Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    let rules = config.validate()?;
    info!(
        code_length = rules.code_length(),
        code_range = rules.code_range(),
        max_attempts = rules.max_attempts(),
        offline = *config.offline(),
        "Starting session"
    );

    let source = config.build_source()?;
    let mut session = SessionManager::from_config(&config, StdConsole::stdio(), source)?;
    session.run()?;
    Ok(())
}
