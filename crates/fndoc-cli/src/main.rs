//! # fndoc entry point
//!
//! Parses arguments, initialises tracing, and runs the pipeline.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fndoc_cli::{run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = cli.resolve_config().and_then(|config| {
        tracing::debug!(?config, "resolved configuration");
        run(&config)
    });

    match result {
        Ok(summary) => {
            tracing::info!(
                sync = %summary.sync,
                documents = summary.documents,
                skipped = summary.skipped.len(),
                pages = summary.pages.len(),
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
