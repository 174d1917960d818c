//! # Command-Line Arguments
//!
//! Every flag is optional. Flags override values from `--config`, which in
//! turn override [`Config::default`].

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use fndoc_core::Config;

/// Generate HTML reference pages from YAML function documents.
///
/// Syncs the documentation repository, validates every function document
/// against the repository's schema, and renders one page per function.
#[derive(Parser, Debug)]
#[command(name = "fndoc", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Local working copy of the documentation repository.
    #[arg(long, value_name = "DIR")]
    pub repo_path: Option<PathBuf>,

    /// Directory containing the page template.
    #[arg(long, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Output directory. Replaced entirely on every run.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not clone or pull the documentation repository.
    #[arg(long)]
    pub no_sync: bool,
}

impl Cli {
    /// Build the effective configuration.
    ///
    /// # Errors
    ///
    /// Fails if `--config` names a file that cannot be read or parsed.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_yaml_file(path)?,
            None => Config::default(),
        };

        if let Some(repo_path) = &self.repo_path {
            config.repo_path = repo_path.clone();
        }
        if let Some(templates_dir) = &self.templates_dir {
            config.templates_dir = templates_dir.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if self.no_sync {
            config.sync = false;
        }

        Ok(config)
    }

    /// Default log filter for the verbosity level.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
