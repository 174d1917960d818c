//! # fndoc-cli — Function Reference Generator
//!
//! Provides the `fndoc` command. One invocation runs the whole pipeline:
//!
//! 1. Sync the documentation repository (clone or pull).
//! 2. Load the function schema. Failure here is fatal.
//! 3. Load and validate every function document. Bad documents are logged
//!    and skipped.
//! 4. Render one HTML page per function into a freshly emptied output
//!    directory.
//!
//! With no flags, the MTA:SA wiki layout from [`Config::default`] is used:
//!
//! ```bash
//! fndoc
//! fndoc --no-sync --output-dir site/
//! fndoc --config fndoc.yaml -v
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; pipeline stages live in the library
//!   crates and are only sequenced by [`run`].
//! - `anyhow` is confined to this crate.

pub mod args;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};
use fndoc_core::Config;
use fndoc_render::PageRenderer;
use fndoc_schema::{load_all_functions, load_schema};

pub use args::Cli;
pub use sync::{sync_repository, SyncOutcome};

/// What one pipeline run did.
#[derive(Debug)]
pub struct RunSummary {
    /// Result of the repository sync step.
    pub sync: SyncOutcome,
    /// Function documents found.
    pub documents: usize,
    /// Documents skipped because they failed to parse or validate.
    pub skipped: Vec<PathBuf>,
    /// Pages written.
    pub pages: Vec<PathBuf>,
}

/// Run the full sync → validate → render pipeline.
///
/// # Errors
///
/// Fails if the schema or template cannot be loaded, if a validated record
/// cannot be rendered (missing name, missing example file, duplicate name),
/// or if the output directory cannot be written. Sync failures and invalid
/// documents are not errors.
pub fn run(config: &Config) -> Result<RunSummary> {
    let sync = if config.sync {
        sync_repository(&config.repo_url, &config.repo_path)
    } else {
        tracing::info!(path = %config.repo_path.display(), "repository sync disabled");
        SyncOutcome::Skipped
    };

    let schema_path = config.schema_file();
    let schema = load_schema(&schema_path)
        .with_context(|| format!("failed to load function schema {}", schema_path.display()))?;

    let report = load_all_functions(
        &config.functions_root(),
        &config.document_extension,
        &schema,
    );

    let renderer = PageRenderer::new(&config.templates_dir, &config.function_template)
        .with_context(|| {
            format!(
                "failed to load page template {}",
                config.template_file().display()
            )
        })?;
    let rendered = renderer
        .render_all(&report.functions, &config.output_dir)
        .context("failed to render function pages")?;

    Ok(RunSummary {
        sync,
        documents: report.total,
        skipped: report.failures.into_iter().map(|f| f.path).collect(),
        pages: rendered.pages,
    })
}
