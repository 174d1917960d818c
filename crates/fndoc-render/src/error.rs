use std::path::PathBuf;

use fndoc_core::FunctionError;
use thiserror::Error;

/// Error rendering function pages.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A record's name or examples could not be resolved.
    #[error(transparent)]
    Function(#[from] FunctionError),

    /// The page template could not be loaded or compiled.
    #[error("cannot load template '{name}': {source}")]
    TemplateLoad {
        /// Template name, relative to the templates directory.
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// Rendering the template for a function failed.
    #[error("cannot render page for '{}': {source}", .document.display())]
    Template {
        /// Function document being rendered.
        document: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    /// Two documents resolve to the same output page.
    #[error(
        "function '{name}' is defined by both '{}' and '{}'",
        .first.display(),
        .second.display()
    )]
    DuplicateName {
        /// The shared function name.
        name: String,
        /// Document seen first.
        first: PathBuf,
        /// Document seen second.
        second: PathBuf,
    },

    /// The output directory could not be cleared or created.
    #[error("cannot prepare output directory '{}': {source}", .path.display())]
    OutputDir {
        /// Output directory.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A page could not be written.
    #[error("cannot write page '{}': {source}", .path.display())]
    Write {
        /// Page file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
