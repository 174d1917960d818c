//! # Error Types
//!
//! Errors raised while reading configuration and while deriving fields
//! from a function record. All use `thiserror`.

use std::path::PathBuf;

use thiserror::Error;

use crate::function::DefinitionKind;

/// Error deriving a field from a [`FunctionRecord`](crate::FunctionRecord).
///
/// A record that passed schema validation but still trips one of these
/// indicates a gap between the schema and the documents. These errors are
/// propagated, never skipped.
#[derive(Error, Debug)]
pub enum FunctionError {
    /// None of `shared`, `client` or `server` is populated.
    #[error("{}: no shared, client or server definition present", .path.display())]
    MissingDefinition {
        /// Document the record was loaded from.
        path: PathBuf,
    },

    /// The resolved definition has no string `name`.
    #[error("{}: {kind} definition has no string 'name'", .path.display())]
    MissingName {
        /// Document the record was loaded from.
        path: PathBuf,
        /// Which definition view was resolved.
        kind: DefinitionKind,
    },

    /// The name cannot be used as an output file name.
    #[error("{}: function name {name:?} is not a valid file name", .path.display())]
    InvalidName {
        /// Document the record was loaded from.
        path: PathBuf,
        /// The offending name.
        name: String,
    },

    /// The `examples` entry is not a sequence of `{path, description}`.
    #[error("{}: malformed examples: {reason}", .path.display())]
    InvalidExamples {
        /// Document the record was loaded from.
        path: PathBuf,
        /// Deserialization failure.
        reason: String,
    },

    /// An example file could not be read.
    #[error("{}: cannot read example {}: {source}", .document.display(), .example.display())]
    ExampleRead {
        /// Document that declared the example.
        document: PathBuf,
        /// Resolved example file path.
        example: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Error loading a [`Config`](crate::Config) file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML or has unknown keys.
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// YAML deserialization failure.
        #[source]
        source: serde_yaml::Error,
    },
}
