//! # Function Loading
//!
//! Walks a documentation tree, parses every function document, validates
//! it against the [`FunctionSchema`] and wraps it in a [`FunctionRecord`].
//!
//! A document that cannot be read, does not parse, is not a mapping, or
//! violates the schema is logged at `warn` and left out of the result. The
//! walk itself never fails: unreadable directories are logged and skipped.
//! Symlinked directories are not descended into.

use std::fmt;
use std::path::{Path, PathBuf};

use fndoc_core::FunctionRecord;
use serde_json::Value;

use crate::validate::{parse_document, FunctionSchema, SchemaError};

/// Outcome of loading every function document under a directory.
#[derive(Debug)]
pub struct LoadReport {
    /// Number of candidate documents found.
    pub total: usize,
    /// Documents that passed validation, in path order.
    pub functions: Vec<FunctionRecord>,
    /// Documents that were skipped.
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Number of documents accepted.
    pub fn passed(&self) -> usize {
        self.functions.len()
    }

    /// Number of documents skipped.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// A skipped function document.
#[derive(Debug)]
pub struct LoadFailure {
    /// Document that was skipped.
    pub path: PathBuf,
    /// Why it was skipped.
    pub error: SchemaError,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipping function document: {}", self.error)
    }
}

/// Load and validate every document under `root` whose file name ends with
/// `extension`.
pub fn load_all_functions(root: &Path, extension: &str, schema: &FunctionSchema) -> LoadReport {
    let documents = find_documents(root, extension);
    let total = documents.len();
    let mut functions = Vec::with_capacity(total);
    let mut failures = Vec::new();

    for path in documents {
        match load_function(&path, schema) {
            Ok(record) => functions.push(record),
            Err(error) => {
                let failure = LoadFailure { path, error };
                tracing::warn!(path = %failure.path.display(), "{failure}");
                failures.push(failure);
            }
        }
    }

    tracing::info!(
        total,
        passed = functions.len(),
        failed = failures.len(),
        root = %root.display(),
        "loaded function documents"
    );

    LoadReport {
        total,
        functions,
        failures,
    }
}

/// Parse and validate a single function document.
///
/// # Errors
///
/// [`SchemaError::DocumentLoad`] if the file cannot be read or parsed or is
/// not a mapping; [`SchemaError::ValidationFailed`] if it violates the schema.
pub fn load_function(path: &Path, schema: &FunctionSchema) -> Result<FunctionRecord, SchemaError> {
    let load_error = |reason: String| SchemaError::DocumentLoad {
        path: path.to_path_buf(),
        reason,
    };

    let content = std::fs::read_to_string(path)
        .map_err(|e| load_error(format!("cannot read file: {e}")))?;
    let document = parse_document(path, &content).map_err(load_error)?;

    schema
        .validate(&document)
        .map_err(|violations| SchemaError::ValidationFailed {
            path: path.to_path_buf(),
            violations,
        })?;

    match document {
        Value::Object(map) => Ok(FunctionRecord::new(path, map)),
        other => Err(load_error(format!(
            "top level must be a mapping, found {}",
            kind_of(&other)
        ))),
    }
}

/// Recursively find files under `root` whose name ends with `extension`.
///
/// Results are sorted so runs are reproducible. A missing root yields an
/// empty list.
pub fn find_documents(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut results = Vec::new();
    walk_for_documents(root, extension, &mut results);
    results.sort();
    results
}

fn walk_for_documents(dir: &Path, extension: &str, acc: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(
                dir = %dir.display(),
                error = %e,
                "failed to read directory during document walk"
            );
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to stat directory entry");
                continue;
            }
        };
        if file_type.is_dir() {
            walk_for_documents(&path, extension, acc);
        } else if file_type.is_symlink() && path.is_dir() {
            tracing::debug!(path = %path.display(), "not following directory symlink");
        } else if path
            .file_name()
            .and_then(|f| f.to_str())
            .is_some_and(|name| name.ends_with(extension))
        {
            acc.push(path);
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
