//! # Example Resolution
//!
//! Function documents declare usage examples by path. The path is relative
//! to the directory of the declaring document, so
//! `functions/Timer/setTimer.yaml` declaring `path: example1.lua` refers to
//! `functions/Timer/example1.lua` regardless of where the generator runs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::FunctionError;
use crate::function::FunctionRecord;

/// An example as declared in a function document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExampleDeclaration {
    /// Example file, relative to the declaring document's directory.
    pub path: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// An example with its source code loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleRecord {
    /// Path as declared, not the resolved path.
    pub path: String,
    pub description: Option<String>,
    /// Verbatim contents of the example file.
    pub code: String,
}

impl FunctionRecord {
    /// The example declarations of the authoritative definition.
    ///
    /// An absent or `null` `examples` field yields an empty list.
    ///
    /// # Errors
    ///
    /// Definition lookup errors, or [`FunctionError::InvalidExamples`] when
    /// the field is not a list of `{path, description}` mappings.
    pub fn example_declarations(&self) -> Result<Vec<ExampleDeclaration>, FunctionError> {
        let Some(examples) = self.definition()?.examples() else {
            return Ok(Vec::new());
        };

        Vec::<ExampleDeclaration>::deserialize(examples).map_err(|e| {
            FunctionError::InvalidExamples {
                path: self.path().to_path_buf(),
                reason: e.to_string(),
            }
        })
    }

    /// Resolve a declared example path against this record's directory.
    pub fn resolve_example_path(&self, example: &str) -> PathBuf {
        self.path()
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(example)
    }

    /// Load every declared example with its code, in declaration order.
    ///
    /// # Errors
    ///
    /// Any [`example_declarations`](Self::example_declarations) error, or
    /// [`FunctionError::ExampleRead`] for the first example file that cannot
    /// be read.
    pub fn examples(&self) -> Result<Vec<ExampleRecord>, FunctionError> {
        self.example_declarations()?
            .into_iter()
            .map(|declaration| -> Result<ExampleRecord, FunctionError> {
                let resolved = self.resolve_example_path(&declaration.path);
                let code = std::fs::read_to_string(&resolved).map_err(|source| {
                    FunctionError::ExampleRead {
                        document: self.path().to_path_buf(),
                        example: resolved.clone(),
                        source,
                    }
                })?;

                tracing::trace!(example = %resolved.display(), "loaded example");
                Ok(ExampleRecord {
                    path: declaration.path,
                    description: declaration.description,
                    code,
                })
            })
            .collect()
    }
}
