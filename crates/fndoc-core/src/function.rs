//! # Function Records
//!
//! A [`FunctionRecord`] is one function document that passed schema
//! validation, together with the file it came from. The document is kept
//! as the raw JSON mapping so the page template sees every field the
//! documentation authors wrote, not just the ones this crate knows about.
//!
//! ## Definition views
//!
//! A document describes its function under one of three keys: `shared`
//! (available on client and server), `client`, or `server`. Exactly one
//! view is authoritative, chosen by the fixed precedence in
//! [`DefinitionKind::PRECEDENCE`]. A key counts as populated only when it
//! holds a non-empty mapping.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::FunctionError;

/// Which definition view of a document is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    /// Defined identically on client and server.
    Shared,
    /// Client-side only.
    Client,
    /// Server-side only.
    Server,
}

impl DefinitionKind {
    /// Resolution order: the first populated view wins.
    pub const PRECEDENCE: [DefinitionKind; 3] = [Self::Shared, Self::Client, Self::Server];

    /// Document key holding this view.
    pub fn key(self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Client => "client",
            Self::Server => "server",
        }
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The authoritative definition of a function, borrowed from its record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Definition<'a> {
    Shared(&'a Map<String, Value>),
    Client(&'a Map<String, Value>),
    Server(&'a Map<String, Value>),
}

impl<'a> Definition<'a> {
    fn new(kind: DefinitionKind, fields: &'a Map<String, Value>) -> Self {
        match kind {
            DefinitionKind::Shared => Self::Shared(fields),
            DefinitionKind::Client => Self::Client(fields),
            DefinitionKind::Server => Self::Server(fields),
        }
    }

    /// Which view this definition came from.
    pub fn kind(&self) -> DefinitionKind {
        match self {
            Self::Shared(_) => DefinitionKind::Shared,
            Self::Client(_) => DefinitionKind::Client,
            Self::Server(_) => DefinitionKind::Server,
        }
    }

    /// All fields of the view.
    pub fn fields(&self) -> &'a Map<String, Value> {
        match *self {
            Self::Shared(fields) | Self::Client(fields) | Self::Server(fields) => fields,
        }
    }

    /// The `name` field, if present and a string.
    pub fn name(&self) -> Option<&'a str> {
        self.fields().get("name").and_then(Value::as_str)
    }

    /// The raw `examples` field. `null` is treated as absent.
    pub fn examples(&self) -> Option<&'a Value> {
        self.fields().get("examples").filter(|v| !v.is_null())
    }
}

/// One validated function document.
///
/// Serializes as the document's own mapping with a `path` key added, which
/// is the shape the page template receives as `function`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionRecord {
    path: PathBuf,
    #[serde(flatten)]
    document: Map<String, Value>,
}

impl FunctionRecord {
    /// Wrap a parsed document loaded from `path`.
    ///
    /// `path` is reserved for the source location; a top-level `path` key
    /// in the document is dropped.
    pub fn new(path: impl Into<PathBuf>, mut document: Map<String, Value>) -> Self {
        document.remove("path");
        Self {
            path: path.into(),
            document,
        }
    }

    /// File this record was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw document, without the attached path.
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    /// Resolve the authoritative definition view.
    ///
    /// # Errors
    ///
    /// [`FunctionError::MissingDefinition`] when no view is populated.
    pub fn definition(&self) -> Result<Definition<'_>, FunctionError> {
        DefinitionKind::PRECEDENCE
            .into_iter()
            .find_map(|kind| match self.document.get(kind.key()) {
                Some(Value::Object(fields)) if !fields.is_empty() => {
                    Some(Definition::new(kind, fields))
                }
                _ => None,
            })
            .ok_or_else(|| FunctionError::MissingDefinition {
                path: self.path.clone(),
            })
    }

    /// The function's name, which is also its page's file stem.
    ///
    /// # Errors
    ///
    /// [`FunctionError::MissingDefinition`] or [`FunctionError::MissingName`]
    /// when the name cannot be found, and [`FunctionError::InvalidName`] when
    /// it is empty or would escape the output directory.
    pub fn name(&self) -> Result<&str, FunctionError> {
        let definition = self.definition()?;
        let name = definition.name().ok_or_else(|| FunctionError::MissingName {
            path: self.path.clone(),
            kind: definition.kind(),
        })?;

        if !is_file_stem(name) {
            return Err(FunctionError::InvalidName {
                path: self.path.clone(),
                name: name.to_string(),
            });
        }

        Ok(name)
    }
}

fn is_file_stem(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
