//! # Schema Validation
//!
//! Loads the function schema and validates function documents against it.
//!
//! The schema is a JSON Schema document, conventionally written in YAML
//! (`schemas/function.yaml` in the docs repository). Documents and schema
//! alike are parsed as YAML and converted to `serde_json::Value` before
//! validation, so YAML-only constructs (tags, non-string keys, merge keys)
//! are normalised first.
//!
//! ## Schema Resolution
//!
//! Internal `$ref`s (`#/$defs/...`) are resolved by the jsonschema crate.
//! Any other `$ref` is resolved by file name against the directory holding
//! the schema, e.g. `$ref: example.yaml` loads `schemas/example.yaml`.

use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

/// Error loading the schema or a function document.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be read or parsed.
    #[error("schema load error for '{}': {reason}", .path.display())]
    SchemaLoad {
        /// Schema file.
        path: PathBuf,
        /// Why the schema could not be loaded.
        reason: String,
    },

    /// The schema parsed but is not a usable JSON Schema.
    #[error("validator build error for schema '{}': {reason}", .path.display())]
    ValidatorBuild {
        /// Schema file.
        path: PathBuf,
        /// Compilation failure reported by jsonschema.
        reason: String,
    },

    /// A function document could not be read or parsed.
    #[error("document load error for '{}': {reason}", .path.display())]
    DocumentLoad {
        /// Document file.
        path: PathBuf,
        /// Why the document could not be loaded.
        reason: String,
    },

    /// A function document does not conform to the schema.
    #[error("validation failed for '{}':\n{violations}", .path.display())]
    ValidationFailed {
        /// Document file.
        path: PathBuf,
        /// Every violated constraint.
        violations: ValidationViolations,
    },
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating field in the document.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that failed.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// All violations found in one document. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Always false for violations produced by validation.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Resolves non-local `$ref`s to files next to the schema.
struct SiblingSchemaRetriever {
    dir: PathBuf,
}

impl Retrieve for SiblingSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if filename.is_empty() {
            return Err(format!("cannot resolve schema reference '{uri_str}'").into());
        }

        let path = self.dir.join(filename);
        tracing::debug!(uri = uri_str, path = %path.display(), "resolving schema reference");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read referenced schema '{}': {e}", path.display()))?;
        Ok(parse_document(&path, &content)?)
    }
}

/// The compiled function schema.
pub struct FunctionSchema {
    path: PathBuf,
    schema: Value,
    validator: Validator,
}

impl fmt::Debug for FunctionSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionSchema")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Load and compile the schema at `path`.
///
/// # Errors
///
/// [`SchemaError::SchemaLoad`] if the file is missing, unreadable or not
/// well-formed; [`SchemaError::ValidatorBuild`] if it is not a valid JSON
/// Schema or a `$ref` cannot be resolved.
pub fn load_schema(path: impl AsRef<Path>) -> Result<FunctionSchema, SchemaError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::SchemaLoad {
        path: path.to_path_buf(),
        reason: format!("cannot read file: {e}"),
    })?;
    let schema = parse_document(path, &content).map_err(|reason| SchemaError::SchemaLoad {
        path: path.to_path_buf(),
        reason,
    })?;

    FunctionSchema::compile(path, schema)
}

impl FunctionSchema {
    /// Compile an already-parsed schema. `path` locates sibling `$ref`s.
    pub fn compile(path: impl Into<PathBuf>, schema: Value) -> Result<Self, SchemaError> {
        let path = path.into();
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        let mut opts = jsonschema::options();
        opts.with_retriever(SiblingSchemaRetriever { dir });
        let validator = opts.build(&schema).map_err(|e| SchemaError::ValidatorBuild {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        tracing::debug!(schema = %path.display(), "compiled function schema");
        Ok(Self {
            path,
            schema,
            validator,
        })
    }

    /// The schema file this was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The schema document, unmodified.
    pub fn as_value(&self) -> &Value {
        &self.schema
    }

    /// Validate a parsed document, collecting every violation.
    pub fn validate(&self, instance: &Value) -> Result<(), ValidationViolations> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationViolations { violations })
        }
    }
}

/// Parse file content as JSON (`.json`) or YAML (anything else).
pub(crate) fn parse_document(path: &Path, content: &str) -> Result<Value, String> {
    if path.extension().and_then(|e| e.to_str()) == Some("json") {
        return serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"));
    }

    let mut yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}"))?;
    yaml.apply_merge()
        .map_err(|e| format!("invalid YAML merge key: {e}"))?;
    yaml_to_json(&yaml)
}

/// Convert a YAML value tree into the equivalent JSON value tree.
///
/// Tags are dropped. Scalar mapping keys are stringified; sequence or
/// mapping keys are rejected since JSON cannot represent them.
fn yaml_to_json(yaml: &serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                let f = n.as_f64().ok_or_else(|| format!("unsupported YAML number: {n}"))?;
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent {n} in JSON"))?
            }
        }
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Sequence(seq) => Value::Array(seq.iter().map(yaml_to_json).collect::<Result<_, _>>()?),
        Yaml::Mapping(map) => {
            let mut object = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                let key = match k {
                    Yaml::String(s) => s.clone(),
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    Yaml::Null => "null".to_string(),
                    other => return Err(format!("unsupported YAML mapping key: {other:?}")),
                };
                object.insert(key, yaml_to_json(v)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(&tagged.value)?,
    })
}
