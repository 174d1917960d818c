//! # Pipeline Configuration
//!
//! Every location the pipeline touches lives in [`Config`]. The defaults
//! reproduce the layout of the MTA:SA wiki docs build: the docs repository
//! is checked out under `./input/`, templates live under
//! `./output/templates/`, and pages are written to `./output/html/`.
//!
//! Paths inside the repository (`schema_path`, `functions_dir`) are
//! relative to `repo_path`; the template file is relative to
//! `templates_dir`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default remote of the documentation repository.
pub const DEFAULT_REPO_URL: &str = "https://github.com/multitheftauto/mtasa-wiki.git";

/// Configuration for one generator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Remote cloned when `repo_path` does not exist yet.
    pub repo_url: String,
    /// Local working copy of the documentation repository.
    pub repo_path: PathBuf,
    /// Function schema, relative to `repo_path`.
    pub schema_path: PathBuf,
    /// Root of the function documents, relative to `repo_path`.
    pub functions_dir: PathBuf,
    /// File name suffix identifying function documents.
    pub document_extension: String,
    /// Directory the template loader is rooted at.
    pub templates_dir: PathBuf,
    /// Page template, relative to `templates_dir`.
    pub function_template: String,
    /// Output directory. Deleted and recreated on every run.
    pub output_dir: PathBuf,
    /// Whether to clone or pull `repo_url` before rendering.
    pub sync: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo_url: DEFAULT_REPO_URL.to_string(),
            repo_path: PathBuf::from("./input/mtasa-wiki"),
            schema_path: PathBuf::from("schemas/function.yaml"),
            functions_dir: PathBuf::from("functions"),
            document_extension: ".yaml".to_string(),
            templates_dir: PathBuf::from("./output/templates"),
            function_template: "function.html".to_string(),
            output_dir: PathBuf::from("./output/html"),
            sync: true,
        }
    }
}

impl Config {
    /// Load a config from a YAML file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid YAML or names an unknown key.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a config from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Full path of the function schema.
    pub fn schema_file(&self) -> PathBuf {
        self.repo_path.join(&self.schema_path)
    }

    /// Full path of the function documents root.
    pub fn functions_root(&self) -> PathBuf {
        self.repo_path.join(&self.functions_dir)
    }

    /// Full path of the page template.
    pub fn template_file(&self) -> PathBuf {
        self.templates_dir.join(&self.function_template)
    }
}
