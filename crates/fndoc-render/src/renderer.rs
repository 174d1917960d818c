//! # Page Renderer
//!
//! Wraps a minijinja [`Environment`] loading templates from a directory.
//! Auto-escaping is off for every template: the page template decides what
//! to escape, as it would under a default Jinja2 environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fndoc_core::FunctionRecord;
use minijinja::{context, path_loader, AutoEscape, Environment};

use crate::error::RenderError;
use crate::links::rewrite_links;

/// Pages written by [`PageRenderer::render_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    /// Directory the pages were written to.
    pub output_dir: PathBuf,
    /// One page per function, in record order.
    pub pages: Vec<PathBuf>,
}

/// Renders function pages from one template.
#[derive(Debug)]
pub struct PageRenderer {
    env: Environment<'static>,
    template: String,
}

impl PageRenderer {
    /// Load `template` from `templates_dir`.
    ///
    /// The template is compiled immediately so a missing or broken template
    /// is reported before any output is touched.
    ///
    /// # Errors
    ///
    /// [`RenderError::TemplateLoad`] if the template cannot be found or
    /// does not compile.
    pub fn new(templates_dir: impl AsRef<Path>, template: &str) -> Result<Self, RenderError> {
        let mut env = base_environment();
        env.set_loader(path_loader(templates_dir.as_ref()));
        Self::with_environment(env, template)
    }

    /// Use `source` as the page template instead of loading it from disk.
    pub fn from_source(source: &str) -> Result<Self, RenderError> {
        const NAME: &str = "function.html";

        let mut env = base_environment();
        env.add_template_owned(NAME, source.to_string())
            .map_err(|source| RenderError::TemplateLoad {
                name: NAME.to_string(),
                source,
            })?;
        Self::with_environment(env, NAME)
    }

    fn with_environment(env: Environment<'static>, template: &str) -> Result<Self, RenderError> {
        env.get_template(template)
            .map_err(|source| RenderError::TemplateLoad {
                name: template.to_string(),
                source,
            })?;

        Ok(Self {
            env,
            template: template.to_string(),
        })
    }

    /// Render the page for one function, with cross-references rewritten.
    ///
    /// # Errors
    ///
    /// [`RenderError::Function`] if the record's name or examples cannot be
    /// resolved (including a missing example file), and
    /// [`RenderError::Template`] if the template fails at render time.
    pub fn render_page(&self, record: &FunctionRecord) -> Result<String, RenderError> {
        let name = record.name()?;
        let examples = record.examples()?;

        let html = self
            .env
            .get_template(&self.template)
            .and_then(|template| {
                template.render(context! {
                    function => record,
                    function_name => name,
                    function_examples => examples,
                })
            })
            .map_err(|source| RenderError::Template {
                document: record.path().to_path_buf(),
                source,
            })?;

        Ok(rewrite_links(&html).into_owned())
    }

    /// Replace `output_dir` with one `<name>.html` page per record.
    ///
    /// Names are checked for collisions first; on a collision nothing is
    /// deleted or written. Otherwise the directory is removed, recreated
    /// empty, and filled. A failure part-way leaves the pages written so far.
    ///
    /// # Errors
    ///
    /// [`RenderError::DuplicateName`] on a name collision,
    /// [`RenderError::OutputDir`] or [`RenderError::Write`] on I/O failure,
    /// and any [`render_page`](Self::render_page) error.
    pub fn render_all(
        &self,
        records: &[FunctionRecord],
        output_dir: &Path,
    ) -> Result<RenderSummary, RenderError> {
        let named = unique_names(records)?;
        reset_output_dir(output_dir)?;

        let mut pages = Vec::with_capacity(named.len());
        for (name, record) in named {
            let html = self.render_page(record)?;
            let page = output_dir.join(format!("{name}.html"));
            std::fs::write(&page, html).map_err(|source| RenderError::Write {
                path: page.clone(),
                source,
            })?;

            tracing::info!(page = %page.display(), "generated page");
            pages.push(page);
        }

        Ok(RenderSummary {
            output_dir: output_dir.to_path_buf(),
            pages,
        })
    }
}

fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env
}

/// Resolve every record's name, failing on the first duplicate.
fn unique_names(records: &[FunctionRecord]) -> Result<Vec<(&str, &FunctionRecord)>, RenderError> {
    let mut seen: HashMap<&str, &Path> = HashMap::with_capacity(records.len());
    let mut named = Vec::with_capacity(records.len());

    for record in records {
        let name = record.name()?;
        if let Some(first) = seen.insert(name, record.path()) {
            return Err(RenderError::DuplicateName {
                name: name.to_string(),
                first: first.to_path_buf(),
                second: record.path().to_path_buf(),
            });
        }
        named.push((name, record));
    }

    Ok(named)
}

fn reset_output_dir(dir: &Path) -> Result<(), RenderError> {
    let io_error = |source: std::io::Error| RenderError::OutputDir {
        path: dir.to_path_buf(),
        source,
    };

    if dir.exists() {
        tracing::debug!(dir = %dir.display(), "removing previous output");
        std::fs::remove_dir_all(dir).map_err(io_error)?;
    }
    std::fs::create_dir_all(dir).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(path: &Path, document: Value) -> FunctionRecord {
        let Value::Object(map) = document else {
            panic!("test document must be an object");
        };
        FunctionRecord::new(path, map)
    }

    #[test]
    fn bindings_reach_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ex.lua"), "setTimer(...)").unwrap();
        let r = record(
            &dir.path().join("isTimer.yaml"),
            json!({
                "shared": {
                    "name": "isTimer",
                    "description": "Checks a timer.",
                    "examples": [{ "path": "ex.lua", "description": "basic use" }],
                }
            }),
        );

        let renderer = PageRenderer::from_source(
            "<h1>{{ function_name }}</h1>\
             <p>{{ function.shared.description }}</p>\
             {% for e in function_examples %}<i>{{ e.description }}</i><pre>{{ e.code }}</pre>{% endfor %}",
        )
        .unwrap();

        let html = renderer.render_page(&r).unwrap();
        assert_eq!(
            html,
            "<h1>isTimer</h1><p>Checks a timer.</p><i>basic use</i><pre>setTimer(...)</pre>"
        );
    }

    #[test]
    fn function_binding_includes_path() {
        let r = record(
            Path::new("functions/Timer/isTimer.yaml"),
            json!({ "shared": { "name": "isTimer" } }),
        );
        let renderer = PageRenderer::from_source("{{ function.path }}").unwrap();
        assert_eq!(renderer.render_page(&r).unwrap(), "functions/Timer/isTimer.yaml");
    }

    #[test]
    fn output_is_not_autoescaped_and_links_rewritten() {
        let r = record(
            Path::new("setTimer.yaml"),
            json!({ "shared": { "name": "setTimer", "note": "<b>see [[killTimer]]</b>" } }),
        );
        let renderer = PageRenderer::from_source("{{ function.shared.note }}").unwrap();
        assert_eq!(
            renderer.render_page(&r).unwrap(),
            r#"<b>see <a href="killTimer.html">killTimer</a></b>"#
        );
    }

    #[test]
    fn missing_template_fails_early() {
        let dir = tempfile::tempdir().unwrap();
        let err = PageRenderer::new(dir.path(), "function.html").unwrap_err();
        assert!(matches!(err, RenderError::TemplateLoad { .. }), "got: {err}");
    }

    #[test]
    fn broken_template_fails_early() {
        let err = PageRenderer::from_source("{% for %}").unwrap_err();
        assert!(matches!(err, RenderError::TemplateLoad { .. }), "got: {err}");
    }

    #[test]
    fn missing_definition_propagates() {
        let r = record(Path::new("orphan.yaml"), json!({ "description": "x" }));
        let renderer = PageRenderer::from_source("{{ function_name }}").unwrap();
        assert!(matches!(
            renderer.render_page(&r).unwrap_err(),
            RenderError::Function(fndoc_core::FunctionError::MissingDefinition { .. })
        ));
    }

    #[test]
    fn duplicate_names_leave_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("html");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("keep.html"), "old").unwrap();

        let records = [
            record(Path::new("a/setTimer.yaml"), json!({ "shared": { "name": "setTimer" } })),
            record(Path::new("b/setTimer.yaml"), json!({ "client": { "name": "setTimer" } })),
        ];
        let renderer = PageRenderer::from_source("{{ function_name }}").unwrap();

        match renderer.render_all(&records, &out).unwrap_err() {
            RenderError::DuplicateName { name, first, second } => {
                assert_eq!(name, "setTimer");
                assert_eq!(first, PathBuf::from("a/setTimer.yaml"));
                assert_eq!(second, PathBuf::from("b/setTimer.yaml"));
            }
            other => panic!("Expected DuplicateName, got: {other}"),
        }
        assert!(out.join("keep.html").exists());
    }

    #[test]
    fn render_all_replaces_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("html");
        std::fs::create_dir_all(out.join("nested")).unwrap();
        std::fs::write(out.join("stale.html"), "stale").unwrap();

        let records = [
            record(Path::new("isTimer.yaml"), json!({ "shared": { "name": "isTimer" } })),
            record(Path::new("kickPlayer.yaml"), json!({ "server": { "name": "kickPlayer" } })),
        ];
        let renderer = PageRenderer::from_source("{{ function_name }}").unwrap();
        let summary = renderer.render_all(&records, &out).unwrap();

        assert_eq!(summary.output_dir, out);
        assert_eq!(
            summary.pages,
            [out.join("isTimer.html"), out.join("kickPlayer.html")]
        );
        assert!(!out.join("stale.html").exists());
        assert!(!out.join("nested").exists());
        assert_eq!(std::fs::read_to_string(out.join("kickPlayer.html")).unwrap(), "kickPlayer");
    }

    #[test]
    fn render_all_creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("deep").join("html");
        let renderer = PageRenderer::from_source("x").unwrap();
        let summary = renderer.render_all(&[], &out).unwrap();
        assert!(out.is_dir());
        assert!(summary.pages.is_empty());
    }
}
