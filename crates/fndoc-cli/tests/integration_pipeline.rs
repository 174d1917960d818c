//! End-to-end tests: a docs repository laid out like the wiki, a page
//! template, and a full `run` with sync disabled.

use std::path::{Path, PathBuf};
use std::process::Command;

use fndoc_cli::{run, SyncOutcome};
use fndoc_core::Config;

const FUNCTION_SCHEMA: &str = r##"
type: object
properties:
  shared: { $ref: "#/$defs/function" }
  client: { $ref: "#/$defs/function" }
  server: { $ref: "#/$defs/function" }
anyOf:
  - required: [shared]
  - required: [client]
  - required: [server]
$defs:
  function:
    type: object
    required: [name]
    properties:
      name: { type: string }
      description: { type: string }
      examples:
        type: array
        items:
          type: object
          required: [path, description]
          properties:
            path: { type: string }
            description: { type: string }
"##;

const TEMPLATE: &str = r#"<h1>{{ function_name }}</h1>
{% if function.shared.description %}<p>{{ function.shared.description }}</p>{% endif %}
{% for example in function_examples %}<h2>{{ example.description }}</h2>
<pre>{{ example.code }}</pre>
{% endfor %}"#;

struct Workspace {
    _dir: tempfile::TempDir,
    config: Config,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let config = Config {
            repo_path: root.join("input").join("wiki"),
            templates_dir: root.join("templates"),
            output_dir: root.join("output").join("html"),
            sync: false,
            ..Config::default()
        };

        write(&config.schema_file(), FUNCTION_SCHEMA);
        write(&config.template_file(), TEMPLATE);
        Self { _dir: dir, config }
    }

    fn document(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.config.functions_root().join(rel);
        write(&path, content);
        path
    }

    fn page(&self, name: &str) -> PathBuf {
        self.config.output_dir.join(format!("{name}.html"))
    }
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn is_timer_end_to_end() {
    let ws = Workspace::new();
    ws.document(
        "Timer/isTimer.yaml",
        "shared:\n  name: isTimer\n  description: Use [[setTimer]] first.\n  examples:\n    - path: ex.lua\n      description: basic use\n",
    );
    ws.document("Timer/ex.lua", "setTimer(...)");

    let summary = run(&ws.config).unwrap();
    assert_eq!(summary.sync, SyncOutcome::Skipped);
    assert_eq!(summary.documents, 1);
    assert!(summary.skipped.is_empty());
    assert_eq!(summary.pages, [ws.page("isTimer")]);

    let html = std::fs::read_to_string(ws.page("isTimer")).unwrap();
    assert!(html.contains("<h1>isTimer</h1>"));
    assert!(html.contains("setTimer(...)"));
    assert!(html.contains("<h2>basic use</h2>"));
    assert!(html.contains(r#"Use <a href="setTimer.html">setTimer</a> first."#));
}

#[test]
fn invalid_documents_skipped_others_rendered() {
    let ws = Workspace::new();
    ws.document("Timer/isTimer.yaml", "shared:\n  name: isTimer\n");
    ws.document("Player/kickPlayer.yaml", "server:\n  name: kickPlayer\n");
    let invalid = ws.document("Timer/killTimer.yaml", "shared:\n  name: [not, a, string]\n");
    let unparsable = ws.document("Timer/resetTimer.yaml", "shared: {\n");

    let summary = run(&ws.config).unwrap();
    assert_eq!(summary.documents, 4);
    assert_eq!(summary.skipped.len(), 2);
    assert!(summary.skipped.contains(&invalid));
    assert!(summary.skipped.contains(&unparsable));

    assert!(ws.page("isTimer").exists());
    assert!(ws.page("kickPlayer").exists());
    assert_eq!(std::fs::read_dir(&ws.config.output_dir).unwrap().count(), 2);
}

#[test]
fn second_run_is_identical_and_purges_stale_pages() {
    let ws = Workspace::new();
    ws.document("Timer/isTimer.yaml", "shared:\n  name: isTimer\n");
    write(&ws.page("stale"), "old page");

    run(&ws.config).unwrap();
    assert!(!ws.page("stale").exists());
    let first = std::fs::read(ws.page("isTimer")).unwrap();

    run(&ws.config).unwrap();
    let second = std::fs::read(ws.page("isTimer")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_schema_is_fatal() {
    let ws = Workspace::new();
    std::fs::remove_file(ws.config.schema_file()).unwrap();

    let err = run(&ws.config).unwrap_err();
    assert!(format!("{err:#}").contains("function.yaml"), "got: {err:#}");
}

#[test]
fn missing_example_is_fatal() {
    let ws = Workspace::new();
    ws.document(
        "Timer/setTimer.yaml",
        "shared:\n  name: setTimer\n  examples:\n    - path: missing.lua\n      description: gone\n",
    );

    let err = run(&ws.config).unwrap_err();
    assert!(format!("{err:#}").contains("missing.lua"), "got: {err:#}");
}

#[test]
fn duplicate_names_are_fatal() {
    let ws = Workspace::new();
    ws.document("Client/setTimer.yaml", "client:\n  name: setTimer\n");
    ws.document("Server/setTimer.yaml", "server:\n  name: setTimer\n");

    let err = run(&ws.config).unwrap_err();
    assert!(format!("{err:#}").contains("setTimer"), "got: {err:#}");
    assert!(!ws.config.output_dir.exists());
}

#[test]
fn binary_exit_codes() {
    let ws = Workspace::new();
    ws.document("Timer/isTimer.yaml", "shared:\n  name: isTimer\n");

    let config_file = ws.config.repo_path.parent().unwrap().join("fndoc.yaml");
    write(
        &config_file,
        &format!(
            "repo_path: {:?}\ntemplates_dir: {:?}\noutput_dir: {:?}\n",
            ws.config.repo_path, ws.config.templates_dir, ws.config.output_dir
        ),
    );

    let status = Command::new(env!("CARGO_BIN_EXE_fndoc"))
        .arg("--config")
        .arg(&config_file)
        .arg("--no-sync")
        .env_remove("RUST_LOG")
        .status()
        .unwrap();
    assert!(status.success());
    assert!(ws.page("isTimer").exists());

    std::fs::remove_file(ws.config.schema_file()).unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_fndoc"))
        .arg("--config")
        .arg(&config_file)
        .arg("--no-sync")
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
}
