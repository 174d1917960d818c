//! Integration test: syncing a relative working-copy path that sits inside
//! an unrelated git repository. Kept alone in this binary because it
//! changes the process working directory.

use std::path::Path;
use std::process::Command;

use fndoc_cli::{sync_repository, SyncOutcome};

fn git(dir: &Path, args: &[&str]) -> bool {
    Command::new("git")
        .current_dir(dir)
        .args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn head(dir: &Path) -> Vec<u8> {
    Command::new("git")
        .current_dir(dir)
        .args(["rev-parse", "HEAD"])
        .output()
        .map(|o| o.stdout)
        .unwrap_or_default()
}

#[test]
fn relative_path_never_pulls_enclosing_repository() {
    let dir = tempfile::tempdir().unwrap();
    let outer = dir.path().join("outer");
    std::fs::create_dir_all(&outer).unwrap();

    let have_git = git(&outer, &["init", "-q"])
        && git(&outer, &["-c", "user.name=t", "-c", "user.email=t@t", "commit", "-q", "--allow-empty", "-m", "a"]);
    if !have_git {
        // Without git the enclosing repository is simulated by its marker.
        std::fs::create_dir_all(outer.join(".git")).unwrap();
    }
    let before = head(&outer);

    std::fs::create_dir_all(outer.join("input").join("mtasa-wiki")).unwrap();
    std::env::set_current_dir(&outer).unwrap();

    let outcome = sync_repository(
        "https://invalid.example/mtasa-wiki.git",
        Path::new("./input/mtasa-wiki"),
    );
    match &outcome {
        SyncOutcome::Failed(reason) => {
            assert!(reason.contains("not the root of a git working copy"), "got: {reason}")
        }
        other => panic!("expected failure, got: {other}"),
    }
    assert_eq!(head(&outer), before);

    std::env::set_current_dir(dir.path()).unwrap();
}
