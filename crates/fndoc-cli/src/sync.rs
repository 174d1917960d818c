//! # Repository Sync
//!
//! Keeps the local working copy of the documentation repository current by
//! shelling out to `git`: clone when the working copy is absent, pull when
//! it exists. Sync failures never abort a run; rendering proceeds against
//! whatever is on disk.

use std::fmt;
use std::path::Path;
use std::process::Command;

/// What the sync step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Sync was disabled by configuration.
    Skipped,
    /// The repository was cloned.
    Cloned,
    /// An existing working copy was pulled.
    Pulled,
    /// git failed; the reason is git's stderr or the spawn error.
    Failed(String),
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => f.write_str("skipped"),
            Self::Cloned => f.write_str("cloned"),
            Self::Pulled => f.write_str("pulled"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Clone `url` into `path`, or pull if `path` already exists.
pub fn sync_repository(url: &str, path: &Path) -> SyncOutcome {
    let outcome = if path.exists() {
        pull(path)
    } else {
        clone(url, path)
    };

    match &outcome {
        SyncOutcome::Failed(reason) => {
            tracing::error!(repo = url, path = %path.display(), "repository sync failed: {reason}");
        }
        done => {
            tracing::info!(repo = url, path = %path.display(), "repository {done}");
        }
    }
    outcome
}

fn pull(path: &Path) -> SyncOutcome {
    let path = match std::path::absolute(path) {
        Ok(p) => p,
        Err(e) => return SyncOutcome::Failed(format!("cannot resolve {}: {e}", path.display())),
    };
    // git would otherwise walk up and pull whatever repository encloses `path`.
    if !path.join(".git").exists() {
        return SyncOutcome::Failed(format!(
            "{} exists but is not the root of a git working copy",
            path.display()
        ));
    }

    let mut cmd = git();
    cmd.arg("-C").arg(&path).arg("pull");
    // Ceiling entries must be absolute or git ignores them.
    if let Some(parent) = path.parent() {
        cmd.env("GIT_CEILING_DIRECTORIES", parent);
    }

    match run(cmd) {
        Ok(()) => SyncOutcome::Pulled,
        Err(reason) => SyncOutcome::Failed(reason),
    }
}

fn clone(url: &str, path: &Path) -> SyncOutcome {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            return SyncOutcome::Failed(format!("cannot create {}: {e}", parent.display()));
        }
    }

    let mut cmd = git();
    cmd.arg("clone").arg(url).arg(path);
    match run(cmd) {
        Ok(()) => SyncOutcome::Cloned,
        Err(reason) => SyncOutcome::Failed(reason),
    }
}

fn git() -> Command {
    let mut cmd = Command::new("git");
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd
}

fn run(mut cmd: Command) -> Result<(), String> {
    tracing::debug!(command = ?cmd, "running git");
    let output = cmd.output().map_err(|e| format!("cannot run git: {e}"))?;
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        Err(format!("git exited with {}", output.status))
    } else {
        Err(stderr.to_string())
    }
}
