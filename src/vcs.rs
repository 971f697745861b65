//! Source-control revision lookup for the release fallback.
//!
//! Shells out to `git` the same way the build script does, but at run
//! time and against the working tree the notification is sent from.

use std::path::Path;
use std::process::Command;

/// Full commit hash of `HEAD` in the repository containing `dir`.
///
/// `None` when `dir` is not inside a git work tree, `HEAD` has no
/// commits yet, or git is not installed.
#[must_use]
pub fn head_revision(dir: &Path) -> Option<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["rev-parse", "--verify", "--quiet", "HEAD"])
        .output();

    match output {
        Ok(o) if o.status.success() => String::from_utf8(o.stdout)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        Ok(o) => {
            tracing::debug!(
                dir = %dir.display(),
                status = %o.status,
                "no git revision for working directory"
            );
            None
        }
        Err(e) => {
            tracing::debug!(error = %e, "git not available, release left unset");
            None
        }
    }
}
