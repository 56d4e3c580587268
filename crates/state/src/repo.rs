//! Canonical repository root resolution.
//!
//! The root is never taken from the working directory: it comes from an
//! explicit path, `SKILLSYNC_REPO`, or the location of the running binary.

use crate::env::env_repo_root;
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Walks up from `start` and returns the first directory holding a `.git` entry.
pub fn find_repo_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Resolves the canonical repository root.
///
/// Precedence: `explicit` (the `--repo` flag), then `SKILLSYNC_REPO`, then
/// the nearest git checkout enclosing the current executable.
pub fn resolve_repo_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "Using repository root from --repo");
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env_repo_root() {
        debug!(path = %path.display(), "Using repository root from SKILLSYNC_REPO");
        return Ok(path);
    }
    let exe = std::env::current_exe()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    if let Some(root) = exe.parent().and_then(find_repo_root_from) {
        debug!(path = %root.display(), "Using repository root enclosing the executable");
        return Ok(root);
    }
    bail!(
        "could not locate the skills repository from {}; pass --repo <DIR> or set SKILLSYNC_REPO",
        exe.display()
    )
}
