//! Git post-merge hook installation ("pull implies resync").

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Line identifying hooks written by skillsync.
const HOOK_MARKER: &str = "# managed by skillsync";

fn shell_quote(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', r"'\''"))
}

fn hook_script(exe: &Path, repo: &Path) -> String {
    format!(
        r#"#!/bin/sh
{HOOK_MARKER}
# Re-links skills into every installed platform after each merge or pull.
BIN={bin}
if [ -x "$BIN" ]; then
  "$BIN" --repo {repo} || echo "skillsync: resync reported problems (see above)" >&2
fi
exit 0
"#,
        bin = shell_quote(exe),
        repo = shell_quote(repo),
    )
}

/// Writes `<repo>/.git/hooks/post-merge` invoking `exe`.
///
/// Git runs the hook from the worktree top level, so the repository path
/// is made absolute before it is written into the script. Refuses to
/// replace a hook (or a symlink named like one) that skillsync did not write.
pub(crate) fn install_post_merge_hook(repo: &Path, exe: &Path) -> Result<PathBuf> {
    let repo = &repo
        .canonicalize()
        .with_context(|| format!("failed to resolve repository {}", repo.display()))?;
    let git_dir = repo.join(".git");
    if !git_dir.is_dir() {
        bail!(
            "{} is not a git checkout with a .git directory; add a post-merge hook running `{} --repo {}` manually",
            repo.display(),
            exe.display(),
            repo.display()
        );
    }
    let hooks = git_dir.join("hooks");
    fs::create_dir_all(&hooks)
        .with_context(|| format!("Failed to create directory: {}", hooks.display()))?;

    let hook_path = hooks.join("post-merge");
    if let Ok(meta) = fs::symlink_metadata(&hook_path) {
        let existing = if meta.file_type().is_symlink() {
            String::new()
        } else {
            fs::read_to_string(&hook_path).unwrap_or_default()
        };
        if !existing.contains(HOOK_MARKER) {
            bail!(
                "{} already exists and was not written by skillsync; merge it by hand or remove it",
                hook_path.display()
            );
        }
    }

    fs::write(&hook_path, hook_script(exe, repo))
        .with_context(|| format!("Failed to write hook to {}", hook_path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&hook_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&hook_path, perms)?;
    }

    tracing::info!(path = %hook_path.display(), "Installed post-merge hook");
    Ok(hook_path)
}
