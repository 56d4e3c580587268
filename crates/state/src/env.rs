use anyhow::Result;
use std::path::{Path, PathBuf};

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("home directory not found"))
}

/// Returns the repository root set via `SKILLSYNC_REPO`, if any.
pub fn env_repo_root() -> Option<PathBuf> {
    std::env::var("SKILLSYNC_REPO")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Returns the path to the settings file.
///
/// `SKILLSYNC_CONFIG` wins; otherwise `~/.skillsync/config.toml`.
pub fn config_file() -> Option<PathBuf> {
    if let Ok(custom) = std::env::var("SKILLSYNC_CONFIG") {
        if !custom.is_empty() {
            return Some(PathBuf::from(custom));
        }
    }
    home_dir()
        .ok()
        .map(|h| h.join(".skillsync").join("config.toml"))
}

/// Expands a leading `~` against `home`.
///
/// ```
/// use skillsync_state::expand_home;
/// use std::path::Path;
///
/// let home = Path::new("/home/dev");
/// assert_eq!(expand_home(Path::new("~/skills"), home), Path::new("/home/dev/skills"));
/// assert_eq!(expand_home(Path::new("/opt/skills"), home), Path::new("/opt/skills"));
/// ```
pub fn expand_home(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}
