//! Settings file support for skillsync.
//!
//! Loads `~/.skillsync/config.toml` (or `$SKILLSYNC_CONFIG`). CLI arguments
//! and environment variables take precedence over anything set here.
//!
//! ```toml
//! # Directory names never treated as skills.
//! exclude = ["docs", "scripts"]
//!
//! # Replace the default target root of a platform.
//! [platforms.opencode]
//! target = "~/work/opencode-skills"
//! ```

use crate::env::config_file;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level settings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Extra directory names the scanner must skip.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Per-platform overrides keyed by platform key.
    #[serde(default)]
    pub platforms: BTreeMap<String, PlatformSettings>,
}

/// Overrides for a single platform.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformSettings {
    /// Target root replacing the built-in template.
    pub target: Option<PathBuf>,
}

/// Loads settings from the default location.
///
/// A missing file yields defaults; a file that fails to parse is an error.
pub fn load_settings() -> Result<Settings> {
    match config_file() {
        Some(path) => load_settings_from(&path),
        None => Ok(Settings::default()),
    }
}

/// Loads settings from an explicit path.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let settings: Settings =
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))?;

    tracing::debug!(
        target: "skillsync::config",
        path = %path.display(),
        excluded = settings.exclude.len(),
        overrides = settings.platforms.len(),
        "Loaded configuration file"
    );
    Ok(settings)
}
