//! Platform registry: which directories receive skill links, per host OS.

use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Stable identifier of a supported platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKey {
    /// Claude Code (`~/.claude/skills`).
    Claude,
    /// OpenCode.
    Opencode,
    /// GitHub Copilot.
    Copilot,
}

impl PlatformKey {
    /// Every platform, in registry order.
    pub const ALL: [PlatformKey; 3] = [Self::Claude, Self::Opencode, Self::Copilot];

    /// Get the key as written on the command line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Opencode => "opencode",
            Self::Copilot => "copilot",
        }
    }

    /// Comma-separated list of supported keys, for diagnostics.
    pub fn supported() -> String {
        Self::ALL
            .iter()
            .map(PlatformKey::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformKey {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SyncError::UnknownPlatform {
                key: s.to_string(),
                supported: Self::supported(),
            })
    }
}

/// Host operating system family, as far as path layout is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    /// Linux and other XDG-style systems.
    Posix,
    /// macOS (`~/Library/Application Support`).
    MacOs,
}

impl HostOs {
    /// The OS this binary was built for.
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Posix
        }
    }
}

/// Default target root for `key` on `os`, rooted at `home`.
///
/// ```
/// use skillsync_sync::{target_root, HostOs, PlatformKey};
/// use std::path::Path;
///
/// let home = Path::new("/home/dev");
/// assert_eq!(
///     target_root(PlatformKey::Claude, HostOs::MacOs, home),
///     Path::new("/home/dev/.claude/skills"),
/// );
/// assert_eq!(
///     target_root(PlatformKey::Opencode, HostOs::Posix, home),
///     Path::new("/home/dev/.config/opencode/skills"),
/// );
/// ```
pub fn target_root(key: PlatformKey, os: HostOs, home: &Path) -> PathBuf {
    let app_dir = |name: &str| match os {
        HostOs::Posix => home.join(".config").join(name),
        HostOs::MacOs => home.join("Library/Application Support").join(name),
    };
    match key {
        PlatformKey::Claude => home.join(".claude/skills"),
        PlatformKey::Opencode => app_dir("opencode").join("skills"),
        PlatformKey::Copilot => app_dir("github-copilot").join("skills"),
    }
}

/// One synchronization target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub key: PlatformKey,
    /// Directory in which `<skill-name>` links are maintained.
    pub target_root: PathBuf,
}

impl Platform {
    /// True when the host application directory (the target root's parent) exists.
    ///
    /// Evaluated on every call; nothing is cached.
    pub fn is_installed(&self) -> bool {
        self.target_root.parent().is_some_and(Path::is_dir)
    }
}

/// Fixed table of platforms for one run.
#[derive(Debug, Clone)]
pub struct PlatformRegistry {
    platforms: Vec<Platform>,
}

impl PlatformRegistry {
    /// Builds the registry from the built-in templates.
    pub fn new(home: &Path, os: HostOs) -> Self {
        Self {
            platforms: PlatformKey::ALL
                .into_iter()
                .map(|key| Platform {
                    key,
                    target_root: target_root(key, os, home),
                })
                .collect(),
        }
    }

    /// Replaces target roots with user-configured ones.
    ///
    /// Fails on a key that is not part of the registry.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, PathBuf>) -> Result<Self> {
        for (key, target) in overrides {
            let key: PlatformKey = key.parse()?;
            if let Some(platform) = self.platforms.iter_mut().find(|p| p.key == key) {
                tracing::debug!(platform = %key, target = %target.display(), "Overriding target root");
                platform.target_root = target.clone();
            }
        }
        Ok(self)
    }

    /// Looks up a platform by key.
    pub fn get(&self, key: PlatformKey) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.key == key)
    }

    /// Iterates platforms in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }
}
