use crate::types::{Skill, SKILL_MARKER};
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Errors raised while enumerating the canonical repository.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The repository root does not exist.
    #[error("skills repository not found: {}", path.display())]
    RootMissing {
        /// Path that was expected to hold the repository.
        path: PathBuf,
    },
    /// The repository root exists but is not a directory.
    #[error("skills repository is not a directory: {}", path.display())]
    RootNotDirectory {
        /// Offending path.
        path: PathBuf,
    },
    /// The repository root could not be resolved to an absolute path.
    #[error("failed to resolve {}: {source}", path.display())]
    Io {
        /// Path being resolved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Listing the repository root failed.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

/// Options controlling which directories count as skills.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Directory names that are never treated as skills, even with a marker.
    pub exclude: BTreeSet<String>,
}

impl ScanOptions {
    /// Builds options from a list of excluded names.
    pub fn with_exclude<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude: names.into_iter().map(Into::into).collect(),
        }
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Enumerates the skills living directly under `root`.
///
/// A directory qualifies when its name does not start with `.`, is not in
/// [`ScanOptions::exclude`], and it holds a `SKILL.md` at its top level.
/// Entries come back in directory listing order; no sorting is applied.
///
/// The canonical path of each skill is built from the absolute, symlink-free
/// form of `root`, so links created from it never carry extra indirection.
/// A skill entry that is itself a symlink is resolved to the directory it
/// points at; one that cannot be resolved is skipped.
pub fn scan_repository(root: &Path, options: &ScanOptions) -> Result<Vec<Skill>, DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::RootMissing {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(DiscoveryError::RootNotDirectory {
            path: root.to_path_buf(),
        });
    }
    let root = root.canonicalize().map_err(|source| DiscoveryError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut skills = Vec::new();
    for entry in WalkDir::new(&root).min_depth(1).max_depth(1) {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str() else {
            debug!(path = %entry.path().display(), "Skipping non UTF-8 entry");
            continue;
        };
        if is_hidden(name) || options.exclude.contains(name) {
            continue;
        }
        let path = entry.path();
        if !path.is_dir() || !path.join(SKILL_MARKER).is_file() {
            continue;
        }
        let canonical_path = if entry.path_is_symlink() {
            match path.canonicalize() {
                Ok(resolved) => resolved,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "Skipping unresolvable skill link");
                    continue;
                }
            }
        } else {
            root.join(name)
        };
        skills.push(Skill {
            name: name.to_string(),
            canonical_path,
        });
    }

    debug!(root = %root.display(), count = skills.len(), "Scanned skills repository");
    Ok(skills)
}
