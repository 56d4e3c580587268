//! Removes dangling links left behind by deleted or moved skills.

use crate::error::{Result, SyncError};
use crate::links::{is_temp_link_name, remove_link};
use crate::report::{LinkAction, LinkEvent};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

fn is_dangling(path: &Path) -> bool {
    matches!(fs::metadata(path), Err(err) if err.kind() == io::ErrorKind::NotFound)
}

/// Prunes symlinks directly under `root` whose referent no longer exists.
///
/// Only dangling-ness matters: a link to an existing path stays even if it
/// is not a known skill. Names in `desired` were just handled by the
/// reconciler and are skipped. Staging links left by an interrupted run
/// are removed whatever they point at.
pub fn prune_stale_links(
    root: &Path,
    desired: &HashSet<&str>,
    dry_run: bool,
) -> Result<Vec<LinkEvent>> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(SyncError::Io {
                path: root.to_path_buf(),
                source,
            })
        }
    };

    let mut candidates: Vec<(String, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SyncError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if desired.contains(name.as_str()) {
            continue;
        }
        if !entry.file_type().is_ok_and(|t| t.is_symlink()) {
            continue;
        }
        let path = entry.path();
        if is_temp_link_name(&name) || is_dangling(&path) {
            candidates.push((name, path));
        }
    }
    candidates.sort();

    let events = candidates
        .into_iter()
        .map(|(name, link_path)| {
            let referent = fs::read_link(&link_path).unwrap_or_default();
            let action = if dry_run {
                debug!(path = %link_path.display(), "Would remove stale link");
                LinkAction::Pruned { referent }
            } else {
                match remove_link(&link_path) {
                    Ok(()) => {
                        info!(path = %link_path.display(), referent = %referent.display(), "Removed stale link");
                        LinkAction::Pruned { referent }
                    }
                    Err(err) => {
                        warn!(path = %link_path.display(), error = %err, "Failed to remove stale link");
                        LinkAction::Failed {
                            error: err.to_string(),
                        }
                    }
                }
            };
            LinkEvent {
                name,
                link_path,
                action,
            }
        })
        .collect();
    Ok(events)
}
