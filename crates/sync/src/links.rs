//! Low-level symlink helpers shared by the reconciler and the pruner.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Suffix of the staging link used for atomic create/replace.
pub(crate) const TEMP_LINK_SUFFIX: &str = ".skillsync-tmp";

/// Staging name for `name`; hidden so the scanner and users ignore it.
pub(crate) fn temp_link_name(name: &str) -> String {
    format!(".{name}{TEMP_LINK_SUFFIX}")
}

/// Returns true for names produced by [`temp_link_name`].
pub(crate) fn is_temp_link_name(name: &str) -> bool {
    name.len() > 1 + TEMP_LINK_SUFFIX.len()
        && name.starts_with('.')
        && name.ends_with(TEMP_LINK_SUFFIX)
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

/// Removes a symlink without touching its referent.
pub(crate) fn remove_link(path: &Path) -> io::Result<()> {
    #[cfg(windows)]
    if fs::remove_dir(path).is_ok() {
        return Ok(());
    }
    fs::remove_file(path)
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
}

/// Points `root/name` at `target`, creating or replacing the link.
///
/// The link is first created under a staging name and then renamed into
/// place, so `root/name` is never observed missing while it is replaced.
pub(crate) fn place_link(root: &Path, name: &str, target: &Path) -> io::Result<PathBuf> {
    let link = root.join(name);
    let staging = root.join(temp_link_name(name));
    if is_symlink(&staging) {
        remove_link(&staging)?;
    }
    symlink_dir(target, &staging)?;

    #[cfg(windows)]
    if is_symlink(&link) {
        remove_link(&link)?;
    }

    if let Err(err) = fs::rename(&staging, &link) {
        let _ = remove_link(&staging);
        return Err(err);
    }
    Ok(link)
}
