//! Converges one target root onto the desired skill set.

use crate::error::{Result, SyncError};
use crate::links::place_link;
use crate::platform::Platform;
use crate::prune::prune_stale_links;
use crate::report::{EntryKind, LinkAction, LinkEvent, PlatformReport};
use skillsync_discovery::Skill;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What currently sits at a link path.
#[derive(Debug)]
enum Observed {
    Missing,
    Link(PathBuf),
    Occupied(EntryKind),
}

fn observe(path: &Path) -> io::Result<Observed> {
    match fs::symlink_metadata(path) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Observed::Missing),
        Err(err) => Err(err),
        Ok(meta) if meta.file_type().is_symlink() => Ok(Observed::Link(fs::read_link(path)?)),
        Ok(meta) if meta.is_dir() => Ok(Observed::Occupied(EntryKind::Directory)),
        Ok(meta) if meta.is_file() => Ok(Observed::Occupied(EntryKind::File)),
        Ok(_) => Ok(Observed::Occupied(EntryKind::Other)),
    }
}

/// Makes sure the target root exists.
///
/// Returns `true` when the directory was missing (and created, unless
/// `dry_run`).
fn prepare_target_root(root: &Path, dry_run: bool) -> Result<bool> {
    match fs::symlink_metadata(root) {
        Ok(_) if root.is_dir() => Ok(false),
        Ok(_) => Err(SyncError::TargetRootNotDirectory {
            path: root.to_path_buf(),
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            if dry_run {
                info!(path = %root.display(), "Would create target root");
            } else {
                fs::create_dir_all(root).map_err(|source| SyncError::CreateTargetRoot {
                    path: root.to_path_buf(),
                    source,
                })?;
                info!(path = %root.display(), "Created target root");
            }
            Ok(true)
        }
        Err(source) => Err(SyncError::Io {
            path: root.to_path_buf(),
            source,
        }),
    }
}

/// Decides and applies the action for one skill under `root`.
///
/// Non-symlink entries are never modified; they come back as
/// [`LinkAction::Conflict`].
pub fn reconcile_link(root: &Path, skill: &Skill, dry_run: bool) -> LinkEvent {
    let link_path = root.join(&skill.name);
    let target = &skill.canonical_path;

    let action = match observe(&link_path) {
        Ok(Observed::Link(current)) if current == *target => LinkAction::AlreadySynced,
        Ok(Observed::Missing) => apply(root, skill, dry_run, || LinkAction::Created {
            target: target.clone(),
        }),
        Ok(Observed::Link(previous)) => apply(root, skill, dry_run, || LinkAction::Updated {
            previous,
            target: target.clone(),
        }),
        Ok(Observed::Occupied(kind)) => {
            warn!(
                skill = %skill.name,
                path = %link_path.display(),
                kind = kind.label(),
                "Link path occupied by a non-symlink entry; leaving it untouched"
            );
            LinkAction::Conflict { kind }
        }
        Err(err) => LinkAction::Failed {
            error: err.to_string(),
        },
    };

    debug!(skill = %skill.name, path = %link_path.display(), ?action, dry_run, "Reconciled link");
    LinkEvent {
        name: skill.name.clone(),
        link_path,
        action,
    }
}

fn apply(
    root: &Path,
    skill: &Skill,
    dry_run: bool,
    planned: impl FnOnce() -> LinkAction,
) -> LinkAction {
    if dry_run {
        return planned();
    }
    match place_link(root, &skill.name, &skill.canonical_path) {
        Ok(_) => planned(),
        Err(err) => {
            warn!(skill = %skill.name, root = %root.display(), error = %err, "Failed to place link");
            LinkAction::Failed {
                error: err.to_string(),
            }
        }
    }
}

/// Reconciles every skill against `platform`, then prunes stale links.
///
/// Skills are processed in the order given. A failure to prepare the
/// target root stops this platform only and is recorded on the report.
pub fn reconcile_platform(platform: &Platform, skills: &[Skill], dry_run: bool) -> PlatformReport {
    let mut report = PlatformReport::new(platform, skills.len(), dry_run);
    let root = &platform.target_root;

    match prepare_target_root(root, dry_run) {
        Ok(created) => report.root_created = created,
        Err(err) => {
            warn!(platform = %platform.key, error = %err, "Skipping platform");
            report.error = Some(err.to_string());
            return report;
        }
    }

    for skill in skills {
        if report.root_created && dry_run {
            report.record(LinkEvent {
                name: skill.name.clone(),
                link_path: root.join(&skill.name),
                action: LinkAction::Created {
                    target: skill.canonical_path.clone(),
                },
            });
            continue;
        }
        report.record(reconcile_link(root, skill, dry_run));
    }

    let desired: HashSet<&str> = skills.iter().map(|s| s.name.as_str()).collect();
    match prune_stale_links(root, &desired, dry_run) {
        Ok(events) => events.into_iter().for_each(|e| report.record(e)),
        Err(err) => {
            warn!(platform = %platform.key, error = %err, "Stale link scan failed");
            report.error = Some(err.to_string());
        }
    }

    info!(
        platform = %platform.key,
        synced = report.already_synced,
        created = report.created,
        updated = report.updated,
        pruned = report.pruned,
        conflicted = report.conflicted,
        dry_run,
        "Platform reconciled"
    );
    report
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::platform::PlatformKey;
    use std::os::unix::fs::symlink;
    use tempfile::{tempdir, TempDir};

    struct Setup {
        _tmp: TempDir,
        repo: PathBuf,
        platform: Platform,
    }

    fn setup(names: &[&str]) -> (Setup, Vec<Skill>) {
        let tmp = tempdir().unwrap();
        let repo = tmp.path().canonicalize().unwrap().join("repo");
        let skills = names
            .iter()
            .map(|name| {
                let dir = repo.join(name);
                fs::create_dir_all(&dir).unwrap();
                fs::write(dir.join("SKILL.md"), "x").unwrap();
                Skill {
                    name: name.to_string(),
                    canonical_path: dir,
                }
            })
            .collect();
        let platform = Platform {
            key: PlatformKey::Claude,
            target_root: tmp.path().join("home/.claude/skills"),
        };
        (
            Setup {
                _tmp: tmp,
                repo,
                platform,
            },
            skills,
        )
    }

    #[test]
    fn creates_missing_root_and_links() {
        let (s, skills) = setup(&["alpha", "beta"]);
        let report = reconcile_platform(&s.platform, &skills, false);

        assert!(report.root_created);
        assert_eq!(report.created, 2);
        for skill in &skills {
            let link = s.platform.target_root.join(&skill.name);
            assert_eq!(fs::read_link(link).unwrap(), skill.canonical_path);
        }
    }

    #[test]
    fn second_run_is_all_noop() {
        let (s, skills) = setup(&["alpha", "beta"]);
        reconcile_platform(&s.platform, &skills, false);
        let report = reconcile_platform(&s.platform, &skills, false);

        assert_eq!(report.already_synced, 2);
        assert_eq!(report.changes(), 0);
        assert!(!report.root_created);
    }

    #[test]
    fn wrong_referent_is_updated_not_conflicted() {
        let (s, skills) = setup(&["alpha"]);
        fs::create_dir_all(&s.platform.target_root).unwrap();
        let link = s.platform.target_root.join("alpha");
        symlink(s.repo.join("elsewhere"), &link).unwrap();

        let report = reconcile_platform(&s.platform, &skills, false);
        assert_eq!(report.updated, 1);
        assert_eq!(report.conflicted, 0);
        assert_eq!(fs::read_link(&link).unwrap(), skills[0].canonical_path);
    }

    #[test]
    fn relative_link_to_same_place_is_rewritten() {
        let (s, skills) = setup(&["alpha"]);
        fs::create_dir_all(&s.platform.target_root).unwrap();
        let link = s.platform.target_root.join("alpha");
        symlink("../../../repo/alpha", &link).unwrap();

        let event = reconcile_link(&s.platform.target_root, &skills[0], false);
        assert!(matches!(event.action, LinkAction::Updated { .. }));
        assert_eq!(fs::read_link(&link).unwrap(), skills[0].canonical_path);
    }

    #[test]
    fn real_directory_is_a_conflict_and_untouched() {
        let (s, skills) = setup(&["alpha"]);
        let occupied = s.platform.target_root.join("alpha");
        fs::create_dir_all(&occupied).unwrap();
        fs::write(occupied.join("notes.md"), "mine").unwrap();

        let report = reconcile_platform(&s.platform, &skills, false);
        assert_eq!(report.conflicted, 1);
        assert!(matches!(
            report.events[0].action,
            LinkAction::Conflict {
                kind: EntryKind::Directory
            }
        ));
        assert_eq!(fs::read_to_string(occupied.join("notes.md")).unwrap(), "mine");
    }

    #[test]
    fn socket_at_link_path_is_an_other_conflict() {
        let (s, skills) = setup(&["alpha", "beta"]);
        fs::create_dir_all(&s.platform.target_root).unwrap();
        let occupied = s.platform.target_root.join("alpha");
        let _listener = std::os::unix::net::UnixListener::bind(&occupied).unwrap();

        let report = reconcile_platform(&s.platform, &skills, false);
        assert_eq!(report.conflicted, 1);
        assert_eq!(report.created, 1);
        assert!(matches!(
            report.events[0].action,
            LinkAction::Conflict {
                kind: EntryKind::Other
            }
        ));
        let meta = fs::symlink_metadata(&occupied).unwrap();
        assert!(!meta.file_type().is_symlink());
        assert!(!meta.is_file() && !meta.is_dir());
    }

    #[test]
    fn dry_run_on_missing_root_writes_nothing() {
        let (s, skills) = setup(&["alpha", "beta", "gamma"]);
        let report = reconcile_platform(&s.platform, &skills, true);

        assert!(report.root_created);
        assert_eq!(report.created, 3);
        assert!(!s.platform.target_root.exists());
    }

    #[test]
    fn root_occupied_by_file_aborts_platform() {
        let (s, skills) = setup(&["alpha"]);
        fs::create_dir_all(s.platform.target_root.parent().unwrap()).unwrap();
        fs::write(&s.platform.target_root, "not a dir").unwrap();

        let report = reconcile_platform(&s.platform, &skills, false);
        assert!(report.error.as_deref().unwrap().contains("not a directory"));
        assert!(report.events.is_empty());
        assert_eq!(fs::read_to_string(&s.platform.target_root).unwrap(), "not a dir");
    }
}
