//! Per-entry events, per-platform reports, and the run summary.

use crate::platform::{Platform, PlatformKey};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of a non-symlink entry blocking a link path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::File => "a regular file",
            Self::Directory => "a directory",
            Self::Other => "not a symlink",
        }
    }
}

/// What happened (or would happen under dry-run) to one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LinkAction {
    /// Link already points at the canonical path.
    AlreadySynced,
    /// Link was absent and has been created.
    Created { target: PathBuf },
    /// Link pointed elsewhere and has been repointed.
    Updated { previous: PathBuf, target: PathBuf },
    /// A non-symlink entry occupies the link path; left untouched.
    Conflict { kind: EntryKind },
    /// Dangling or leftover link removed.
    Pruned { referent: PathBuf },
    /// A filesystem call failed for this entry only.
    Failed { error: String },
}

/// One reconciler or pruner outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEvent {
    /// Entry name inside the target root.
    pub name: String,
    pub link_path: PathBuf,
    #[serde(flatten)]
    pub action: LinkAction,
}

impl LinkEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self, dry_run: bool) -> String {
        let verb = |done: &'static str, planned: &'static str| if dry_run { planned } else { done };
        match &self.action {
            LinkAction::AlreadySynced => format!("{} (already synced)", self.name),
            LinkAction::Created { target } => format!(
                "{} -> {} ({})",
                self.name,
                target.display(),
                verb("created", "would create")
            ),
            LinkAction::Updated { previous, target } => format!(
                "{} -> {} ({}, was {})",
                self.name,
                target.display(),
                verb("updated", "would update"),
                previous.display()
            ),
            LinkAction::Conflict { kind } => format!(
                "{}: {} is {}",
                self.name,
                self.link_path.display(),
                kind.label()
            ),
            LinkAction::Pruned { referent } => format!(
                "{} ({} stale link to {})",
                self.name,
                verb("removed", "would remove"),
                referent.display()
            ),
            LinkAction::Failed { error } => {
                format!("{}: {} ({})", self.name, self.link_path.display(), error)
            }
        }
    }

    /// Returns actionable guidance for the user.
    pub fn guidance(&self) -> Option<String> {
        match &self.action {
            LinkAction::Conflict { .. } => Some(format!(
                "Remove {} manually to let skillsync manage it",
                self.link_path.display()
            )),
            LinkAction::Failed { .. } => Some(format!(
                "Check permissions on {}",
                self.link_path.display()
            )),
            _ => None,
        }
    }
}

/// Result of reconciling one platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformReport {
    pub platform: PlatformKey,
    pub target_root: PathBuf,
    pub dry_run: bool,
    /// Size of the desired skill set.
    pub total_skills: usize,
    /// Target root was (or would be) created by this run.
    pub root_created: bool,
    pub already_synced: usize,
    pub created: usize,
    pub updated: usize,
    pub pruned: usize,
    pub conflicted: usize,
    pub failed: usize,
    pub events: Vec<LinkEvent>,
    /// Fatal error that stopped this platform.
    pub error: Option<String>,
}

impl PlatformReport {
    /// Creates an empty report for `platform`.
    pub fn new(platform: &Platform, total_skills: usize, dry_run: bool) -> Self {
        Self {
            platform: platform.key,
            target_root: platform.target_root.clone(),
            dry_run,
            total_skills,
            root_created: false,
            already_synced: 0,
            created: 0,
            updated: 0,
            pruned: 0,
            conflicted: 0,
            failed: 0,
            events: Vec::new(),
            error: None,
        }
    }

    /// Counts `event` and keeps it.
    pub fn record(&mut self, event: LinkEvent) {
        match event.action {
            LinkAction::AlreadySynced => self.already_synced += 1,
            LinkAction::Created { .. } => self.created += 1,
            LinkAction::Updated { .. } => self.updated += 1,
            LinkAction::Conflict { .. } => self.conflicted += 1,
            LinkAction::Pruned { .. } => self.pruned += 1,
            LinkAction::Failed { .. } => self.failed += 1,
        }
        self.events.push(event);
    }

    /// Number of mutations performed (or planned under dry-run).
    pub fn changes(&self) -> usize {
        self.created + self.updated + self.pruned
    }

    /// True when a conflict, a failure, or a platform error occurred.
    pub fn has_problems(&self) -> bool {
        self.conflicted > 0 || self.failed > 0 || self.error.is_some()
    }
}

/// Aggregate over every in-scope platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub dry_run: bool,
    /// Platforms put in scope.
    pub platforms: usize,
    /// Largest desired set seen on any platform; not a sum.
    pub total_skills: usize,
    pub already_synced: usize,
    pub created: usize,
    pub updated: usize,
    pub pruned: usize,
    pub conflicted: usize,
    pub failed: usize,
    /// Platforms aborted by a fatal error.
    pub platform_errors: usize,
    pub reports: Vec<PlatformReport>,
}

impl RunSummary {
    /// Folds per-platform reports into one summary.
    pub fn from_reports(dry_run: bool, reports: Vec<PlatformReport>) -> Self {
        let mut summary = reports.iter().fold(
            Self {
                dry_run,
                ..Self::default()
            },
            |mut acc, r| {
                acc.platforms += 1;
                acc.total_skills = acc.total_skills.max(r.total_skills);
                acc.already_synced += r.already_synced;
                acc.created += r.created;
                acc.updated += r.updated;
                acc.pruned += r.pruned;
                acc.conflicted += r.conflicted;
                acc.failed += r.failed;
                acc.platform_errors += usize::from(r.error.is_some());
                acc
            },
        );
        summary.reports = reports;
        summary
    }

    /// Whether the run should exit successfully.
    ///
    /// Creates, updates, and prunes never fail a run; conflicts, per-entry
    /// failures, and aborted platforms do, including under dry-run.
    pub fn success(&self) -> bool {
        self.conflicted == 0 && self.failed == 0 && self.platform_errors == 0
    }

    /// Process exit code for this run.
    pub fn exit_code(&self) -> u8 {
        if self.success() {
            0
        } else {
            1
        }
    }

    /// Generates a formatted summary for display.
    pub fn format_summary(&self) -> String {
        let mut out = String::new();
        out.push_str(if self.dry_run {
            "Dry run summary (no changes made)\n"
        } else {
            "Sync summary\n"
        });
        out.push_str(&format!("  Platforms:      {}\n", self.platforms));
        out.push_str(&format!("  Total skills:   {}\n", self.total_skills));
        out.push_str(&format!("  Already synced: {}\n", self.already_synced));
        out.push_str(&format!("  Created:        {}\n", self.created));
        out.push_str(&format!("  Updated:        {}\n", self.updated));
        out.push_str(&format!("  Pruned:         {}\n", self.pruned));
        out.push_str(&format!("  Conflicts:      {}\n", self.conflicted));
        if self.failed > 0 {
            out.push_str(&format!("  Failed:         {}\n", self.failed));
        }
        if self.platform_errors > 0 {
            out.push_str(&format!("  Platform errors: {}\n", self.platform_errors));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(key: PlatformKey) -> Platform {
        Platform {
            key,
            target_root: PathBuf::from(format!("/t/{key}")),
        }
    }

    fn event(name: &str, action: LinkAction) -> LinkEvent {
        LinkEvent {
            name: name.into(),
            link_path: PathBuf::from("/t").join(name),
            action,
        }
    }

    #[test]
    fn record_counts_by_action() {
        let mut report = PlatformReport::new(&platform(PlatformKey::Claude), 3, false);
        report.record(event("a", LinkAction::AlreadySynced));
        report.record(event(
            "b",
            LinkAction::Created {
                target: "/r/b".into(),
            },
        ));
        report.record(event(
            "c",
            LinkAction::Conflict {
                kind: EntryKind::File,
            },
        ));
        assert_eq!(report.already_synced, 1);
        assert_eq!(report.created, 1);
        assert_eq!(report.conflicted, 1);
        assert_eq!(report.changes(), 1);
        assert!(report.has_problems());
        assert_eq!(report.events.len(), 3);
    }

    #[test]
    fn summary_takes_max_skills_and_sums_counts() {
        let mut a = PlatformReport::new(&platform(PlatformKey::Claude), 3, false);
        a.created = 3;
        let mut b = PlatformReport::new(&platform(PlatformKey::Opencode), 3, false);
        b.already_synced = 2;
        b.updated = 1;

        let summary = RunSummary::from_reports(false, vec![a, b]);
        assert_eq!(summary.platforms, 2);
        assert_eq!(summary.total_skills, 3);
        assert_eq!(summary.created, 3);
        assert_eq!(summary.already_synced, 2);
        assert_eq!(summary.updated, 1);
        assert!(summary.success());
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn conflicts_and_platform_errors_fail_the_run() {
        let mut a = PlatformReport::new(&platform(PlatformKey::Claude), 1, true);
        a.conflicted = 1;
        assert_eq!(RunSummary::from_reports(true, vec![a]).exit_code(), 1);

        let mut b = PlatformReport::new(&platform(PlatformKey::Copilot), 1, false);
        b.error = Some("denied".into());
        let summary = RunSummary::from_reports(false, vec![b]);
        assert_eq!(summary.platform_errors, 1);
        assert!(!summary.success());
    }

    #[test]
    fn empty_run_succeeds() {
        let summary = RunSummary::from_reports(false, Vec::new());
        assert_eq!(summary.platforms, 0);
        assert!(summary.success());
    }

    #[test]
    fn dry_run_descriptions_use_conditional_verbs() {
        let e = event(
            "b",
            LinkAction::Created {
                target: "/r/b".into(),
            },
        );
        assert!(e.description(true).contains("would create"));
        assert!(e.description(false).contains("created"));
    }

    #[test]
    fn conflict_guidance_names_the_path() {
        let e = event(
            "a",
            LinkAction::Conflict {
                kind: EntryKind::Directory,
            },
        );
        assert_eq!(
            e.guidance().unwrap(),
            "Remove /t/a manually to let skillsync manage it"
        );
    }

    #[test]
    fn events_serialize_with_action_tag() {
        let e = event(
            "old",
            LinkAction::Pruned {
                referent: "/r/old".into(),
            },
        );
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["action"], "pruned");
        assert_eq!(json["name"], "old");
        assert_eq!(json["referent"], "/r/old");
    }
}
