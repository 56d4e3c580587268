//! Runs reconciliation across every in-scope platform.

use crate::detect::{detect_platforms, in_scope, Detection};
use crate::platform::{PlatformKey, PlatformRegistry};
use crate::reconcile::reconcile_platform;
use crate::report::{PlatformReport, RunSummary};
use serde::{Deserialize, Serialize};
use skillsync_discovery::Skill;
use tracing::info;

/// Parameters for a sync run.
///
/// ```
/// use skillsync_sync::SyncParams;
///
/// let params = SyncParams { dry_run: true, ..Default::default() };
/// assert!(params.platform.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncParams {
    /// Preview only; no filesystem writes.
    pub dry_run: bool,
    /// Restrict the run to one platform, forcing it into scope.
    pub platform: Option<PlatformKey>,
}

/// Sequences detection, reconciliation, and aggregation.
pub struct SyncOrchestrator<'a> {
    registry: &'a PlatformRegistry,
    skills: &'a [Skill],
}

impl<'a> SyncOrchestrator<'a> {
    /// Creates an orchestrator over a registry and the desired skill set.
    pub fn new(registry: &'a PlatformRegistry, skills: &'a [Skill]) -> Self {
        Self { registry, skills }
    }

    /// Classifies platforms for `params`.
    pub fn detect(&self, params: &SyncParams) -> Vec<Detection> {
        detect_platforms(self.registry, params.platform)
    }

    /// Performs the sync.
    ///
    /// Platforms are handled one after another; `on_platform` sees each
    /// report as soon as that platform is done. Each platform starts from a
    /// fresh report, so nothing leaks from one into the next.
    pub fn sync(
        &self,
        params: &SyncParams,
        mut on_platform: impl FnMut(&PlatformReport),
    ) -> RunSummary {
        let platforms = in_scope(&self.detect(params));
        if platforms.is_empty() {
            info!("No platforms in scope");
        }

        let reports = platforms
            .iter()
            .map(|platform| {
                let report = reconcile_platform(platform, self.skills, params.dry_run);
                on_platform(&report);
                report
            })
            .collect();
        RunSummary::from_reports(params.dry_run, reports)
    }
}
