//! Decides which platforms are in scope for a run.

use crate::platform::{Platform, PlatformKey, PlatformRegistry};
use serde::Serialize;
use tracing::debug;

/// Why a platform is or is not part of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStatus {
    /// Host application directory exists.
    Installed,
    /// Forced into scope by `--platform`, installed or not.
    Selected,
    /// Host application directory is absent.
    NotInstalled,
    /// Another platform was selected with `--platform`.
    FilteredOut,
}

impl DetectionStatus {
    pub fn in_scope(self) -> bool {
        matches!(self, Self::Installed | Self::Selected)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Installed => "detected",
            Self::Selected => "selected",
            Self::NotInstalled => "not detected",
            Self::FilteredOut => "skipped (filtered)",
        }
    }
}

/// Detection outcome for one platform.
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub platform: Platform,
    pub status: DetectionStatus,
}

/// Classifies every registry platform for this run.
///
/// With `filter`, only that platform is in scope, even if its parent
/// directory does not exist yet. Without it, a platform is in scope when
/// [`Platform::is_installed`] holds right now.
pub fn detect_platforms(registry: &PlatformRegistry, filter: Option<PlatformKey>) -> Vec<Detection> {
    registry
        .iter()
        .map(|platform| {
            let status = match filter {
                Some(key) if key == platform.key => DetectionStatus::Selected,
                Some(_) => DetectionStatus::FilteredOut,
                None if platform.is_installed() => DetectionStatus::Installed,
                None => DetectionStatus::NotInstalled,
            };
            debug!(
                platform = %platform.key,
                target = %platform.target_root.display(),
                status = status.label(),
                "Platform detection"
            );
            Detection {
                platform: platform.clone(),
                status,
            }
        })
        .collect()
}

/// Platforms in scope, in registry order.
pub fn in_scope(detections: &[Detection]) -> Vec<Platform> {
    detections
        .iter()
        .filter(|d| d.status.in_scope())
        .map(|d| d.platform.clone())
        .collect()
}
