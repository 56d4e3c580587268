//! Error types for platform resolution and reconciliation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the sync engine.
///
/// None of these abort a whole run on their own: the orchestrator records
/// them against the platform they belong to and moves on.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A platform key outside the fixed registry.
    #[error("unknown platform '{key}' (supported: {supported})")]
    UnknownPlatform { key: String, supported: String },
    /// The target root path is occupied by something other than a directory.
    #[error(
        "target root {} exists but is not a directory; remove it manually",
        path.display()
    )]
    TargetRootNotDirectory { path: PathBuf },
    /// The target root could not be created.
    #[error("failed to create target root {}: {source}", path.display())]
    CreateTargetRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Any other filesystem failure tied to a path.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SyncError>;
