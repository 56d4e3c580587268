//! Symlink reconciliation for skillsync.
//!
//! Keeps every detected platform's skill directory pointing at the skills
//! of one canonical repository: missing links are created, links with the
//! wrong referent are repointed, dangling links are pruned, and anything
//! that is not a symlink is reported as a conflict and left alone.
//!
//! # Examples
//!
//! ```
//! use skillsync_discovery::{scan_repository, ScanOptions};
//! use skillsync_sync::{HostOs, PlatformKey, PlatformRegistry, SyncOrchestrator, SyncParams};
//!
//! let temp = tempfile::tempdir().unwrap();
//! let repo = temp.path().join("repo");
//! std::fs::create_dir_all(repo.join("alpha")).unwrap();
//! std::fs::write(repo.join("alpha/SKILL.md"), "# Alpha").unwrap();
//!
//! let skills = scan_repository(&repo, &ScanOptions::default()).unwrap();
//! let registry = PlatformRegistry::new(&temp.path().join("home"), HostOs::current());
//! let params = SyncParams {
//!     dry_run: true,
//!     platform: Some(PlatformKey::Claude),
//! };
//! let summary = SyncOrchestrator::new(&registry, &skills).sync(&params, |_| {});
//! assert_eq!(summary.created, 1);
//! assert!(summary.success());
//! ```

#![deny(unsafe_code)]

pub mod detect;
pub mod error;
mod links;
pub mod orchestrator;
pub mod platform;
pub mod prune;
pub mod reconcile;
pub mod report;

pub use detect::{detect_platforms, in_scope, Detection, DetectionStatus};
pub use error::{Result, SyncError};
pub use orchestrator::{SyncOrchestrator, SyncParams};
pub use platform::{target_root, HostOs, Platform, PlatformKey, PlatformRegistry};
pub use prune::prune_stale_links;
pub use reconcile::{reconcile_link, reconcile_platform};
pub use report::{EntryKind, LinkAction, LinkEvent, PlatformReport, RunSummary};
