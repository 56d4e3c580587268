//! Canonical repository scanning for skillsync.
//!
//! A skill is an immediate subdirectory of the repository root that carries
//! a `SKILL.md` marker file. This crate enumerates those directories and
//! exposes the naming rules the rest of the workspace reports against.
//!
//! # Examples
//!
//! ```
//! use skillsync_discovery::{scan_repository, ScanOptions};
//! use tempfile::tempdir;
//!
//! let temp = tempdir().unwrap();
//! let skill_dir = temp.path().join("alpha");
//! std::fs::create_dir_all(&skill_dir).unwrap();
//! std::fs::write(skill_dir.join("SKILL.md"), "# Alpha").unwrap();
//!
//! let skills = scan_repository(temp.path(), &ScanOptions::default()).unwrap();
//! assert_eq!(skills.len(), 1);
//! assert_eq!(skills[0].name, "alpha");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Repository scanning.
pub mod scanner;
/// Skill types and naming rules.
pub mod types;

pub use scanner::{scan_repository, DiscoveryError, ScanOptions};
pub use types::{is_valid_skill_name, Skill, SKILL_MARKER, SKILL_NAME_MAX_LENGTH};
