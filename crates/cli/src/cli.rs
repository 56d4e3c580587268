use clap::Parser;
use skillsync_sync::{PlatformKey, SyncError};
use std::path::PathBuf;

/// Command-line interface for `skillsync`.
///
/// With no arguments, every installed platform is synchronized.
#[derive(Debug, Parser)]
#[command(
    name = "skillsync",
    version,
    about = "Links the skills of a canonical repository into every installed AI platform",
    after_help = "Exit status: 0 on success (including nothing to do), 1 on usage errors, conflicts, or failures."
)]
pub struct Cli {
    /// Restricts the run to one platform and forces it into scope.
    #[arg(long, value_name = "KEY", value_parser = parse_platform)]
    pub platform: Option<PlatformKey>,
    /// Reports what would change without touching the filesystem.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
    /// Canonical skills repository (default: `SKILLSYNC_REPO`, then the checkout holding this binary).
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,
    /// Prints the run summary as JSON instead of the human report.
    #[arg(long, default_value_t = false, conflicts_with_all = ["list", "install_hook"])]
    pub json: bool,
    /// Lists discovered skills and platform detection, then exits.
    #[arg(long, default_value_t = false, conflicts_with = "install_hook")]
    pub list: bool,
    /// Installs a git post-merge hook that re-runs skillsync after every pull.
    #[arg(long, default_value_t = false)]
    pub install_hook: bool,
}

fn parse_platform(value: &str) -> Result<PlatformKey, String> {
    value.parse().map_err(|err: SyncError| err.to_string())
}
