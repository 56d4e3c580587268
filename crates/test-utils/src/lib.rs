//! Shared test utilities for skillsync crates.
//!
//! This crate provides common test fixtures and utilities used across
//! multiple crates in the skillsync workspace.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.previous {
            std::env::set_var(self.key, v);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = skillsync_test_utils::set_env_var("MY_VAR", Some("value"));
/// // MY_VAR is set to "value"
/// // When _guard drops, MY_VAR is restored to its original value
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    if let Some(val) = value {
        std::env::set_var(key, val);
    } else {
        std::env::remove_var(key);
    }
    EnvVarGuard { key, previous }
}

/// Temp workspace holding a canonical skills repository and a fake home.
///
/// The tempdir is automatically cleaned up when this struct is dropped.
pub struct TestFixture {
    pub tempdir: tempfile::TempDir,
    /// Canonical repository root (`<tmp>/repo`)
    pub repo: PathBuf,
    /// Fake home directory (`<tmp>/home`)
    pub home: PathBuf,
}

impl TestFixture {
    /// Creates `<tmp>/repo` and `<tmp>/home`.
    ///
    /// Does NOT set HOME; pass `home_path()` to the process under test.
    pub fn new() -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let repo = tempdir.path().join("repo");
        let home = tempdir.path().join("home");

        std::fs::create_dir_all(&repo)?;
        std::fs::create_dir_all(&home)?;

        Ok(Self {
            tempdir,
            repo,
            home,
        })
    }

    /// Get the path that should be set as HOME.
    pub fn home_path(&self) -> &Path {
        &self.home
    }

    /// Create a skill directory with a `SKILL.md` marker in the repository.
    ///
    /// Returns the path to the skill directory.
    pub fn create_skill(&self, name: &str) -> std::io::Result<PathBuf> {
        let skill_dir = self.repo.join(name);
        std::fs::create_dir_all(&skill_dir)?;
        std::fs::write(
            skill_dir.join("SKILL.md"),
            format!("---\nname: {name}\ndescription: Test skill {name}\n---\n# {name}\n"),
        )?;
        Ok(skill_dir)
    }

    /// Create a repository directory without a marker file.
    pub fn create_plain_dir(&self, name: &str) -> std::io::Result<PathBuf> {
        let dir = self.repo.join(name);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Create a directory relative to the fake home (e.g. `.claude`).
    pub fn create_home_dir(&self, rel: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        let dir = self.home.join(rel);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Canonical form of the repository root, as skills report it.
    pub fn canonical_repo(&self) -> PathBuf {
        self.repo.canonicalize().unwrap()
    }
}
