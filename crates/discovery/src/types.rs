use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;

/// File whose presence at the top level of a directory makes it a skill.
pub const SKILL_MARKER: &str = "SKILL.md";

/// Longest skill name accepted by [`is_valid_skill_name`].
pub const SKILL_NAME_MAX_LENGTH: usize = 64;

static SKILL_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("SKILL_NAME_RE: compile-time constant")
});

/// One distributable skill found in the canonical repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Skill {
    /// Directory base name; also the link name on every platform.
    pub name: String,
    /// Absolute path of the skill directory inside the repository.
    pub canonical_path: PathBuf,
}

impl Skill {
    /// Whether the name follows the hyphen-case naming convention.
    pub fn has_valid_name(&self) -> bool {
        is_valid_skill_name(&self.name)
    }
}

/// Checks a skill name against the hyphen-case convention.
///
/// The reconciler links skills regardless of this result; it is reported by
/// `--list` so that bad names surface before the structural validator runs.
///
/// ```
/// use skillsync_discovery::is_valid_skill_name;
///
/// assert!(is_valid_skill_name("code-review"));
/// assert!(!is_valid_skill_name("Code_Review"));
/// assert!(!is_valid_skill_name("trailing-"));
/// ```
pub fn is_valid_skill_name(name: &str) -> bool {
    name.len() <= SKILL_NAME_MAX_LENGTH && SKILL_NAME_RE.is_match(name)
}
