use std::collections::BTreeSet;
use std::path::PathBuf;

/// Branch holding `bloom.conf` and the release metadata
pub const BLOOM_BRANCH: &str = "bloom";
/// Previous-generation name of the bloom branch
pub const LEGACY_CATKIN_BRANCH: &str = "catkin";
/// Branch receiving the pristine upstream imports
pub const UPSTREAM_BRANCH: &str = "upstream";
/// Branch git-import-orig merges new upstream versions into
pub const MASTER_BRANCH: &str = "master";

/// Snapshot of the release repository's branches at one point of the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRepoState {
    pub path: PathBuf,
    pub current_branch: Option<String>,
    pub branches: BTreeSet<String>,
}

impl ReleaseRepoState {
    /// Check for a local branch with exactly this name
    pub fn has_branch(&self, name: &str) -> bool {
        self.branches.contains(name)
    }

    /// A release repository is usable once it carries a bloom branch
    pub fn is_bloom_repo(&self) -> bool {
        self.has_branch(BLOOM_BRANCH)
    }

    /// Legacy layout that can be migrated to the bloom branch
    pub fn needs_catkin_migration(&self) -> bool {
        !self.is_bloom_repo() && self.has_branch(LEGACY_CATKIN_BRANCH)
    }
}
