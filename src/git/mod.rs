//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the release
//! repository, allowing the workflow to run against a real git repository
//! or an in-memory mock in tests.
//!
//! # Overview
//!
//! The primary abstraction is the [ReleaseRepository] trait. Every value is
//! bound to one working directory, so no operation depends on the process
//! working directory. The concrete implementations are:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockReleaseRepository]: A mock implementation for testing
//!
//! ```rust
//! # use bloom_import_upstream::git::ReleaseRepository;
//! # fn example<R: ReleaseRepository>(repo: &R) -> bloom_import_upstream::Result<()> {
//! let state = repo.state()?;
//! if state.has_branch("upstream") {
//!     println!("upstream branch present in {}", state.path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod remote;
pub mod repository;

pub use mock::MockReleaseRepository;
pub use repository::Git2Repository;

use crate::domain::ReleaseRepoState;
use crate::error::Result;
use std::path::Path;

/// Operations the import workflow needs from the release repository.
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to [crate::error::BloomError].
pub trait ReleaseRepository {
    /// Root of the working tree
    fn workdir(&self) -> &Path;

    /// Names of all local branches
    fn local_branches(&self) -> Result<Vec<String>>;

    /// Branch HEAD points at, `None` when HEAD is detached
    ///
    /// An unborn branch (no commits yet) is still reported by name.
    fn current_branch(&self) -> Result<Option<String>>;

    /// Switch HEAD and the working tree to a local branch
    fn checkout_branch(&self, name: &str) -> Result<()>;

    /// Rename a local branch, keeping HEAD attached if it pointed at it
    fn rename_branch(&self, from: &str, to: &str) -> Result<()>;

    /// Create a local branch from `<remote>/<name>` when only the remote one exists
    ///
    /// # Returns
    /// * `Ok(true)` - A local tracking branch was created
    /// * `Ok(false)` - The local branch already exists or no remote has it
    fn track_remote_branch(&self, name: &str) -> Result<bool>;

    /// Most recent tag matching a glob, ordered by the tagged commit's author date
    fn latest_tag_matching(&self, glob: &str) -> Result<Option<String>>;

    /// Rename a tracked file on disk and in the index (`git mv`)
    fn move_file(&self, from: &str, to: &str) -> Result<()>;

    /// Stage the given workdir-relative paths and commit them on HEAD
    fn commit_files(&self, paths: &[&str], message: &str) -> Result<()>;

    /// Create a branch with a single empty commit and no files, leaving HEAD on it
    ///
    /// The index is cleared and every working tree entry except `.git` is removed.
    fn create_orphan_branch(&self, name: &str, message: &str) -> Result<()>;

    /// Snapshot of the current branch layout
    fn state(&self) -> Result<ReleaseRepoState> {
        Ok(ReleaseRepoState {
            path: self.workdir().to_path_buf(),
            current_branch: self.current_branch()?,
            branches: self.local_branches()?.into_iter().collect(),
        })
    }

    /// Check for a local branch with exactly this name
    fn has_branch(&self, name: &str) -> Result<bool> {
        Ok(self.local_branches()?.iter().any(|b| b == name))
    }
}
