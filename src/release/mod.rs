//! Release repository topology: the bloom branch check and the upstream
//! branch bootstrap.

pub mod validator;

pub use validator::{convert_catkin_to_bloom, ensure_bloom_branch, Validation};

use crate::domain::{BLOOM_BRANCH, UPSTREAM_BRANCH};
use crate::error::Result;
use crate::git::ReleaseRepository;
use crate::ui;

const INITIAL_UPSTREAM_MESSAGE: &str = "Initial upstream branch";

/// Creates local `bloom` and `upstream` branches from their remote-tracking
/// counterparts when only the remote ones exist.
pub fn track_release_branches<R: ReleaseRepository>(repo: &R) -> Result<Vec<String>> {
    let mut created = Vec::new();
    for branch in [BLOOM_BRANCH, UPSTREAM_BRANCH] {
        if repo.track_remote_branch(branch)? {
            created.push(branch.to_string());
        }
    }
    Ok(created)
}

/// Creates an empty, initial `upstream` branch if none exists yet.
///
/// # Returns
/// * `Ok(true)` - The branch was created; HEAD now points at it
/// * `Ok(false)` - The branch already existed and nothing changed
pub fn ensure_upstream_branch<R: ReleaseRepository>(repo: &R) -> Result<bool> {
    if repo.has_branch(UPSTREAM_BRANCH)? {
        return Ok(false);
    }

    ui::display_notice(
        "No upstream branch",
        "... creating an initial upstream branch.",
    );
    repo.create_orphan_branch(UPSTREAM_BRANCH, INITIAL_UPSTREAM_MESSAGE)?;
    Ok(true)
}
