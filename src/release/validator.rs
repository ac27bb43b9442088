use crate::config::{BLOOM_CONF, LEGACY_CATKIN_CONF};
use crate::domain::{BLOOM_BRANCH, LEGACY_CATKIN_BRANCH};
use crate::error::{BloomError, Result};
use crate::git::ReleaseRepository;
use crate::ui;
use std::fs;

const LEGACY_SECTION: &str = "[catkin]";
const BLOOM_SECTION: &str = "[bloom]";
const MIGRATION_COMMIT_MESSAGE: &str = "rename catkin.conf to bloom.conf";

/// How the repository satisfied the bloom branch requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// A `bloom` branch was already present
    BloomBranchFound,
    /// A legacy `catkin` branch was converted to `bloom`
    MigratedFromCatkin,
}

/// Ensures the repository has a `bloom` branch, migrating a legacy `catkin`
/// branch when that is all there is.
///
/// # Returns
/// * `Ok(Validation)` - The repository now has a `bloom` branch
/// * `Err(BloomError::NotReleaseRepo)` - Neither branch exists; nothing was changed
pub fn ensure_bloom_branch<R: ReleaseRepository>(repo: &R) -> Result<Validation> {
    let state = repo.state()?;

    if state.is_bloom_repo() {
        return Ok(Validation::BloomBranchFound);
    }

    if !state.needs_catkin_migration() {
        return Err(BloomError::NotReleaseRepo);
    }

    ui::display_status("catkin branch detected, up converting to the bloom branch");
    convert_catkin_to_bloom(repo)?;
    Ok(Validation::MigratedFromCatkin)
}

/// Converts an old style catkin branch and catkin.conf setup to bloom.
pub fn convert_catkin_to_bloom<R: ReleaseRepository>(repo: &R) -> Result<()> {
    repo.rename_branch(LEGACY_CATKIN_BRANCH, BLOOM_BRANCH)?;
    repo.checkout_branch(BLOOM_BRANCH)?;

    let workdir = repo.workdir();
    if workdir.join(LEGACY_CATKIN_CONF).exists() {
        repo.move_file(LEGACY_CATKIN_CONF, BLOOM_CONF)?;
    }

    let conf_path = workdir.join(BLOOM_CONF);
    if conf_path.exists() {
        let contents = fs::read_to_string(&conf_path)?;
        fs::write(&conf_path, contents.replace(LEGACY_SECTION, BLOOM_SECTION))?;
        repo.commit_files(&[BLOOM_CONF], MIGRATION_COMMIT_MESSAGE)?;
    }

    tracing::info!("migrated catkin branch to bloom");
    Ok(())
}
