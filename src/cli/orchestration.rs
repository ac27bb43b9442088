//! Main workflow orchestration logic
//!
//! Runs the upstream import against one release repository. The CLI in
//! main.rs only discovers the repository and loads settings; everything else
//! happens here so the workflow can be driven programmatically and tested
//! without a terminal.

use std::path::PathBuf;

use crate::config::{self, Settings, VcsType, BLOOM_CONF};
use crate::domain::{UpstreamTagPattern, VersionTriple, BLOOM_BRANCH, MASTER_BRANCH};
use crate::error::{BloomError, Result};
use crate::git::{remote, ReleaseRepository};
use crate::import::ImportTool;
use crate::manifest::StackManifest;
use crate::reconcile::{self, VersionWarning};
use crate::release::{self, Validation};
use crate::ui;
use crate::vcs;

/// Result of a successful import run
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// Name and version read from the upstream stack.xml
    pub manifest: StackManifest,

    /// File name of the exported archive (e.g., "foo-pkg-1.2.3.tar.gz")
    pub tarball: String,

    /// Newest upstream tag found in the release repository
    pub last_tag: Option<String>,

    /// Version the upstream release was compared against
    pub baseline: VersionTriple,

    /// Version discrepancies that were reported but did not stop the import
    pub warnings: Vec<VersionWarning>,

    /// How the bloom branch requirement was satisfied
    pub validation: Validation,

    /// Local branches created from their remote-tracking counterparts
    pub tracked_branches: Vec<String>,

    /// Whether an initial upstream branch had to be created
    pub created_upstream_branch: bool,

    /// Scratch directory left on disk when `behavior.keep_scratch_dir` is set
    pub scratch_dir: Option<PathBuf>,
}

/// Main import workflow
///
/// Orchestrates the entire import:
/// 1. Track remote bloom/upstream branches and validate the bloom branch
/// 2. Read bloom.conf from the bloom branch
/// 3. Check out and export the upstream sources
/// 4. Reconcile the upstream version with the last upstream tag
/// 5. Create the upstream branch if needed
/// 6. Run the import tool on master
///
/// The branch checked out before the run is restored afterwards on every
/// exit path, as long as it still exists.
pub fn run_import<R: ReleaseRepository>(repo: &R, settings: &Settings) -> Result<ImportOutcome> {
    let original_branch = repo.current_branch()?;
    tracing::debug!(branch = ?original_branch, "starting import");

    let _restore = scopeguard::guard(original_branch, |original| {
        restore_branch(repo, original.as_deref())
    });

    import_upstream(repo, settings)
}

fn restore_branch<R: ReleaseRepository>(repo: &R, original: Option<&str>) {
    let Some(branch) = original else {
        return;
    };

    match repo.has_branch(branch) {
        Ok(true) => {
            if let Err(e) = repo.checkout_branch(branch) {
                tracing::warn!(branch, error = %e, "failed to restore branch");
                ui::display_warning(&format!(
                    "Could not switch back to branch '{}': {}",
                    branch, e
                ));
            }
        }
        Ok(false) => tracing::debug!(branch, "original branch no longer exists"),
        Err(e) => tracing::warn!(branch, error = %e, "cannot list branches to restore"),
    }
}

fn import_upstream<R: ReleaseRepository>(repo: &R, settings: &Settings) -> Result<ImportOutcome> {
    let tracked_branches = release::track_release_branches(repo)?;
    let validation = release::ensure_bloom_branch(repo)?;

    repo.checkout_branch(BLOOM_BRANCH)?;
    let conf_path = repo.workdir().join(BLOOM_CONF);
    if !conf_path.is_file() {
        return Err(BloomError::NotReleaseRepo);
    }

    let upstream = config::read_upstream_config(&conf_path)?;
    ui::summarize_repo_info(&upstream);

    if upstream.vcs_type == VcsType::Git && settings.behavior.check_upstream_not_release_repo {
        ui::display_status("Verifying a couple of things about the upstream git repo");
        remote::assert_is_not_release_repo(&upstream.repository_url)?;
    }

    let scratch = tempfile::Builder::new()
        .prefix("bloom-import-upstream-")
        .disable_cleanup(settings.behavior.keep_scratch_dir)
        .tempdir()?;
    let upstream_dir = scratch.path().join("upstream");
    tracing::info!(scratch = %scratch.path().display(), "checking out upstream");

    let client = vcs::client_for(upstream.vcs_type, &upstream_dir);
    client.checkout(&upstream.repository_url, upstream.branch.as_deref())?;

    let manifest = StackManifest::load(&upstream_dir)?;
    ui::display_manifest(&manifest);

    ui::display_status(&format!("Exporting version {}", manifest.version));
    let tarball_path = client.export(
        &manifest.version,
        &scratch.path().join(manifest.tarball_name()),
    )?;

    let pattern = UpstreamTagPattern::new(settings.tags.upstream_prefix.clone());
    let last_tag = repo.latest_tag_matching(&pattern.glob())?;
    if let Some(tag) = &last_tag {
        ui::display_latest_tag(tag);
    }

    let baseline = reconcile::baseline(last_tag.as_deref(), &manifest.version, &pattern)?;
    let warnings = reconcile::check_version(&manifest.version, baseline)?;
    for warning in &warnings {
        ui::display_version_warning(warning);
    }

    let created_upstream_branch = release::ensure_upstream_branch(repo)?;

    repo.checkout_branch(MASTER_BRANCH)?;

    let tool = ImportTool::from_settings(&settings.import);
    tool.ensure_installed()?;
    tool.import(&tarball_path, repo.workdir())?;

    let tarball = tarball_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let scratch_dir = settings
        .behavior
        .keep_scratch_dir
        .then(|| scratch.path().to_path_buf());

    Ok(ImportOutcome {
        manifest,
        tarball,
        last_tag,
        baseline,
        warnings,
        validation,
        tracked_branches,
        created_upstream_branch,
        scratch_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockReleaseRepository;
    use tempfile::TempDir;

    #[test]
    fn test_not_a_release_repo_restores_branch() {
        let dir = TempDir::new().unwrap();
        let repo = MockReleaseRepository::new(dir.path());
        repo.add_branch("master");
        repo.add_branch("feature");
        repo.set_current(Some("feature"));

        let err = run_import(&repo, &Settings::default()).unwrap_err();
        assert!(matches!(err, BloomError::NotReleaseRepo));
        assert_eq!(repo.current_branch().unwrap().as_deref(), Some("feature"));
        assert!(repo.commits().is_empty());
    }

    #[test]
    fn test_missing_bloom_conf_is_not_a_release_repo() {
        let dir = TempDir::new().unwrap();
        let repo = MockReleaseRepository::new(dir.path());
        repo.add_branch("master");
        repo.add_branch("bloom");
        repo.set_current(Some("master"));

        let err = run_import(&repo, &Settings::default()).unwrap_err();
        assert!(matches!(err, BloomError::NotReleaseRepo));
        assert_eq!(repo.checkouts(), vec!["bloom", "master"]);
        assert_eq!(repo.current_branch().unwrap().as_deref(), Some("master"));
    }

    #[test]
    fn test_config_error_restores_branch() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(BLOOM_CONF), "[bloom]\n\tupstream = x\n").unwrap();

        let repo = MockReleaseRepository::new(dir.path());
        repo.add_branch("master");
        repo.add_branch("bloom");
        repo.set_current(Some("master"));

        let err = run_import(&repo, &Settings::default()).unwrap_err();
        assert!(matches!(err, BloomError::Config(_)));
        assert_eq!(repo.current_branch().unwrap().as_deref(), Some("master"));
    }

    #[test]
    fn test_detached_head_is_left_alone() {
        let dir = TempDir::new().unwrap();
        let repo = MockReleaseRepository::new(dir.path());
        repo.add_branch("master");
        repo.set_current(None);

        assert!(run_import(&repo, &Settings::default()).is_err());
        assert!(repo.checkouts().is_empty());
    }
}
