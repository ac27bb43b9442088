use super::{archive_root, tarball_path, VcsClient};
use crate::error::{BloomError, Result};
use crate::process;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Subversion upstream. Branches are separate URLs in svn, so the configured
/// branch is not applied.
pub struct SvnClient {
    path: PathBuf,
}

impl SvnClient {
    pub fn new(path: PathBuf) -> Self {
        SvnClient { path }
    }
}

impl VcsClient for SvnClient {
    fn path(&self) -> &Path {
        &self.path
    }

    fn checkout(&self, url: &str, branch: Option<&str>) -> Result<()> {
        if let Some(branch) = branch {
            tracing::warn!(branch, "svn upstreams ignore bloom.upstreambranch; put the branch in the URL");
        }
        let mut cmd = Command::new("svn");
        cmd.arg("checkout").arg(url).arg(&self.path);
        process::run_captured(&mut cmd)?;
        Ok(())
    }

    fn export(&self, version: &str, basepath: &Path) -> Result<PathBuf> {
        tracing::debug!(version, "svn exports the checked out revision");
        let parent = basepath.parent().ok_or_else(|| {
            BloomError::vcs(format!("Export path '{}' has no parent", basepath.display()))
        })?;
        let root = archive_root(basepath)?;

        let mut export = Command::new("svn");
        export.arg("export").arg(&self.path).arg(basepath);
        process::run_captured(&mut export)?;

        let archive = tarball_path(basepath);
        let mut tar = Command::new("tar");
        tar.arg("-czf")
            .arg(&archive)
            .arg("-C")
            .arg(parent)
            .arg(&root);
        process::run_captured(&mut tar)?;
        Ok(archive)
    }
}
