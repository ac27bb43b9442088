use super::{archive_root, tarball_path, VcsClient};
use crate::error::Result;
use crate::process;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Bazaar upstream; versions are exported from the matching tag.
pub struct BzrClient {
    path: PathBuf,
}

impl BzrClient {
    pub fn new(path: PathBuf) -> Self {
        BzrClient { path }
    }
}

impl VcsClient for BzrClient {
    fn path(&self) -> &Path {
        &self.path
    }

    fn checkout(&self, url: &str, branch: Option<&str>) -> Result<()> {
        if let Some(branch) = branch {
            tracing::warn!(branch, "bzr upstreams ignore bloom.upstreambranch; put the branch in the URL");
        }
        let mut cmd = Command::new("bzr");
        cmd.arg("branch").arg(url).arg(&self.path);
        process::run_captured(&mut cmd)?;
        Ok(())
    }

    fn export(&self, version: &str, basepath: &Path) -> Result<PathBuf> {
        let archive = tarball_path(basepath);
        let mut cmd = Command::new("bzr");
        cmd.current_dir(&self.path)
            .arg("export")
            .arg("--format=tgz")
            .arg(format!("--root={}", archive_root(basepath)?))
            .arg("-r")
            .arg(format!("tag:{}", version))
            .arg(&archive);
        process::run_captured(&mut cmd)?;
        Ok(archive)
    }
}
