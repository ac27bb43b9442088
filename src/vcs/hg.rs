use super::{archive_root, tarball_path, VcsClient};
use crate::error::Result;
use crate::process;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Mercurial upstream, driven through the `hg` command line.
pub struct HgClient {
    path: PathBuf,
}

impl HgClient {
    pub fn new(path: PathBuf) -> Self {
        HgClient { path }
    }
}

impl VcsClient for HgClient {
    fn path(&self) -> &Path {
        &self.path
    }

    fn checkout(&self, url: &str, branch: Option<&str>) -> Result<()> {
        let mut cmd = Command::new("hg");
        cmd.arg("clone");
        if let Some(branch) = branch {
            cmd.arg("-u").arg(branch);
        }
        cmd.arg(url).arg(&self.path);
        process::run_captured(&mut cmd)?;
        Ok(())
    }

    fn export(&self, version: &str, basepath: &Path) -> Result<PathBuf> {
        let archive = tarball_path(basepath);
        let mut cmd = Command::new("hg");
        cmd.current_dir(&self.path)
            .args(["archive", "-t", "tgz", "-r", version, "--prefix"])
            .arg(archive_root(basepath)?)
            .arg(&archive);
        process::run_captured(&mut cmd)?;
        Ok(archive)
    }
}
