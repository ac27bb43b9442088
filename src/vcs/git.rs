use super::{archive_root, tarball_path, VcsClient};
use crate::error::Result;
use crate::git::remote;
use crate::process;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git upstream: cloned with libgit2, exported with `git archive`.
pub struct GitClient {
    path: PathBuf,
}

impl GitClient {
    pub fn new(path: PathBuf) -> Self {
        GitClient { path }
    }
}

impl VcsClient for GitClient {
    fn path(&self) -> &Path {
        &self.path
    }

    fn checkout(&self, url: &str, branch: Option<&str>) -> Result<()> {
        remote::clone(url, branch, &self.path)?;
        Ok(())
    }

    fn export(&self, version: &str, basepath: &Path) -> Result<PathBuf> {
        let archive = tarball_path(basepath);
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.path)
            .arg("archive")
            .arg("--format=tar.gz")
            .arg(format!("--prefix={}/", archive_root(basepath)?))
            .arg("-o")
            .arg(&archive)
            .arg(version);
        process::run_captured(&mut cmd)?;
        Ok(archive)
    }
}
