//! Upstream source backends.
//!
//! Each supported version control system implements [VcsClient] for one
//! local checkout directory. [client_for] picks the implementation named by
//! the `bloom.upstreamtype` configuration value.

pub mod bzr;
pub mod git;
pub mod hg;
pub mod svn;

use crate::config::VcsType;
use crate::error::{BloomError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Checkout and export of an upstream repository.
pub trait VcsClient {
    /// Directory holding the local checkout
    fn path(&self) -> &Path;

    /// Fetches `url` into [VcsClient::path], on `branch` when given
    fn checkout(&self, url: &str, branch: Option<&str>) -> Result<()>;

    /// Exports `version` of the checkout as `<basepath>.tar.gz`
    ///
    /// The archive contains a single top-level directory named after the
    /// last component of `basepath`.
    ///
    /// # Returns
    /// Path of the written archive
    fn export(&self, version: &str, basepath: &Path) -> Result<PathBuf>;
}

/// Client for the given backend, working in `path`
pub fn client_for(vcs_type: VcsType, path: &Path) -> Box<dyn VcsClient> {
    let path = path.to_path_buf();
    match vcs_type {
        VcsType::Git => Box::new(git::GitClient::new(path)),
        VcsType::Hg => Box::new(hg::HgClient::new(path)),
        VcsType::Svn => Box::new(svn::SvnClient::new(path)),
        VcsType::Bzr => Box::new(bzr::BzrClient::new(path)),
    }
}

/// `<basepath>.tar.gz`, keeping any dots already in the base name
pub fn tarball_path(basepath: &Path) -> PathBuf {
    let mut path: OsString = basepath.as_os_str().to_owned();
    path.push(".tar.gz");
    PathBuf::from(path)
}

/// Last component of `basepath`, used as the archive's top-level directory
pub fn archive_root(basepath: &Path) -> Result<String> {
    basepath
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            BloomError::vcs(format!(
                "Export path '{}' has no file name",
                basepath.display()
            ))
        })
}
