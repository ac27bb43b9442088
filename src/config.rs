use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::domain::DEFAULT_UPSTREAM_TAG_PREFIX;
use crate::error::{BloomError, Result};

/// Name of the release configuration file kept on the bloom branch
pub const BLOOM_CONF: &str = "bloom.conf";
/// Previous-generation name of [`BLOOM_CONF`]
pub const LEGACY_CATKIN_CONF: &str = "catkin.conf";

const UPSTREAM_KEY: &str = "bloom.upstream";
const UPSTREAM_TYPE_KEY: &str = "bloom.upstreamtype";
const UPSTREAM_BRANCH_KEY: &str = "bloom.upstreambranch";

/// Version control system hosting the upstream sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcsType {
    Git,
    Hg,
    Svn,
    Bzr,
}

impl VcsType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VcsType::Git => "git",
            VcsType::Hg => "hg",
            VcsType::Svn => "svn",
            VcsType::Bzr => "bzr",
        }
    }
}

impl FromStr for VcsType {
    type Err = BloomError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "git" => Ok(VcsType::Git),
            "hg" => Ok(VcsType::Hg),
            "svn" => Ok(VcsType::Svn),
            "bzr" => Ok(VcsType::Bzr),
            other => Err(BloomError::config(format!(
                "Unsupported upstream type '{}', expected one of: git, hg, svn, bzr",
                other
            ))),
        }
    }
}

impl fmt::Display for VcsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream description stored in `bloom.conf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub repository_url: String,
    pub vcs_type: VcsType,
    /// `None` means the backend's default branch
    pub branch: Option<String>,
}

/// Reads the `[bloom]` section of a `bloom.conf` file.
///
/// `bloom.upstream` and `bloom.upstreamtype` are required. A missing or empty
/// `bloom.upstreambranch` yields `branch: None`.
pub fn read_upstream_config(path: &Path) -> Result<UpstreamConfig> {
    let config = git2::Config::open(path)?;

    let required = |key: &str| -> Result<String> {
        match config.get_string(key) {
            Ok(value) => Ok(value.trim().to_string()),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Err(BloomError::config(format!(
                "'{}' is not set in {}",
                key,
                path.display()
            ))),
            Err(e) => Err(e.into()),
        }
    };

    let repository_url = required(UPSTREAM_KEY)?;
    let vcs_type: VcsType = required(UPSTREAM_TYPE_KEY)?.parse()?;

    let branch = match config.get_string(UPSTREAM_BRANCH_KEY) {
        Ok(value) => Some(value.trim().to_string()).filter(|b| !b.is_empty()),
        Err(e) if e.code() == git2::ErrorCode::NotFound => None,
        Err(e) => return Err(e.into()),
    };

    tracing::debug!(
        url = %repository_url,
        vcs = %vcs_type,
        branch = ?branch,
        "read {}",
        path.display()
    );

    Ok(UpstreamConfig {
        repository_url,
        vcs_type,
        branch,
    })
}

/// Tool settings, independent of any single release repository.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Settings {
    #[serde(default)]
    pub import: ImportSettings,

    #[serde(default)]
    pub tags: TagSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,
}

fn default_import_program() -> String {
    "git-import-orig".to_string()
}

/// How the archive import tool is launched.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ImportSettings {
    #[serde(default = "default_import_program")]
    pub program: String,

    /// Extra arguments placed before the tarball path
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for ImportSettings {
    fn default() -> Self {
        ImportSettings {
            program: default_import_program(),
            args: Vec::new(),
        }
    }
}

fn default_upstream_prefix() -> String {
    DEFAULT_UPSTREAM_TAG_PREFIX.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagSettings {
    #[serde(default = "default_upstream_prefix")]
    pub upstream_prefix: String,
}

impl Default for TagSettings {
    fn default() -> Self {
        TagSettings {
            upstream_prefix: default_upstream_prefix(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Runtime behavior switches.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorSettings {
    /// Leave the scratch checkout and tarball on disk after the run
    #[serde(default)]
    pub keep_scratch_dir: bool,

    /// Refuse git upstreams that already look like a git-buildpackage release repo
    #[serde(default = "default_true")]
    pub check_upstream_not_release_repo: bool,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        BehaviorSettings {
            keep_scratch_dir: false,
            check_upstream_not_release_repo: true,
        }
    }
}

/// Loads tool settings from file or returns defaults.
///
/// Attempts to load settings in the following order:
/// 1. Custom path provided as parameter
/// 2. `bloom-import.toml` in current directory
/// 3. `bloom/import-upstream.toml` in the user config directory
/// 4. Default settings if no file found
///
/// # Returns
/// * `Ok(Settings)` - Loaded or default settings
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_settings(settings_path: Option<&Path>) -> Result<Settings> {
    let source = if let Some(path) = settings_path {
        path.to_path_buf()
    } else if Path::new("./bloom-import.toml").exists() {
        Path::new("./bloom-import.toml").to_path_buf()
    } else if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("bloom").join("import-upstream.toml");
        if path.exists() {
            path
        } else {
            return Ok(Settings::default());
        }
    } else {
        return Ok(Settings::default());
    };

    let contents = fs::read_to_string(&source)?;
    let settings: Settings = toml::from_str(&contents).map_err(|e| {
        BloomError::config(format!("Cannot parse {}: {}", source.display(), e))
    })?;
    tracing::debug!("loaded settings from {}", source.display());
    Ok(settings)
}
