use crate::domain::VersionTriple;
use crate::error::{BloomError, Result};

/// Default prefix git-import-orig puts in front of imported versions
pub const DEFAULT_UPSTREAM_TAG_PREFIX: &str = "upstream/";

/// Naming pattern of the tags recording previous upstream imports
/// (e.g., "upstream/1.2.3")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTagPattern {
    pub prefix: String,
}

impl UpstreamTagPattern {
    /// Create a new tag pattern from its prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        UpstreamTagPattern {
            prefix: prefix.into(),
        }
    }

    /// Glob accepted by `git tag -l` and `git2::Repository::tag_names`
    pub fn glob(&self) -> String {
        format!("{}*", self.prefix)
    }

    /// Extract the version triple a release tag encodes
    pub fn versions_from_tag(&self, tag: &str) -> Result<VersionTriple> {
        let version = tag.strip_prefix(self.prefix.as_str()).ok_or_else(|| {
            BloomError::version(format!(
                "Tag '{}' does not start with '{}'",
                tag, self.prefix
            ))
        })?;
        VersionTriple::segment(version)
    }
}

impl Default for UpstreamTagPattern {
    fn default() -> Self {
        UpstreamTagPattern::new(DEFAULT_UPSTREAM_TAG_PREFIX)
    }
}
