use crate::error::{BloomError, Result};
use std::fmt;

/// Major/minor/patch triple used as the comparison baseline for a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionTriple {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl VersionTriple {
    /// Create a new version triple
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        VersionTriple {
            major,
            minor,
            patch,
        }
    }

    /// Segment a version string into its three components (e.g., "1.2.3" -> (1,2,3))
    ///
    /// Exactly three dot separated numeric components are accepted.
    pub fn segment(version: &str) -> Result<Self> {
        let parts: Vec<&str> = version.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(BloomError::version(format!(
                "Invalid version '{}', expected: <major>.<minor>.<patch>",
                version
            )));
        }

        let component = |name: &str, value: &str| {
            value.parse::<u64>().map_err(|_| {
                BloomError::version(format!(
                    "Invalid {} version '{}' in '{}'",
                    name, value, version
                ))
            })
        };

        Ok(VersionTriple {
            major: component("major", parts[0])?,
            minor: component("minor", parts[1])?,
            patch: component("patch", parts[2])?,
        })
    }

    pub fn to_semver(self) -> semver::Version {
        semver::Version::new(self.major, self.minor, self.patch)
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
