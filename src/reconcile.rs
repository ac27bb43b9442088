use std::fmt;

use crate::domain::{UpstreamTagPattern, VersionTriple};
use crate::error::{BloomError, Result};

/// Non-fatal version problems found while comparing a new upstream release
/// against the release history. The import still proceeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionWarning {
    /// The upstream version is lower than the previous release
    Regression { upstream: String, previous: String },
    /// The upstream version equals the previous release
    Unchanged { version: String },
}

impl fmt::Display for VersionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionWarning::Regression { upstream, previous } => write!(
                f,
                "Version discrepancy:\nThe upstream version, {}, should be greater than the previous\n\
                 release version, {}.\n\nUpstream should rerelease or you should fix the release repo.",
                upstream, previous
            ),
            VersionWarning::Unchanged { version } => write!(
                f,
                "Version discrepancy:\nThe upstream version, {}, is equal to a previous version.",
                version
            ),
        }
    }
}

/// Determines the version triple the new release is compared against.
///
/// With a previous release tag the triple comes from the tag. Without one the
/// upstream version is segmented instead, so a first import always compares
/// equal to itself.
pub fn baseline(
    last_tag: Option<&str>,
    upstream_version: &str,
    pattern: &UpstreamTagPattern,
) -> Result<VersionTriple> {
    match last_tag {
        Some(tag) => pattern.versions_from_tag(tag),
        None => VersionTriple::segment(upstream_version),
    }
}

/// Compares the upstream version to the baseline.
///
/// The less-than and equality checks run independently of each other.
///
/// # Returns
/// * `Ok(warnings)` - Zero or one warning; empty when upstream moved forward
/// * `Err` - If the upstream version is not a strict `major.minor.patch` version
pub fn check_version(upstream_version: &str, baseline: VersionTriple) -> Result<Vec<VersionWarning>> {
    let upstream = semver::Version::parse(upstream_version.trim()).map_err(|e| {
        BloomError::version(format!(
            "Upstream version '{}' is not a strict <major>.<minor>.<patch> version: {}",
            upstream_version, e
        ))
    })?;
    if !upstream.pre.is_empty() || !upstream.build.is_empty() {
        return Err(BloomError::version(format!(
            "Upstream version '{}' is not a strict <major>.<minor>.<patch> version: \
             pre-release and build metadata are not allowed",
            upstream_version
        )));
    }
    let previous = baseline.to_semver();

    let mut warnings = Vec::new();
    if upstream < previous {
        warnings.push(VersionWarning::Regression {
            upstream: upstream_version.to_string(),
            previous: baseline.to_string(),
        });
    }
    if upstream == previous {
        warnings.push(VersionWarning::Unchanged {
            version: upstream_version.to_string(),
        });
    }

    for warning in &warnings {
        tracing::warn!(%upstream, %previous, "{}", warning);
    }
    Ok(warnings)
}
