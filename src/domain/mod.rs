//! Domain logic - pure release rules independent of git operations

pub mod branch;
pub mod tag;
pub mod version;

pub use branch::{
    ReleaseRepoState, BLOOM_BRANCH, LEGACY_CATKIN_BRANCH, MASTER_BRANCH, UPSTREAM_BRANCH,
};
pub use tag::{UpstreamTagPattern, DEFAULT_UPSTREAM_TAG_PREFIX};
pub use version::VersionTriple;
