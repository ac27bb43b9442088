use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for bloom-import-upstream operations
#[derive(Error, Debug)]
pub enum BloomError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("No stack.xml at {}", .0.display())]
    MissingManifest(PathBuf),

    #[error("VCS error: {0}")]
    Vcs(String),

    #[error("Command '{command}' failed: {detail}")]
    Command { command: String, detail: String },

    #[error(
        "This does not appear to be a bloom release repo. Please initialize it first using: \
         git bloom-set-upstream <UPSTREAM_VCS_URL> <VCS_TYPE>"
    )]
    NotReleaseRepo,

    #[error("{program} not detected, did you install git-buildpackage?")]
    ImportToolMissing { program: String },

    #[error("{program} failed '{command}'")]
    ImportFailed { program: String, command: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in bloom-import-upstream
pub type Result<T> = std::result::Result<T, BloomError>;

impl BloomError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BloomError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        BloomError::Version(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        BloomError::Manifest(msg.into())
    }

    /// Create a VCS backend error with context
    pub fn vcs(msg: impl Into<String>) -> Self {
        BloomError::Vcs(msg.into())
    }

    /// Create a subprocess error for the given command line
    pub fn command(command: impl Into<String>, detail: impl Into<String>) -> Self {
        BloomError::Command {
            command: command.into(),
            detail: detail.into(),
        }
    }
}
