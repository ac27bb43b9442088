pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod import;
pub mod manifest;
pub mod process;
pub mod reconcile;
pub mod release;
pub mod ui;
pub mod vcs;

pub use error::{BloomError, Result};
