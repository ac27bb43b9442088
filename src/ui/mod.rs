//! User interface module - terminal output of the import workflow.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Printing to stdout/stderr

use console::style;

use crate::config::UpstreamConfig;
use crate::manifest::StackManifest;
use crate::reconcile::VersionWarning;

pub mod formatter;

pub use formatter::{format_field, format_repo_info, format_usage, format_version_warning};

/// Print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a non-fatal warning in yellow.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Print a bold headline followed by plain text on the same line.
pub fn display_notice(headline: &str, rest: &str) {
    println!("{}{}", style(headline).bold(), rest);
}

/// Print a version discrepancy found during reconciliation.
pub fn display_version_warning(warning: &VersionWarning) {
    eprintln!("{}", format_version_warning(warning));
}

/// Summarize the upstream settings read from bloom.conf.
pub fn summarize_repo_info(config: &UpstreamConfig) {
    for line in format_repo_info(config) {
        println!("{}", line);
    }
}

/// Summarize what the upstream stack.xml declares.
pub fn display_manifest(manifest: &StackManifest) {
    println!(
        "Upstream's stack.xml has version {}",
        style(&manifest.version).bold()
    );
    println!("Upstream's name is {}", style(&manifest.name).bold());
}

/// Print the newest upstream tag already in the release repository.
pub fn display_latest_tag(tag: &str) {
    println!(
        "The latest upstream tag in the release repo is {}",
        style(tag).bold()
    );
}

/// Print the usage text.
pub fn display_usage() {
    print!("{}", format_usage());
}
