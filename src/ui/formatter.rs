//! Pure formatting functions for UI output.
//!
//! Everything here builds strings; printing happens in the parent module.

use console::style;

use crate::config::UpstreamConfig;
use crate::reconcile::VersionWarning;

/// Text shown for an unset upstream branch
pub const NO_BRANCH_SET: &str = "(No branch set)";

/// "label: value" with the value in bold
pub fn format_field(label: &str, value: &str) -> String {
    format!("{}: {}", label, style(value).bold())
}

/// The three upstream settings read from bloom.conf, one per line.
pub fn format_repo_info(config: &UpstreamConfig) -> Vec<String> {
    vec![
        format_field("upstream repo", &config.repository_url),
        format_field("upstream type", config.vcs_type.as_str()),
        format_field(
            "upstream branch",
            config.branch.as_deref().unwrap_or(NO_BRANCH_SET),
        ),
    ]
}

/// Warning line for a version discrepancy.
pub fn format_version_warning(warning: &VersionWarning) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), warning)
}

/// Usage text printed when the tool is run outside a repository.
pub fn format_usage() -> String {
    "usage: git bloom-import-upstream\n\nMust be in a valid git bloom release repository.\n"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VcsType;

    fn plain(s: &str) -> String {
        console::strip_ansi_codes(s).into_owned()
    }

    #[test]
    fn test_format_repo_info_without_branch() {
        let config = UpstreamConfig {
            repository_url: "https://example/repo".to_string(),
            vcs_type: VcsType::Git,
            branch: None,
        };
        let lines: Vec<String> = format_repo_info(&config).iter().map(|l| plain(l)).collect();
        assert_eq!(
            lines,
            vec![
                "upstream repo: https://example/repo",
                "upstream type: git",
                "upstream branch: (No branch set)",
            ]
        );
    }

    #[test]
    fn test_format_repo_info_with_branch() {
        let config = UpstreamConfig {
            repository_url: "https://example/repo".to_string(),
            vcs_type: VcsType::Hg,
            branch: Some("default".to_string()),
        };
        let lines = format_repo_info(&config);
        assert_eq!(plain(&lines[1]), "upstream type: hg");
        assert_eq!(plain(&lines[2]), "upstream branch: default");
    }

    #[test]
    fn test_format_version_warning() {
        let warning = VersionWarning::Unchanged {
            version: "1.2.3".to_string(),
        };
        let line = plain(&format_version_warning(&warning));
        assert!(line.starts_with("⚠ WARNING: Version discrepancy"));
        assert!(line.contains("1.2.3"));
    }

    #[test]
    fn test_format_usage() {
        assert!(format_usage().starts_with("usage: git bloom-import-upstream"));
    }
}
