use crate::error::{BloomError, Result};
use git2::{CredentialType, Direction, RemoteCallbacks};
use std::path::Path;

/// Remote callbacks that authenticate through SSH keys in `~/.ssh/`, the SSH
/// agent, or git's default credential helpers.
pub fn credential_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        git2::Cred::default()
    });
    callbacks
}

/// Lists the reference names a remote advertises (`git ls-remote <url>`).
pub fn list_remote_refs(url: &str) -> Result<Vec<String>> {
    let mut remote = git2::Remote::create_detached(url)?;
    let connection = remote
        .connect_auth(Direction::Fetch, Some(credential_callbacks()), None)
        .map_err(|e| BloomError::vcs(format!("Cannot reach '{}': {}", url, e)))?;

    let refs = connection
        .list()?
        .iter()
        .map(|head| head.name().to_string())
        .collect();
    Ok(refs)
}

/// True when the advertised refs belong to a git-buildpackage release
/// repository instead of an upstream source repository.
pub fn looks_like_release_repo(refs: &[String]) -> bool {
    refs.iter()
        .any(|r| r == "refs/heads/upstream" || r.starts_with("refs/tags/upstream/"))
}

/// Fails when a git upstream is itself a release repository.
pub fn assert_is_not_release_repo(url: &str) -> Result<()> {
    let refs = list_remote_refs(url)?;
    if looks_like_release_repo(&refs) {
        return Err(BloomError::config(format!(
            "The upstream repository '{}' has an upstream branch or upstream/* tags; \
             it looks like a git-buildpackage release repository, not the upstream source",
            url
        )));
    }
    Ok(())
}

/// Clones `url` into `path`, optionally checking out `branch`.
pub fn clone(url: &str, branch: Option<&str>, path: &Path) -> Result<git2::Repository> {
    let mut fetch_options = git2::FetchOptions::new();
    fetch_options.remote_callbacks(credential_callbacks());
    fetch_options.download_tags(git2::AutotagOption::All);

    let mut builder = git2::build::RepoBuilder::new();
    builder.fetch_options(fetch_options);
    if let Some(branch) = branch {
        builder.branch(branch);
    }

    tracing::debug!(url, branch = ?branch, path = %path.display(), "cloning");
    builder.clone(url, path).map_err(|e| {
        BloomError::vcs(format!(
            "Failed to clone '{}'{}: {}",
            url,
            branch.map(|b| format!(" (branch '{}')", b)).unwrap_or_default(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_plain_upstream_repo() {
        assert!(!looks_like_release_repo(&refs(&[
            "HEAD",
            "refs/heads/master",
            "refs/heads/groovy-devel",
            "refs/tags/1.2.3",
        ])));
    }

    #[test]
    fn test_upstream_branch_marks_release_repo() {
        assert!(looks_like_release_repo(&refs(&[
            "refs/heads/master",
            "refs/heads/upstream",
        ])));
    }

    #[test]
    fn test_upstream_tags_mark_release_repo() {
        assert!(looks_like_release_repo(&refs(&[
            "refs/heads/master",
            "refs/tags/upstream/0.1.0",
        ])));
    }

    #[test]
    fn test_similar_names_are_not_release_markers() {
        assert!(!looks_like_release_repo(&refs(&[
            "refs/heads/upstream-sync",
            "refs/tags/upstream-1.0.0",
        ])));
    }
}
