use crate::error::{BloomError, Result};
use git2::{build::CheckoutBuilder, BranchType, Commit, ErrorCode, Repository as Git2Repo, Signature};
use std::fs;
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    workdir: PathBuf,
}

impl Git2Repository {
    /// Open or discover a git repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Self::from_git2(repo)
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Result<Self> {
        let workdir = repo
            .workdir()
            .ok_or_else(|| BloomError::config("A release repository needs a working tree"))?
            .to_path_buf();
        Ok(Git2Repository { repo, workdir })
    }

    /// Underlying git2 handle
    pub fn git2(&self) -> &Git2Repo {
        &self.repo
    }

    fn signature(&self) -> Result<Signature<'static>> {
        match self.repo.signature() {
            Ok(sig) => Ok(sig),
            Err(_) => Ok(Signature::now("bloom", "bloom@localhost")?),
        }
    }

    fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl super::ReleaseRepository for Git2Repository {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = entry?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn current_branch(&self) -> Result<Option<String>> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().map(str::to_string)),
            Ok(_) => Ok(None),
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = self.repo.find_reference("HEAD")?;
                Ok(head
                    .symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .map(str::to_string))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn checkout_branch(&self, name: &str) -> Result<()> {
        let refname = format!("refs/heads/{}", name);
        let target = self.repo.revparse_single(&refname).map_err(|e| {
            BloomError::config(format!("Cannot find branch '{}': {}", name, e.message()))
        })?;

        let mut options = CheckoutBuilder::new();
        options.safe();
        self.repo.checkout_tree(&target, Some(&mut options))?;
        self.repo.set_head(&refname)?;

        tracing::debug!(branch = name, "checked out");
        Ok(())
    }

    fn rename_branch(&self, from: &str, to: &str) -> Result<()> {
        let mut branch = self.repo.find_branch(from, BranchType::Local)?;
        branch.rename(to, false)?;
        tracing::debug!(from, to, "renamed branch");
        Ok(())
    }

    fn track_remote_branch(&self, name: &str) -> Result<bool> {
        if super::ReleaseRepository::has_branch(self, name)? {
            return Ok(false);
        }

        let mut candidates = Vec::new();
        for entry in self.repo.branches(Some(BranchType::Remote))? {
            let (branch, _) = entry?;
            if let Some(full_name) = branch.name()? {
                if full_name
                    .split_once('/')
                    .is_some_and(|(_, branch_name)| branch_name == name)
                {
                    candidates.push(full_name.to_string());
                }
            }
        }

        // "origin" first, then the other remotes alphabetically
        candidates.sort_by(|a, b| {
            let a_origin = a.starts_with("origin/");
            let b_origin = b.starts_with("origin/");
            b_origin.cmp(&a_origin).then_with(|| a.cmp(b))
        });

        let Some(remote_branch) = candidates.first() else {
            return Ok(false);
        };

        let commit = self
            .repo
            .find_branch(remote_branch, BranchType::Remote)?
            .get()
            .peel_to_commit()?;
        let mut local = self.repo.branch(name, &commit, false)?;
        if let Err(e) = local.set_upstream(Some(remote_branch)) {
            tracing::debug!(branch = name, error = %e, "created branch without upstream");
        }

        tracing::info!(branch = name, remote = %remote_branch, "tracking remote branch");
        Ok(true)
    }

    fn latest_tag_matching(&self, glob: &str) -> Result<Option<String>> {
        let tags = self.repo.tag_names(Some(glob))?;

        let mut latest: Option<(i64, String)> = None;
        for tag_name in tags.iter().flatten() {
            let commit = match self
                .repo
                .revparse_single(&format!("refs/tags/{}", tag_name))
                .and_then(|obj| obj.peel_to_commit())
            {
                Ok(commit) => commit,
                Err(e) => {
                    tracing::debug!(tag = tag_name, error = %e, "skipping tag without a commit");
                    continue;
                }
            };

            let when = commit.author().when().seconds();
            if latest.as_ref().map_or(true, |(newest, _)| when >= *newest) {
                latest = Some((when, tag_name.to_string()));
            }
        }

        Ok(latest.map(|(_, name)| name))
    }

    fn move_file(&self, from: &str, to: &str) -> Result<()> {
        fs::rename(self.workdir.join(from), self.workdir.join(to))?;

        let mut index = self.repo.index()?;
        index.remove_path(Path::new(from))?;
        index.add_path(Path::new(to))?;
        index.write()?;

        tracing::debug!(from, to, "moved file");
        Ok(())
    }

    fn commit_files(&self, paths: &[&str], message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(Path::new(path))?;
        }
        index.write()?;

        let tree = self.repo.find_tree(index.write_tree()?)?;
        let signature = self.signature()?;
        let parents: Vec<Commit<'_>> = self.head_commit()?.into_iter().collect();
        let parent_refs: Vec<&Commit<'_>> = parents.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parent_refs)?;
        tracing::debug!(%oid, message, "committed");
        Ok(())
    }

    fn create_orphan_branch(&self, name: &str, message: &str) -> Result<()> {
        self.repo.set_head(&format!("refs/heads/{}", name))?;

        let mut index = self.repo.index()?;
        index.clear()?;
        index.write()?;

        for entry in fs::read_dir(&self.workdir)? {
            let entry = entry?;
            if entry.file_name() == ".git" {
                continue;
            }
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }

        let tree = self.repo.find_tree(index.write_tree()?)?;
        let signature = self.signature()?;
        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &[])?;

        tracing::debug!(branch = name, %oid, "created orphan branch");
        Ok(())
    }
}
