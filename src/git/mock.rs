use crate::error::{BloomError, Result};
use crate::git::ReleaseRepository;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
struct MockState {
    branches: BTreeSet<String>,
    remote_branches: BTreeSet<String>,
    current: Option<String>,
    /// tag name -> author time of the tagged commit
    tags: BTreeMap<String, i64>,
    commits: Vec<(String, String)>,
    checkouts: Vec<String>,
}

/// Mock release repository for testing without actual git operations
///
/// Branches, tags and commits live in memory. File operations act on the
/// given working directory so callers that edit files still see real files.
pub struct MockReleaseRepository {
    workdir: PathBuf,
    state: RefCell<MockState>,
}

impl MockReleaseRepository {
    /// Create a new mock repository rooted at `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        MockReleaseRepository {
            workdir: workdir.into(),
            state: RefCell::new(MockState::default()),
        }
    }

    /// Add a local branch
    pub fn add_branch(&self, name: impl Into<String>) {
        self.state.borrow_mut().branches.insert(name.into());
    }

    /// Add a remote-tracking branch such as "origin/bloom"
    pub fn add_remote_branch(&self, name: impl Into<String>) {
        self.state.borrow_mut().remote_branches.insert(name.into());
    }

    /// Point HEAD at a branch without checking it out
    pub fn set_current(&self, name: Option<&str>) {
        self.state.borrow_mut().current = name.map(str::to_string);
    }

    /// Add a tag whose commit was authored at `time` seconds
    pub fn add_tag(&self, name: impl Into<String>, time: i64) {
        self.state.borrow_mut().tags.insert(name.into(), time);
    }

    /// (branch, message) of every commit made through the mock, oldest first
    pub fn commits(&self) -> Vec<(String, String)> {
        self.state.borrow().commits.clone()
    }

    /// Every branch checked out through the mock, in order
    pub fn checkouts(&self) -> Vec<String> {
        self.state.borrow().checkouts.clone()
    }

    fn current_or_err(&self) -> Result<String> {
        self.state
            .borrow()
            .current
            .clone()
            .ok_or_else(|| BloomError::config("HEAD is detached"))
    }
}

impl ReleaseRepository for MockReleaseRepository {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        Ok(self.state.borrow().branches.iter().cloned().collect())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.state.borrow().current.clone())
    }

    fn checkout_branch(&self, name: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.branches.contains(name) {
            return Err(BloomError::config(format!("Cannot find branch '{}'", name)));
        }
        state.current = Some(name.to_string());
        state.checkouts.push(name.to_string());
        Ok(())
    }

    fn rename_branch(&self, from: &str, to: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.branches.remove(from) {
            return Err(BloomError::config(format!("Cannot find branch '{}'", from)));
        }
        state.branches.insert(to.to_string());
        if state.current.as_deref() == Some(from) {
            state.current = Some(to.to_string());
        }
        Ok(())
    }

    fn track_remote_branch(&self, name: &str) -> Result<bool> {
        let mut state = self.state.borrow_mut();
        if state.branches.contains(name) {
            return Ok(false);
        }
        let found = state
            .remote_branches
            .iter()
            .any(|r| r.split_once('/').is_some_and(|(_, b)| b == name));
        if found {
            state.branches.insert(name.to_string());
        }
        Ok(found)
    }

    fn latest_tag_matching(&self, glob: &str) -> Result<Option<String>> {
        let prefix = glob.trim_end_matches('*');
        let state = self.state.borrow();
        let mut latest: Option<(i64, &String)> = None;
        for (name, time) in state.tags.iter().filter(|(n, _)| n.starts_with(prefix)) {
            if latest.map_or(true, |(newest, _)| *time >= newest) {
                latest = Some((*time, name));
            }
        }
        Ok(latest.map(|(_, name)| name.clone()))
    }

    fn move_file(&self, from: &str, to: &str) -> Result<()> {
        fs::rename(self.workdir.join(from), self.workdir.join(to))?;
        Ok(())
    }

    fn commit_files(&self, _paths: &[&str], message: &str) -> Result<()> {
        let branch = self.current_or_err()?;
        self.state
            .borrow_mut()
            .commits
            .push((branch, message.to_string()));
        Ok(())
    }

    fn create_orphan_branch(&self, name: &str, message: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.branches.insert(name.to_string());
        state.current = Some(name.to_string());
        state.commits.push((name.to_string(), message.to_string()));
        Ok(())
    }
}
