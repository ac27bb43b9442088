// tests/common/mod.rs
#![allow(dead_code)]

use git2::{build::CheckoutBuilder, Oid, Repository, Signature, Time};
use std::path::Path;

pub const BLOOM_CONF_TEMPLATE: &str = "[bloom]\n\tupstream = {url}\n\tupstreamtype = git\n";

/// Initializes a non-bare repository whose HEAD points at `master`
pub fn init_repo(path: &Path) -> Repository {
    let repo = Repository::init(path).unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    repo.set_head("refs/heads/master").unwrap();
    repo
}

/// Commits `files` as the complete, flat tree of `branch` without touching
/// the working directory. The branch tip (if any) becomes the parent.
pub fn commit_on(
    repo: &Repository,
    branch: &str,
    files: &[(&str, &str)],
    message: &str,
    time: i64,
) -> Oid {
    let mut builder = repo.treebuilder(None).unwrap();
    for (name, contents) in files {
        let blob = repo.blob(contents.as_bytes()).unwrap();
        builder.insert(name, blob, 0o100644).unwrap();
    }
    let tree = repo.find_tree(builder.write().unwrap()).unwrap();

    let signature = Signature::new("Test User", "test@example.com", &Time::new(time, 0)).unwrap();
    let refname = format!("refs/heads/{}", branch);
    let parent = repo
        .find_reference(&refname)
        .ok()
        .and_then(|r| r.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(Some(&refname), &signature, &signature, message, &tree, &parents)
        .unwrap()
}

/// Points HEAD at `branch` and forces the working directory to match it
pub fn switch_to(repo: &Repository, branch: &str) {
    repo.set_head(&format!("refs/heads/{}", branch)).unwrap();
    repo.checkout_head(Some(CheckoutBuilder::new().force())).unwrap();
}

/// Tip commit of a local branch
pub fn branch_tip<'r>(repo: &'r Repository, branch: &str) -> git2::Commit<'r> {
    repo.find_branch(branch, git2::BranchType::Local)
        .unwrap()
        .get()
        .peel_to_commit()
        .unwrap()
}

/// Upstream source repository with a stack.xml on master
pub fn upstream_repo(path: &Path, name: &str, version: &str) -> Repository {
    let repo = init_repo(path);
    let stack = format!(
        "<?xml version=\"1.0\"?>\n<stack>\n  <name>{}</name>\n  <version>{}</version>\n</stack>\n",
        name, version
    );
    let oid = commit_on(
        &repo,
        "master",
        &[("stack.xml", &stack), ("CMakeLists.txt", "project(demo)\n")],
        "Release",
        1_000,
    );
    {
        let object = repo.find_object(oid, None).unwrap();
        repo.tag_lightweight(version, &object, false).unwrap();
    }
    switch_to(&repo, "master");
    repo
}

/// Release repository with `master` and a `bloom` branch pointing at `upstream_url`.
/// The working directory is left on `master`.
pub fn release_repo(path: &Path, upstream_url: &str) -> Repository {
    let repo = init_repo(path);
    commit_on(&repo, "master", &[("README", "release repo\n")], "Initial", 1_000);
    commit_on(
        &repo,
        "bloom",
        &[("bloom.conf", &BLOOM_CONF_TEMPLATE.replace("{url}", upstream_url))],
        "Add bloom.conf",
        1_001,
    );
    switch_to(&repo, "master");
    repo
}
