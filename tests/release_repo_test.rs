// tests/release_repo_test.rs
mod common;

use bloom_import_upstream::git::{Git2Repository, ReleaseRepository};
use bloom_import_upstream::release::{self, Validation};
use bloom_import_upstream::BloomError;
use common::{branch_tip, commit_on, init_repo, switch_to};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_catkin_branch_is_converted_to_bloom() {
    let dir = TempDir::new().unwrap();
    let repo = init_repo(dir.path());
    commit_on(&repo, "master", &[("README", "release\n")], "Initial", 1_000);
    let catkin_tip = commit_on(
        &repo,
        "catkin",
        &[("catkin.conf", "[catkin]\n\tupstream = https://example.com/foo.git\n")],
        "Add catkin.conf",
        1_001,
    );
    switch_to(&repo, "master");

    let release_repo = Git2Repository::open(dir.path()).unwrap();
    let validation = release::ensure_bloom_branch(&release_repo).unwrap();
    assert_eq!(validation, Validation::MigratedFromCatkin);

    let branches = release_repo.local_branches().unwrap();
    assert!(branches.contains(&"bloom".to_string()));
    assert!(!branches.contains(&"catkin".to_string()));
    assert_eq!(
        release_repo.current_branch().unwrap().as_deref(),
        Some("bloom")
    );

    let conf = fs::read_to_string(dir.path().join("bloom.conf")).unwrap();
    assert!(conf.contains("[bloom]"));
    assert!(!conf.contains("[catkin]"));
    assert!(!dir.path().join("catkin.conf").exists());

    let tip = branch_tip(&repo, "bloom");
    assert_eq!(tip.message(), Some("rename catkin.conf to bloom.conf"));
    assert_eq!(tip.parent_id(0).unwrap(), catkin_tip);
    let tree = tip.tree().unwrap();
    assert!(tree.get_name("bloom.conf").is_some());
    assert!(tree.get_name("catkin.conf").is_none());
}

#[test]
fn test_repository_without_bloom_or_catkin_is_untouched() {
    let dir = TempDir::new().unwrap();
    let repo = init_repo(dir.path());
    let tip = commit_on(&repo, "master", &[("README", "release\n")], "Initial", 1_000);
    switch_to(&repo, "master");

    let release_repo = Git2Repository::open(dir.path()).unwrap();
    let err = release::ensure_bloom_branch(&release_repo).unwrap_err();
    assert!(matches!(err, BloomError::NotReleaseRepo));

    assert_eq!(release_repo.local_branches().unwrap(), vec!["master"]);
    assert_eq!(branch_tip(&repo, "master").id(), tip);
}

#[test]
fn test_existing_bloom_branch_needs_no_migration() {
    let dir = TempDir::new().unwrap();
    let repo = common::release_repo(dir.path(), "https://example.com/foo.git");
    let bloom_tip = branch_tip(&repo, "bloom").id();

    let release_repo = Git2Repository::open(dir.path()).unwrap();
    assert_eq!(
        release::ensure_bloom_branch(&release_repo).unwrap(),
        Validation::BloomBranchFound
    );
    assert_eq!(branch_tip(&repo, "bloom").id(), bloom_tip);
    assert_eq!(
        release_repo.current_branch().unwrap().as_deref(),
        Some("master")
    );
}

#[test]
fn test_initial_upstream_branch_is_empty() {
    let dir = TempDir::new().unwrap();
    let repo = common::release_repo(dir.path(), "https://example.com/foo.git");
    switch_to(&repo, "bloom");
    fs::write(dir.path().join("scratch.txt"), "untracked\n").unwrap();
    fs::create_dir(dir.path().join("build")).unwrap();
    fs::write(dir.path().join("build").join("out.o"), "obj\n").unwrap();

    let release_repo = Git2Repository::open(dir.path()).unwrap();
    assert!(release::ensure_upstream_branch(&release_repo).unwrap());

    let mut branches = release_repo.local_branches().unwrap();
    branches.sort();
    assert_eq!(branches, vec!["bloom", "master", "upstream"]);
    assert_eq!(
        release_repo.current_branch().unwrap().as_deref(),
        Some("upstream")
    );

    let tip = branch_tip(&repo, "upstream");
    assert_eq!(tip.message(), Some("Initial upstream branch"));
    assert_eq!(tip.parent_count(), 0);
    assert_eq!(tip.tree().unwrap().len(), 0);

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .filter(|name| name != ".git")
        .collect();
    assert!(leftovers.is_empty(), "left behind: {:?}", leftovers);

    // The other branches keep their history
    assert_eq!(branch_tip(&repo, "master").message(), Some("Initial"));
    assert_eq!(branch_tip(&repo, "bloom").message(), Some("Add bloom.conf"));

    assert!(!release::ensure_upstream_branch(&release_repo).unwrap());
}

#[test]
fn test_checkout_switches_working_tree() {
    let dir = TempDir::new().unwrap();
    common::release_repo(dir.path(), "https://example.com/foo.git");

    let release_repo = Git2Repository::open(dir.path()).unwrap();
    release_repo.checkout_branch("bloom").unwrap();
    assert!(dir.path().join("bloom.conf").is_file());
    assert!(!dir.path().join("README").exists());

    release_repo.checkout_branch("master").unwrap();
    assert!(dir.path().join("README").is_file());
    assert!(!dir.path().join("bloom.conf").exists());

    assert!(release_repo.checkout_branch("missing").is_err());
    assert_eq!(
        release_repo.current_branch().unwrap().as_deref(),
        Some("master")
    );
}

#[test]
fn test_latest_upstream_tag_is_newest_by_author_date() {
    let dir = TempDir::new().unwrap();
    let repo = init_repo(dir.path());

    let old = commit_on(&repo, "master", &[("a", "1\n")], "old", 1_000);
    let new = commit_on(&repo, "master", &[("a", "2\n")], "new", 2_000);
    let newest = commit_on(&repo, "master", &[("a", "3\n")], "newest", 3_000);
    switch_to(&repo, "master");

    let sig = repo.signature().unwrap();
    // Lexically largest, but on the oldest commit
    repo.tag_lightweight("upstream/0.9.0", &repo.find_object(old, None).unwrap(), false)
        .unwrap();
    repo.tag(
        "upstream/0.10.0",
        &repo.find_object(new, None).unwrap(),
        &sig,
        "annotated",
        false,
    )
    .unwrap();
    repo.tag_lightweight("debian/0.11.0", &repo.find_object(newest, None).unwrap(), false)
        .unwrap();

    let release_repo = Git2Repository::open(dir.path()).unwrap();
    assert_eq!(
        release_repo.latest_tag_matching("upstream/*").unwrap(),
        Some("upstream/0.10.0".to_string())
    );
    assert_eq!(release_repo.latest_tag_matching("release/*").unwrap(), None);
}

#[test]
fn test_remote_branch_is_tracked_locally() {
    let dir = TempDir::new().unwrap();
    let repo = init_repo(dir.path());
    let master = commit_on(&repo, "master", &[("README", "release\n")], "Initial", 1_000);
    let remote_bloom = commit_on(&repo, "remote-bloom", &[("bloom.conf", "[bloom]\n")], "conf", 1_001);
    switch_to(&repo, "master");

    repo.remote("origin", "https://example.com/release.git").unwrap();
    repo.reference("refs/remotes/origin/bloom", remote_bloom, false, "test")
        .unwrap();
    repo.reference("refs/remotes/origin/master", master, false, "test")
        .unwrap();

    let release_repo = Git2Repository::open(dir.path()).unwrap();
    assert_eq!(
        release::track_release_branches(&release_repo).unwrap(),
        vec!["bloom"]
    );
    assert_eq!(branch_tip(&repo, "bloom").id(), remote_bloom);

    let local = repo.find_branch("bloom", git2::BranchType::Local).unwrap();
    assert_eq!(
        local.upstream().unwrap().name().unwrap(),
        Some("origin/bloom")
    );

    // Already tracked
    assert!(release::track_release_branches(&release_repo)
        .unwrap()
        .is_empty());
}
