// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

use super::backend::ShellBackend;
use super::query::{LocalChanges, check_local_changes, head_commit};

pub(crate) fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn git(path: &Path, args: &[&str]) -> std::io::Result<()> {
    let output = Command::new("git").args(args).current_dir(path).output()?;
    if !output.status.success() {
        return Err(std::io::Error::other(
            String::from_utf8_lossy(&output.stderr).to_string(),
        ));
    }
    Ok(())
}

/// Stage everything and commit, allowing empty commits.
pub(crate) fn commit_all(path: &Path, message: &str) -> std::io::Result<()> {
    git(path, &["add", "-A"])?;
    git(
        path,
        &["commit", "--allow-empty", "--quiet", "-m", message],
    )
}

/// Initialize a repository with `version.txt` committed.
pub(crate) fn init_test_repo_with_commit(path: &Path) -> std::io::Result<()> {
    git(path, &["init", "--quiet"])?;
    git(path, &["config", "user.email", "test@example.com"])?;
    git(path, &["config", "user.name", "Test"])?;
    git(path, &["config", "commit.gpgsign", "false"])?;
    std::fs::write(path.join("version.txt"), "2.21.0.0-b0\n")?;
    commit_all(path, "Initial commit")
}

#[test]
fn test_head_commit_tracks_new_commits() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path()).unwrap();
    let first = head_commit(temp.path()).unwrap();

    commit_all(temp.path(), "next").unwrap();
    let second = head_commit(temp.path()).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_check_local_changes_clean() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path()).unwrap();
    ShellBackend::git_command(&["branch", "upstream"], temp.path()).unwrap();

    let changes = check_local_changes(temp.path(), "upstream").unwrap();
    assert!(changes.is_clean());
}

#[test]
fn test_check_local_changes_uncommitted() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path()).unwrap();
    ShellBackend::git_command(&["branch", "upstream"], temp.path()).unwrap();
    std::fs::write(temp.path().join("version.txt"), "9.9.9.9-b0\n").unwrap();

    let changes = check_local_changes(temp.path(), "upstream").unwrap();
    assert_eq!(changes, LocalChanges::Uncommitted);
    insta::assert_snapshot!(
        changes.to_string(),
        @"Local changes exists. This shouldn't be an official release."
    );
}

#[test]
fn test_check_local_changes_diff_wins_over_commits() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path()).unwrap();
    ShellBackend::git_command(&["branch", "upstream"], temp.path()).unwrap();
    std::fs::write(temp.path().join("version.txt"), "9.9.9.9-b0\n").unwrap();
    commit_all(temp.path(), "bump").unwrap();

    let changes = check_local_changes(temp.path(), "upstream").unwrap();
    assert_eq!(changes, LocalChanges::Uncommitted);
}

#[test]
fn test_check_local_changes_unpushed_commits() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path()).unwrap();
    ShellBackend::git_command(&["branch", "upstream"], temp.path()).unwrap();
    commit_all(temp.path(), "empty").unwrap();

    let changes = check_local_changes(temp.path(), "upstream").unwrap();
    assert_eq!(changes, LocalChanges::UnpushedCommits);
    insta::assert_snapshot!(
        changes.to_string(),
        @"Local commits exists. This shouldn't be an official release."
    );
}
