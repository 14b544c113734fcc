// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git queries used before packaging.
//!
//! ```text
//! head_commit()         --> GixBackend  --> .git/ (no subprocess)
//! check_local_changes() --> ShellBackend --> git diff / git log
//! ```

use crate::error::ReleaseResult;
use std::fmt;
use std::path::Path;

use super::backend::{GitHistory, GitQuery, GixBackend, ShellBackend};

/// Full hash of the commit HEAD points to.
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or head resolution fails.
pub fn head_commit(path: &Path) -> ReleaseResult<String> {
    GixBackend::head_commit(path)
}

/// How the work tree differs from the upstream reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalChanges {
    /// Identical to upstream.
    Clean,
    /// The work tree differs from upstream.
    Uncommitted,
    /// HEAD has commits upstream does not.
    UnpushedCommits,
}

impl LocalChanges {
    #[must_use]
    pub const fn is_clean(self) -> bool {
        matches!(self, Self::Clean)
    }
}

impl fmt::Display for LocalChanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clean => f.write_str("no local changes"),
            Self::Uncommitted => f.write_str(
                "Local changes exists. This shouldn't be an official release.",
            ),
            Self::UnpushedCommits => f.write_str(
                "Local commits exists. This shouldn't be an official release.",
            ),
        }
    }
}

/// Compare the work tree against `upstream`.
///
/// A non-empty diff wins over unpushed commits.
///
/// # Errors
///
/// Returns a `GitError` if git fails, e.g. when `upstream` does not resolve.
pub fn check_local_changes(repo_path: &Path, upstream: &str) -> ReleaseResult<LocalChanges> {
    if !ShellBackend::diff_against(repo_path, upstream)?.is_empty() {
        return Ok(LocalChanges::Uncommitted);
    }
    if !ShellBackend::commits_ahead_of(repo_path, upstream)?.is_empty() {
        return Ok(LocalChanges::UnpushedCommits);
    }
    Ok(LocalChanges::Clean)
}
