// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)      --> GixBackend (pure Rust gix)
//! GitHistory (compare) --> ShellBackend (git CLI)
//! ```

use crate::error::{GitError, GixError, ReleaseResult};
use std::path::Path;

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Full hex hash of the commit HEAD points to.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or head resolution fails.
    fn head_commit(path: &Path) -> ReleaseResult<String>;
}

// --- History Trait (comparison against an upstream ref) ---

/// Comparisons between the work tree and an upstream reference.
pub trait GitHistory {
    /// Textual diff between `upstream` and the work tree; empty when identical.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the diff cannot be computed.
    fn diff_against(repo_path: &Path, upstream: &str) -> ReleaseResult<String>;

    /// One line per commit reachable from HEAD but not from `upstream`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the log cannot be produced.
    fn commits_ahead_of(repo_path: &Path, upstream: &str) -> ReleaseResult<String>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn head_commit(path: &Path) -> ReleaseResult<String> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let id = repo
            .head_id()
            .map_err(|e| GitError::Gix(GixError::HeadId(Box::new(e))))?;
        Ok(id.to_string())
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using git CLI.
pub struct ShellBackend;

impl ShellBackend {
    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> ReleaseResult<String> {
        use std::process::Command;

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GitHistory for ShellBackend {
    fn diff_against(repo_path: &Path, upstream: &str) -> ReleaseResult<String> {
        Self::git_command(&["diff", upstream], repo_path)
    }

    fn commits_ahead_of(repo_path: &Path, upstream: &str) -> ReleaseResult<String> {
        let range = format!("{upstream}..HEAD");
        Self::git_command(&["log", &range, "--oneline"], repo_path)
    }
}
