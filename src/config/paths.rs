// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! repository/                (YB_SRC_ROOT, default: cwd)
//!   build/                   (output, default)
//!     release-clang12-.../   (build_root, required)
//!   thirdparty/              (thirdparty, default)
//!   yb_release_manifest.json
//!   version.txt
//!   java/pom.xml
//! ```
//!
//! Relative paths are resolved against `repository`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Repository and build tree locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Source repository root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<PathBuf>,
    /// Build root matching the build type, e.g. `build/release-clang12-dynamic-ninja`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_root: Option<PathBuf>,
    /// Third-party dependency root (default: repository/thirdparty).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thirdparty: Option<PathBuf>,
    /// Directory receiving the archive (default: repository/build).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Staging directory to assemble into (default: a fresh temporary directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging: Option<PathBuf>,
}

impl PathsConfig {
    /// Resolve relative paths against the repository and fill in defaults.
    ///
    /// A missing repository falls back to `cwd`.
    pub fn resolve(&mut self, cwd: &Path) {
        let repository = match self.repository.take() {
            Some(repo) if repo.is_relative() => cwd.join(repo),
            Some(repo) => repo,
            None => cwd.to_path_buf(),
        };

        let resolve = |path: &mut Option<PathBuf>, default: Option<&str>| match path {
            Some(p) if p.is_relative() => {
                *path = Some(repository.join(p.clone()));
            }
            None => {
                *path = default.map(|d| repository.join(d));
            }
            _ => {}
        };

        resolve(&mut self.build_root, None);
        resolve(&mut self.thirdparty, Some("thirdparty"));
        resolve(&mut self.output, Some("build"));
        resolve(&mut self.staging, None);

        self.repository = Some(repository);
    }

    /// Get the repository root, returning an error if not resolved.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `repository` is not set.
    pub fn repository(&self) -> Result<&Path> {
        Self::required(self.repository.as_deref(), "repository")
    }

    /// Get the build root, returning an error if not set.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `build_root` is not set.
    pub fn build_root(&self) -> Result<&Path> {
        Self::required(self.build_root.as_deref(), "build_root")
    }

    /// Get the third-party root, returning an error if not resolved.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `thirdparty` is not set.
    pub fn thirdparty(&self) -> Result<&Path> {
        Self::required(self.thirdparty.as_deref(), "thirdparty")
    }

    /// Get the archive output directory, returning an error if not resolved.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if `output` is not set.
    pub fn output(&self) -> Result<&Path> {
        Self::required(self.output.as_deref(), "output")
    }

    fn required<'a>(path: Option<&'a Path>, key: &str) -> Result<&'a Path> {
        path.ok_or_else(|| {
            ConfigError::MissingKey {
                section: "paths".to_string(),
                key: key.to_string(),
            }
            .into()
        })
    }
}
