// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Facts about the build being packaged.
//!
//! ```text
//! Config ──> BuildConfig::from_config()
//!              repository, build_type, build_root, commit?
//!              base_version     <── version.txt   ("2.21.0.0-b0" -> "2.21.0.0")
//!              project_version  <── java/pom.xml  (first <version>)
//!                   |
//!                   v
//!          expansion_context(thirdparty) --> manifest::ExpansionContext
//! ```


use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::info;

use crate::config::Config;
use crate::error::{ConfigError, ReleaseResult};
use crate::git::query;
use crate::manifest::ExpansionContext;

/// Immutable description of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    repository: PathBuf,
    build_type: String,
    build_root: PathBuf,
    commit: Option<String>,
    base_version: String,
    project_version: String,
}

impl BuildConfig {
    /// Reads the version files referenced by `config`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `paths.build_root` is unset or a version file
    /// is missing or malformed.
    pub fn from_config(config: &Config) -> ReleaseResult<Self> {
        let repository = config
            .paths
            .repository()
            .map_err(|_| missing_path("repository"))?
            .to_path_buf();
        let build_root = config
            .paths
            .build_root()
            .map_err(|_| missing_path("build_root"))?
            .to_path_buf();

        let base_version = read_base_version(&repository.join(&config.release.version_file))?;
        let project_version =
            read_project_version(&repository.join(&config.release.java_descriptor))?;
        info!(version = %project_version, "Java project version from pom.xml");

        Ok(Self {
            repository,
            build_type: config.release.build_type.clone(),
            build_root,
            commit: config.release.commit.clone(),
            base_version,
            project_version,
        })
    }

    /// Assembles a `BuildConfig` from already known facts.
    #[must_use]
    pub fn new(
        repository: impl Into<PathBuf>,
        build_type: impl Into<String>,
        build_root: impl Into<PathBuf>,
        commit: Option<String>,
        base_version: impl Into<String>,
        project_version: impl Into<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            build_type: build_type.into(),
            build_root: build_root.into(),
            commit,
            base_version: base_version.into(),
            project_version: project_version.into(),
        }
    }

    #[must_use]
    pub fn repository(&self) -> &Path {
        &self.repository
    }

    #[must_use]
    pub fn build_type(&self) -> &str {
        &self.build_type
    }

    #[must_use]
    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    /// Explicitly configured commit, if any.
    #[must_use]
    pub fn commit(&self) -> Option<&str> {
        self.commit.as_deref()
    }

    #[must_use]
    pub fn base_version(&self) -> &str {
        &self.base_version
    }

    #[must_use]
    pub fn project_version(&self) -> &str {
        &self.project_version
    }

    /// The configured commit, or the repository's HEAD.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if HEAD cannot be resolved.
    pub fn resolve_commit(&self) -> ReleaseResult<String> {
        match &self.commit {
            Some(commit) => Ok(commit.clone()),
            None => query::head_commit(&self.repository),
        }
    }

    #[must_use]
    pub fn expansion_context(&self, thirdparty_dir: &Path) -> ExpansionContext {
        ExpansionContext::new(&self.project_version, thirdparty_dir, &self.build_root)
    }

    /// Compiler type encoded in the build root name.
    #[must_use]
    pub fn detected_compiler_type(&self) -> Option<String> {
        compiler_type_from_build_root(&self.build_root)
    }
}

fn missing_path(key: &str) -> ConfigError {
    ConfigError::MissingKey {
        section: "paths".to_string(),
        key: key.to_string(),
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.display().to_string(),
        source,
    })
}

/// Text before the first `-`, trimmed.
#[must_use]
pub fn parse_base_version(content: &str) -> Option<String> {
    let version = content.split('-').next().unwrap_or_default().trim();
    (!version.is_empty()).then(|| version.to_string())
}

/// Reads the base version from a `version.txt` file.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read or holds no version.
pub fn read_base_version(path: &Path) -> Result<String, ConfigError> {
    parse_base_version(&read_file(path)?).ok_or_else(|| ConfigError::ParseError {
        path: path.display().to_string(),
        message: "no version found".to_string(),
    })
}

fn version_patterns() -> Option<&'static (Regex, Regex)> {
    static PATTERNS: OnceLock<Option<(Regex, Regex)>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            let comment = Regex::new(r"(?s)<!--.*?-->").ok()?;
            let element =
                Regex::new(r"(?s)<version(?:\s[^>]*)?>\s*([^<]*?)\s*</version\s*>").ok()?;
            Some((comment, element))
        })
        .as_ref()
}

/// Text of the first `<version>` element, ignoring XML comments.
///
/// Attributes and whitespace inside the tags are accepted.
#[must_use]
pub fn parse_project_version(xml: &str) -> Option<String> {
    let (comment, element) = version_patterns()?;

    let uncommented = comment.replace_all(xml, "");
    element
        .captures(&uncommented)
        .map(|caps| caps[1].to_string())
        .filter(|v| !v.is_empty())
}

/// Reads the project version from a Maven `pom.xml`.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read or has no `<version>`.
pub fn read_project_version(path: &Path) -> Result<String, ConfigError> {
    parse_project_version(&read_file(path)?).ok_or_else(|| ConfigError::ParseError {
        path: path.display().to_string(),
        message: "no <version> element".to_string(),
    })
}

/// Second `-` separated component of the build root's directory name, e.g.
/// `release-clang12-dynamic-ninja` -> `clang12`.
#[must_use]
pub fn compiler_type_from_build_root(build_root: &Path) -> Option<String> {
    let name = build_root.file_name()?.to_str()?;
    name.split('-')
        .nth(1)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}
