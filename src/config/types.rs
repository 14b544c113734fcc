// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for yb-release.
//!
//! ```text
//! Config: GlobalConfig, ReleaseConfig, PathsConfig, ToolsConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log what the external tools would do instead of running them.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Release selection and naming options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Top-level section of the release manifest to package (`all`, `cli`, ...).
    pub package_name: String,
    /// Build type such as `release` or `debug`.
    pub build_type: String,
    /// Product prefix of the archive and of its top-level folder.
    pub product: String,
    /// Upstream reference used for the local changes check.
    pub upstream_ref: String,
    /// Commit hash to embed; detected from HEAD when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Compiler type; derived from the build root name when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_type: Option<String>,
    /// Release manifest, relative to the repository.
    pub manifest_file: PathBuf,
    /// Version file, relative to the repository.
    pub version_file: PathBuf,
    /// Java build descriptor holding the project version, relative to the repository.
    pub java_descriptor: PathBuf,
    /// Skip the local changes prompt.
    pub force: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            package_name: "all".to_string(),
            build_type: "release".to_string(),
            product: "yugabyte".to_string(),
            upstream_ref: "origin/master".to_string(),
            commit: None,
            compiler_type: None,
            manifest_file: PathBuf::from("yb_release_manifest.json"),
            version_file: PathBuf::from("version.txt"),
            java_descriptor: PathBuf::from("java").join("pom.xml"),
            force: false,
        }
    }
}

/// External tool paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// GNU tar (`gtar` on macOS).
    pub tar: PathBuf,
    /// chmod.
    pub chmod: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        let tar = if cfg!(target_os = "macos") {
            "gtar"
        } else {
            "tar"
        };
        Self {
            tar: PathBuf::from(tar),
            chmod: PathBuf::from("chmod"),
        }
    }
}
