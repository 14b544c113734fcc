// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for yb-release.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. yb-release.toml (cwd, optional)
//! 3. --ini FILE (repeatable)
//! 4. YB_RELEASE_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! YB_RELEASE_GLOBAL__DRY=true            → global.dry = true
//! YB_RELEASE_PATHS__BUILD_ROOT=/b/rel    → paths.build_root = "/b/rel"
//! YB_RELEASE_RELEASE__PACKAGE_NAME=cli   → release.package_name = "cli"
//! ```

pub mod loader;
pub mod paths;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{GlobalConfig, ReleaseConfig, ToolsConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Release selection and naming.
    pub release: ReleaseConfig,
    /// Tool paths.
    pub tools: ToolsConfig,
    /// Paths configuration.
    pub paths: PathsConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use yb_release::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("yb-release.toml")
    ///     .with_env_prefix("YB_RELEASE")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string, resolving paths against `cwd`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str, cwd: &Path) -> Result<Self> {
        Self::builder().add_toml_str(content).with_cwd(cwd).build()
    }

    /// Resolve all paths and validate configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for empty release fields.
    pub fn resolve_and_validate(&mut self, cwd: &Path) -> Result<()> {
        self.paths.resolve(cwd);

        for (key, value) in [
            ("package_name", &self.release.package_name),
            ("build_type", &self.release.build_type),
            ("product", &self.release.product),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    section: "release".to_string(),
                    key: key.to_string(),
                    message: "must not be empty".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Absolute path of a file that lives inside the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository path is not resolved.
    pub fn repository_file(&self, relative: &Path) -> Result<PathBuf> {
        Ok(self.paths.repository()?.join(relative))
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_release_options(&mut options);
        self.format_tools_options(&mut options);
        self.format_paths_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".into(), fmt_path(&self.global.log_file));
    }

    fn format_release_options(&self, options: &mut BTreeMap<String, String>) {
        let release = &self.release;
        options.insert("release.package_name".into(), release.package_name.clone());
        options.insert("release.build_type".into(), release.build_type.clone());
        options.insert("release.product".into(), release.product.clone());
        options.insert("release.upstream_ref".into(), release.upstream_ref.clone());
        options.insert(
            "release.commit".into(),
            release.commit.clone().unwrap_or_default(),
        );
        options.insert(
            "release.compiler_type".into(),
            release.compiler_type.clone().unwrap_or_default(),
        );
        options.insert(
            "release.manifest_file".into(),
            release.manifest_file.display().to_string(),
        );
        options.insert(
            "release.version_file".into(),
            release.version_file.display().to_string(),
        );
        options.insert(
            "release.java_descriptor".into(),
            release.java_descriptor.display().to_string(),
        );
        options.insert("release.force".into(), release.force.to_string());
    }

    fn format_tools_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("tools.tar".into(), self.tools.tar.display().to_string());
        options.insert("tools.chmod".into(), self.tools.chmod.display().to_string());
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("paths.repository".into(), fmt_path(&self.paths.repository));
        options.insert("paths.build_root".into(), fmt_path(&self.paths.build_root));
        options.insert("paths.thirdparty".into(), fmt_path(&self.paths.thirdparty));
        options.insert("paths.output".into(), fmt_path(&self.paths.output));
        options.insert("paths.staging".into(), fmt_path(&self.paths.staging));
    }
}

fn fmt_path(p: &Option<PathBuf>) -> String {
    p.as_ref()
        .map_or_else(String::new, |p| p.display().to_string())
}
