// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Placeholder substitution.
//!
//! ```text
//! "${project.version}"               -> project version (java/pom.xml)
//! "thirdparty/<rest>"   (prefix)     -> <thirdparty>/<rest>
//! "$BUILD_ROOT"                      -> build root
//! "$THIRDPARTY_BUILD_SPECIFIC_DIR"   -> <thirdparty>/installed/uninstrumented
//! ```
//!
//! Rules apply in this order, each to the output of the previous one.

use std::path::{Path, PathBuf};

use tracing::info;

use super::{ReleaseManifest, Section};

pub const PROJECT_VERSION_TOKEN: &str = "${project.version}";
pub const THIRDPARTY_PREFIX: &str = "thirdparty/";
pub const BUILD_ROOT_TOKEN: &str = "$BUILD_ROOT";
pub const THIRDPARTY_BUILD_SPECIFIC_TOKEN: &str = "$THIRDPARTY_BUILD_SPECIFIC_DIR";

const THIRDPARTY_INSTRUMENTATION: &str = "uninstrumented";

/// Values substituted into manifest entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionContext {
    project_version: String,
    thirdparty_dir: PathBuf,
    build_root: PathBuf,
}

impl ExpansionContext {
    #[must_use]
    pub fn new(
        project_version: impl Into<String>,
        thirdparty_dir: impl AsRef<Path>,
        build_root: impl AsRef<Path>,
    ) -> Self {
        Self {
            project_version: project_version.into(),
            thirdparty_dir: thirdparty_dir.as_ref().to_path_buf(),
            build_root: build_root.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn project_version(&self) -> &str {
        &self.project_version
    }

    #[must_use]
    pub fn thirdparty_dir(&self) -> &Path {
        &self.thirdparty_dir
    }

    #[must_use]
    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    /// `<thirdparty>/installed/uninstrumented`
    #[must_use]
    pub fn thirdparty_build_specific_dir(&self) -> PathBuf {
        self.thirdparty_dir
            .join("installed")
            .join(THIRDPARTY_INSTRUMENTATION)
    }

    /// Applies every substitution rule to one manifest value.
    #[must_use]
    pub fn expand_value(&self, old_value: &str) -> String {
        let mut new_value = old_value.replace(PROJECT_VERSION_TOKEN, &self.project_version);

        if let Some(rest) = new_value.strip_prefix(THIRDPARTY_PREFIX) {
            new_value = self.thirdparty_dir.join(rest).display().to_string();
        }

        new_value = new_value.replace(BUILD_ROOT_TOKEN, &self.build_root.display().to_string());
        new_value = new_value.replace(
            THIRDPARTY_BUILD_SPECIFIC_TOKEN,
            &self.thirdparty_build_specific_dir().display().to_string(),
        );

        if new_value != old_value {
            info!(from = %old_value, to = %new_value, "Substituting in manifest");
        }
        new_value
    }
}

/// Returns a copy of `manifest` with every pattern and symlink target expanded.
///
/// Section names and symlink paths are kept as-is.
#[must_use]
pub fn expand(manifest: &ReleaseManifest, context: &ExpansionContext) -> ReleaseManifest {
    let sections = manifest
        .sections()
        .map(|(name, section)| {
            let expanded = match section {
                Section::Patterns(patterns) => Section::Patterns(
                    patterns.iter().map(|p| context.expand_value(p)).collect(),
                ),
                Section::Symlinks(links) => Section::Symlinks(
                    links
                        .iter()
                        .map(|(link, target)| (link.clone(), context.expand_value(target)))
                        .collect(),
                ),
            };
            (name.clone(), expanded)
        })
        .collect();
    ReleaseManifest::from_sections(sections)
}
