// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release naming.
//!
//! ```text
//! yugabyte-2.21.0.0-1f2e3d4-release-gcc11-almalinux9-aarch64.tar.gz
//! '------''-------''------''------''----''---------''------'
//! product   base    commit  build  compiler   os      arch
//!                                  (omitted for clang12)
//! ```

use bon::Builder;

use super::platform::{PlatformInfo, normalize_os};
use crate::build::BuildConfig;
use crate::config::Config;
use crate::error::{ConfigError, ReleaseResult};

/// Compiler type whose packages carry no compiler component.
pub const DEFAULT_COMPILER_TYPE: &str = "clang12";

/// Every fact that goes into a release file name.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
pub struct ReleaseIdentity {
    product: String,
    base_version: String,
    commit: String,
    build_type: String,
    compiler_type: String,
    os: String,
    machine: String,
}

impl ReleaseIdentity {
    /// Collects the identity of `build` on `platform`.
    ///
    /// The commit falls back to HEAD and the compiler type to the one encoded
    /// in the build root name.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if no compiler type can be determined, or a
    /// `GitError` if HEAD cannot be resolved.
    pub fn resolve(
        config: &Config,
        build: &BuildConfig,
        platform: &PlatformInfo,
    ) -> ReleaseResult<Self> {
        let compiler_type = config
            .release
            .compiler_type
            .clone()
            .or_else(|| build.detected_compiler_type())
            .ok_or_else(|| ConfigError::InvalidValue {
                section: "paths".to_string(),
                key: "build_root".to_string(),
                message: format!(
                    "cannot derive a compiler type from '{}'; set release.compiler_type",
                    build.build_root().display()
                ),
            })?;

        Ok(Self {
            product: config.release.product.clone(),
            base_version: build.base_version().to_string(),
            commit: build.resolve_commit()?,
            build_type: build.build_type().to_string(),
            compiler_type,
            os: normalize_os(platform),
            machine: platform.machine().to_lowercase(),
        })
    }

    #[must_use]
    pub fn base_version(&self) -> &str {
        &self.base_version
    }

    #[must_use]
    pub fn commit(&self) -> &str {
        &self.commit
    }

    #[must_use]
    pub fn compiler_type(&self) -> &str {
        &self.compiler_type
    }

    #[must_use]
    pub fn os(&self) -> &str {
        &self.os
    }

    /// `<base>-<commit>-<build type>[-<compiler>]`.
    #[must_use]
    pub fn release_name(&self) -> String {
        let mut components = vec![
            self.base_version.as_str(),
            self.commit.as_str(),
            self.build_type.as_str(),
        ];
        if self.compiler_type != DEFAULT_COMPILER_TYPE {
            components.push(&self.compiler_type);
        }
        components.join("-")
    }

    #[must_use]
    pub fn release_filename(&self) -> String {
        format!(
            "{}-{}-{}-{}.tar.gz",
            self.product,
            self.release_name(),
            self.os,
            self.machine
        )
    }

    /// Top-level directory inside the archive.
    #[must_use]
    pub fn folder_name(&self) -> String {
        format!("{}-{}", self.product, self.base_version)
    }
}
