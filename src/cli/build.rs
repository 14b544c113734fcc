// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the `package`, `manifest` and `name` commands.
//!
//! ```text
//! BuildArgs (shared):   --package-name --build-type --build-root
//!                       --commit --compiler-type --thirdparty-dir
//! PackageArgs:          BuildArgs + --output-dir --staging-dir --force
//!                       --keep-staging --save-release-path-to-file
//!                       --save-manifest
//! ManifestArgs:         BuildArgs + --seed-executables
//! ```

use clap::Args;
use std::path::PathBuf;

/// Selects the build being packaged.
#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
    /// Manifest profile to package (e.g. all, cli).
    #[arg(long = "package-name", value_name = "NAME")]
    pub package_name: Option<String>,

    /// Build type (release, debug, ...).
    #[arg(long = "build-type", value_name = "TYPE")]
    pub build_type: Option<String>,

    /// Build root, e.g. build/release-clang12-dynamic-ninja.
    #[arg(long = "build-root", value_name = "DIR", env = "BUILD_ROOT")]
    pub build_root: Option<PathBuf>,

    /// Commit hash to embed in the name (default: HEAD).
    #[arg(long = "commit", value_name = "SHA")]
    pub commit: Option<String>,

    /// Compiler type (default: derived from the build root name).
    #[arg(long = "compiler-type", value_name = "TYPE")]
    pub compiler_type: Option<String>,

    /// Third-party dependency root (default: <repository>/thirdparty).
    #[arg(long = "thirdparty-dir", value_name = "DIR", env = "YB_THIRDPARTY_DIR")]
    pub thirdparty_dir: Option<PathBuf>,
}

impl BuildArgs {
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = Vec::new();
        if let Some(ref name) = self.package_name {
            overrides.push(format!("release/package_name={name}"));
        }
        if let Some(ref build_type) = self.build_type {
            overrides.push(format!("release/build_type={build_type}"));
        }
        if let Some(ref commit) = self.commit {
            overrides.push(format!("release/commit={commit}"));
        }
        if let Some(ref compiler) = self.compiler_type {
            overrides.push(format!("release/compiler_type={compiler}"));
        }
        if let Some(ref root) = self.build_root {
            overrides.push(format!("paths/build_root={}", root.display()));
        }
        if let Some(ref dir) = self.thirdparty_dir {
            overrides.push(format!("paths/thirdparty={}", dir.display()));
        }
        overrides
    }
}

/// Arguments for the `package` command.
#[derive(Debug, Clone, Default, Args)]
pub struct PackageArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Directory receiving the archive (default: <repository>/build).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Staging directory to assemble into (default: a fresh temporary directory).
    #[arg(long = "staging-dir", value_name = "DIR")]
    pub staging_dir: Option<PathBuf>,

    /// Skips the local changes check.
    #[arg(long)]
    pub force: bool,

    /// Keeps the staging directory after packaging.
    #[arg(long = "keep-staging")]
    pub keep_staging: bool,

    /// Writes the archive path to this file.
    #[arg(long = "save-release-path-to-file", value_name = "FILE")]
    pub save_release_path_to_file: Option<PathBuf>,

    /// Writes the reconciled manifest as JSON to this file.
    #[arg(long = "save-manifest", value_name = "FILE")]
    pub save_manifest: Option<PathBuf>,
}

impl PackageArgs {
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.build.to_config_overrides();
        if let Some(ref dir) = self.output_dir {
            overrides.push(format!("paths/output={}", dir.display()));
        }
        if let Some(ref dir) = self.staging_dir {
            overrides.push(format!("paths/staging={}", dir.display()));
        }
        if self.force {
            overrides.push("release/force=true".to_string());
        }
        overrides
    }
}

/// Arguments for the `manifest` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ManifestArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Prints only the seed executable (`bin`) patterns.
    #[arg(long = "seed-executables")]
    pub seed_executables: bool,
}
