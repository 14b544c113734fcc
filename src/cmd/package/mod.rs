// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package command: the whole release flow.
//!
//! ```text
//! local changes check (unless --force) --> Continue [Y/n]
//!        |
//!        v
//! BuildConfig --> expanded manifest --> ReleaseIdentity
//!        |
//!        v
//! staging dir --> assemble --> reconcile (--save-manifest)
//!        |
//!        v
//! release::package --> archive path (--save-release-path-to-file)
//!        |
//!        v
//! remove staging (unless --keep-staging)
//! ```
//!
//! Everything that can fail on configuration is resolved before the staging
//! directory is created.


use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::manifest::load_expanded_manifest;
use crate::assemble::{assemble, reconcile};
use crate::build::BuildConfig;
use crate::cli::build::PackageArgs;
use crate::config::Config;
use crate::error::{AssemblyError, Result};
use crate::git::query::check_local_changes;
use crate::manifest::ReleaseManifest;
use crate::release::{PlatformInfo, ReleaseIdentity, package};
use crate::tools::ToolContext;
use crate::utility::fs::copy::ensure_dir;

const PROMPT: &str = "Continue [Y/n]: ";

/// Asks the user whether to go on.
pub trait Confirm {
    /// Shows `prompt` and returns whether the answer accepts it.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Reads the answer from standard input.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut answer = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut answer)
            .context("failed to read the answer")?;
        Ok(is_accepted(&answer))
    }
}

/// An empty answer, `y` or `yes` (any case) accepts.
#[must_use]
pub fn is_accepted(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "" | "y" | "yes")
}

/// How a package run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageOutcome {
    /// The archive was written to this absolute path.
    Created(PathBuf),
    /// The user declined to package a build with local changes.
    Declined,
}

enum Staging {
    Temporary { _dir: TempDir, path: PathBuf },
    Configured(PathBuf),
}

impl Staging {
    fn create(configured: Option<&Path>) -> Result<Self> {
        match configured {
            Some(path) => {
                if path.exists() {
                    let path = path.display().to_string();
                    return Err(AssemblyError::DestinationExists(path).into());
                }
                ensure_dir(path)?;
                Ok(Self::Configured(path.to_path_buf()))
            }
            None => {
                let dir = tempfile::Builder::new()
                    .prefix("yb_release_")
                    .tempdir()
                    .context("failed to create a staging directory")?;
                let path = dir.path().join("distribution");
                ensure_dir(&path)?;
                Ok(Self::Temporary { _dir: dir, path })
            }
        }
    }

    fn path(&self) -> &Path {
        match self {
            Self::Temporary { path, .. } | Self::Configured(path) => path,
        }
    }

    fn finish(self, keep: bool) {
        if keep {
            let path = match self {
                Self::Temporary { _dir: dir, path } => {
                    let _ = dir.keep();
                    path
                }
                Self::Configured(path) => path,
            };
            info!(path = %path.display(), "Keeping the staging directory");
            return;
        }
        if let Self::Configured(path) = &self
            && let Err(e) = std::fs::remove_dir_all(path)
        {
            warn!(path = %path.display(), error = %e, "Failed to remove the staging directory");
        }
    }
}

/// Facts resolved before anything is written.
struct Plan {
    build: BuildConfig,
    manifest: ReleaseManifest,
    identity: ReleaseIdentity,
    output_dir: PathBuf,
}

impl Plan {
    fn resolve(config: &Config) -> Result<Self> {
        let build = BuildConfig::from_config(config)?;
        let manifest = load_expanded_manifest(config, &build)?;
        let identity = ReleaseIdentity::resolve(config, &build, &PlatformInfo::detect())?;
        let output_dir = config.paths.output()?.to_path_buf();
        Ok(Self {
            build,
            manifest,
            identity,
            output_dir,
        })
    }
}

/// Runs the package command.
///
/// # Errors
///
/// Returns an error if any step of the flow fails. The staging directory is
/// restored before a packaging error is returned.
pub async fn run_package_command(
    args: &PackageArgs,
    config: &Config,
    token: CancellationToken,
    confirm: &mut dyn Confirm,
) -> Result<PackageOutcome> {
    let repository = config.paths.repository()?;

    if config.release.force {
        info!("Skipping the local changes check");
    } else {
        let changes = check_local_changes(repository, &config.release.upstream_ref)?;
        if !changes.is_clean() {
            error!("{changes}");
            if !confirm.confirm(PROMPT)? {
                return Ok(PackageOutcome::Declined);
            }
        }
    }

    let plan = Plan::resolve(config)?;
    info!(
        package = %config.release.package_name,
        name = %plan.identity.release_filename(),
        "Packaging release"
    );

    let staging = Staging::create(config.paths.staging.as_deref())?;
    let archive = assemble_and_package(args, config, &plan, staging.path(), token).await;
    staging.finish(args.keep_staging);
    let archive = archive?;

    info!(archive = %archive.display(), "Generated a package");
    if let Some(ref path) = args.save_release_path_to_file {
        std::fs::write(path, archive.display().to_string())
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        info!(path = %path.display(), "Saved the release path");
    }
    Ok(PackageOutcome::Created(archive))
}

async fn assemble_and_package(
    args: &PackageArgs,
    config: &Config,
    plan: &Plan,
    staging: &Path,
    token: CancellationToken,
) -> Result<PathBuf> {
    assemble(&plan.manifest, plan.build.repository(), staging)?;
    let reconciled = reconcile(&plan.manifest, staging)?;

    if let Some(ref path) = args.save_manifest {
        let json = reconciled
            .to_pretty_json()
            .context("failed to serialize the release manifest")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        info!(path = %path.display(), "Saved the release manifest");
    }

    let ctx = ToolContext::new(Arc::new(config.clone()), token, config.global.dry);
    Ok(package(&ctx, staging, &plan.identity, &plan.output_dir).await?)
}
