// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `manifest` command: prints the expanded release manifest.

use anyhow::Context;
use tracing::debug;

use crate::build::BuildConfig;
use crate::cli::build::ManifestArgs;
use crate::config::Config;
use crate::error::Result;
use crate::manifest::{ReleaseManifest, expand};

/// Loads the configured package profile and expands its placeholders.
///
/// # Errors
///
/// Returns a `ConfigError` if the manifest or profile is missing or malformed.
pub fn load_expanded_manifest(config: &Config, build: &BuildConfig) -> Result<ReleaseManifest> {
    let path = config.repository_file(&config.release.manifest_file)?;
    let profile = &config.release.package_name;
    debug!(path = %path.display(), profile = %profile, "Loading release manifest");

    let manifest = ReleaseManifest::load(&path, profile)?;
    let context = build.expansion_context(config.paths.thirdparty()?);
    Ok(expand(&manifest, &context))
}

/// Run the manifest command.
///
/// # Errors
///
/// Returns an error if the build facts or the manifest cannot be loaded.
pub fn run_manifest_command(args: &ManifestArgs, config: &Config) -> Result<()> {
    let build = BuildConfig::from_config(config)?;
    let manifest = load_expanded_manifest(config, &build)?;

    if args.seed_executables {
        for pattern in manifest.seed_executable_patterns()? {
            println!("{pattern}");
        }
    } else {
        let json = manifest
            .to_pretty_json()
            .context("failed to serialize the release manifest")?;
        println!("{json}");
    }
    Ok(())
}
