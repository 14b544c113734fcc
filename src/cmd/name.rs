// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `name` command: prints the release file name.

use crate::build::BuildConfig;
use crate::config::Config;
use crate::error::Result;
use crate::release::{PlatformInfo, ReleaseIdentity};

/// Run the name command.
///
/// # Errors
///
/// Returns an error if the build facts, the commit or the compiler type
/// cannot be determined.
pub fn run_name_command(config: &Config) -> Result<()> {
    let build = BuildConfig::from_config(config)?;
    let identity = ReleaseIdentity::resolve(config, &build, &PlatformInfo::detect())?;
    println!("{}", identity.release_filename());
    Ok(())
}
