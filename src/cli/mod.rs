// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for yb-release using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! yb-release [global options] <command>
//! version
//! options
//! inis
//! package   [--package-name N] [--build-root DIR] [--force] ...
//! manifest  [--seed-executables]
//! name
//! ```

pub mod build;
pub mod global;


use crate::cli::build::{BuildArgs, ManifestArgs, PackageArgs};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// YugabyteDB release packager
///
/// Assembles a distribution from the release manifest and archives it.
#[derive(Debug, Parser)]
#[command(
    name = "yb-release",
    author,
    version,
    about = "YugabyteDB release packager",
    long_about = "yb-release Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Builds a versioned, platform-named tarball of a YugabyteDB build.\n\n\
                  Invoking `yb-release package --build-root build/release-clang12-dynamic-ninja`\n\
                  from the repository root assembles the `all` package and writes\n\
                  it to build/. See `yb-release <command> --help` for more\n\
                  information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  yb-release loads `yb-release.toml` from the current directory if\n\
                  present, then every --ini in order, then YB_RELEASE_<SECTION>__<KEY>\n\
                  environment variables, then command line options. Use\n\
                  --no-default-inis to skip `yb-release.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files used.
    Inis,

    /// Assembles the distribution and creates the release archive.
    Package(PackageArgs),

    /// Prints the expanded release manifest.
    Manifest(ManifestArgs),

    /// Prints the release file name for this build and host.
    Name(BuildArgs),
}

impl Command {
    /// Configuration overrides carried by the command's own options.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        match self {
            Self::Package(args) => args.to_config_overrides(),
            Self::Manifest(args) => args.build.to_config_overrides(),
            Self::Name(args) => args.to_config_overrides(),
            Self::Version | Self::Options | Self::Inis => Vec::new(),
        }
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
