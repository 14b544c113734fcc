// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Gzip-compressed tarball creation.
//!
//! ```text
//! TarTool
//!   .archive(/repo/build/yugabyte-....tar.gz)
//!   .folder("yugabyte-2.21.0.0")
//!   .cwd(<tmp parent>)
//!     --> (cd <cwd> && tar cvzf <archive> <folder>)
//! Uses: config.tools.tar (gtar on macOS)
//! ```
//!
//! Running from the parent directory keeps a single top-level folder in the
//! archive.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::ProcessBuilder;
use crate::error::{PackagingError, Result};

#[derive(Debug, Clone, Default)]
pub struct TarTool {
    archive: Option<PathBuf>,
    folder: Option<String>,
    cwd: Option<PathBuf>,
}

impl TarTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            archive: None,
            folder: None,
            cwd: None,
        }
    }

    #[must_use]
    pub fn archive(mut self, path: impl AsRef<Path>) -> Self {
        self.archive = Some(path.as_ref().to_path_buf());
        self
    }

    /// Directory name, relative to `cwd`, that becomes the archive's root entry.
    #[must_use]
    pub fn folder(mut self, name: impl Into<String>) -> Self {
        self.folder = Some(name.into());
        self
    }

    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    fn archive_required(&self) -> Result<&Path> {
        self.archive
            .as_deref()
            .context("TarTool: archive path is required")
    }

    fn folder_required(&self) -> Result<&str> {
        self.folder
            .as_deref()
            .context("TarTool: folder is required")
    }

    fn cwd_required(&self) -> Result<&Path> {
        self.cwd
            .as_deref()
            .context("TarTool: working directory is required")
    }

    fn command(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        Ok(ProcessBuilder::new(&ctx.config().tools.tar)
            .arg("cvzf")
            .arg(self.archive_required()?)
            .arg(self.folder_required()?)
            .cwd(self.cwd_required()?)
            .capture_stderr())
    }

    async fn create(&self, ctx: &ToolContext) -> Result<()> {
        let command = self.command(ctx)?;
        let archive = self.archive_required()?;

        if ctx.is_dry_run() {
            info!(
                cmd = %command.command_line(),
                cwd = %self.cwd_required()?.display(),
                "[dry-run] Would create archive"
            );
            return Ok(());
        }

        debug!(archive = %archive.display(), "Creating archive");
        let output = command
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .map_err(|e| PackagingError::ArchiveFailed {
                archive: archive.display().to_string(),
                message: format!("{e:#}"),
            })?;

        if output.is_interrupted() {
            return Err(PackagingError::Interrupted.into());
        }

        info!(archive = %archive.display(), "Archive created");
        Ok(())
    }
}

impl Tool for TarTool {
    fn name(&self) -> &'static str {
        "tar"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.create(ctx))
    }
}
