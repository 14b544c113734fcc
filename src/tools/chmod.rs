// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Recursive permission changes.
//!
//! ```text
//! ChmodTool::new("a+X", dir) --> chmod -R a+X <dir>
//! Uses: config.tools.chmod
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::ProcessBuilder;
use crate::error::{PackagingError, Result};

/// Applies a symbolic mode to a directory tree.
#[derive(Debug, Clone)]
pub struct ChmodTool {
    mode: String,
    path: PathBuf,
}

impl ChmodTool {
    #[must_use]
    pub fn new(mode: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            mode: mode.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> &str {
        &self.mode
    }

    fn command(&self, ctx: &ToolContext) -> ProcessBuilder {
        ProcessBuilder::new(&ctx.config().tools.chmod)
            .arg("-R")
            .arg(&self.mode)
            .arg(&self.path)
            .capture_stderr()
    }

    fn failure(&self, message: impl Into<String>) -> PackagingError {
        PackagingError::Permissions {
            mode: self.mode.clone(),
            path: self.path.display().to_string(),
            message: message.into(),
        }
    }

    async fn apply(&self, ctx: &ToolContext) -> Result<()> {
        let command = self.command(ctx);
        if ctx.is_dry_run() {
            info!(cmd = %command.command_line(), "[dry-run] Would change permissions");
            return Ok(());
        }

        debug!(mode = %self.mode, path = %self.path.display(), "Changing permissions");
        let output = command
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .map_err(|e| self.failure(format!("{e:#}")))?;

        if output.is_interrupted() {
            return Err(PackagingError::Interrupted.into());
        }
        Ok(())
    }
}

impl Tool for ChmodTool {
    fn name(&self) -> &'static str {
        "chmod"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.apply(ctx))
    }
}
