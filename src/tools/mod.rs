// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! External tools driven during packaging.
//!
//! ```text
//! package --> ToolContext --> ProcessBuilder --> Tools
//!   ChmodTool (chmod -R), TarTool (tar cvzf)
//! ToolContext: cancel token --> run_with_cancellation
//! ```
//!
//! All tools support cancellation via `CancellationToken` and honor dry-run.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::Result;

pub mod chmod;
pub mod tar;

/// Context provided to tools during execution.
#[derive(Clone)]
pub struct ToolContext {
    /// Tools should abort once this is cancelled.
    cancel_token: CancellationToken,

    /// When true, tools log what they would do without running anything.
    dry_run: bool,

    config: Arc<Config>,
}

impl ToolContext {
    #[must_use]
    pub const fn new(config: Arc<Config>, cancel_token: CancellationToken, dry_run: bool) -> Self {
        Self {
            cancel_token,
            dry_run,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// Trait for tools that execute external processes.
///
/// Implementations run through `ProcessBuilder::run_with_cancellation()` and
/// only log their command line when `ctx.is_dry_run()`.
pub trait Tool: Send + Sync {
    /// Returns the name of this tool (e.g., "tar", "chmod").
    fn name(&self) -> &str;

    /// Executes the tool's operation.
    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>>;
}

#[cfg(test)]
pub(crate) mod test_utils;
