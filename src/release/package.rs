// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Archive creation from a staging tree.
//!
//! ```text
//! <staging>                              <staging>.tmp_for_tar_gz/
//!    |   StagedRelease::acquire()          '-- yugabyte-2.21.0.0/   (renamed)
//!    '---------------------------------->        chmod -R u+w, a+r, a+X
//!                                                tar cvzf <archive> yugabyte-2.21.0.0
//!    <----------------------------------
//!        restore() / Drop                rename back, rmdir tmp
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use super::identity::ReleaseIdentity;
use crate::error::{FsError, PackagingError, ReleaseError, ReleaseResult};
use crate::tools::chmod::ChmodTool;
use crate::tools::tar::TarTool;
use crate::tools::{Tool, ToolContext};

const TMP_SUFFIX: &str = ".tmp_for_tar_gz";

/// Applied in order before archiving.
pub const PERMISSION_MODES: [&str; 3] = ["u+w", "a+r", "a+X"];

/// A staging directory moved under a temporary parent for archiving.
///
/// The move is undone by [`restore`](Self::restore), or on drop if the
/// guard is abandoned.
#[derive(Debug)]
pub struct StagedRelease {
    staging: PathBuf,
    parent: PathBuf,
    folder_name: String,
    restored: bool,
}

impl StagedRelease {
    /// Moves `staging` to `<staging>.tmp_for_tar_gz/<folder_name>`.
    ///
    /// # Errors
    ///
    /// Returns `PackagingError::TempDir` if the temporary parent exists or
    /// cannot be created, and `PackagingError::Move` if the rename fails.
    pub fn acquire(staging: &Path, folder_name: &str) -> ReleaseResult<Self> {
        // no trailing separator, so the suffix names a sibling
        let staging: PathBuf = staging.components().collect();
        let mut parent = OsString::from(staging.as_os_str());
        parent.push(TMP_SUFFIX);
        let parent = PathBuf::from(parent);

        std::fs::create_dir(&parent).map_err(|source| PackagingError::TempDir {
            path: parent.display().to_string(),
            source,
        })?;

        let staged = parent.join(folder_name);
        if let Err(source) = std::fs::rename(&staging, &staged) {
            if let Err(e) = std::fs::remove_dir(&parent) {
                error!(path = %parent.display(), error = %e, "Failed to remove temporary directory");
            }
            return Err(PackagingError::Move {
                from: staging.display().to_string(),
                to: staged.display().to_string(),
                source,
            }
            .into());
        }
        debug!(from = %staging.display(), to = %staged.display(), "Staged release");

        Ok(Self {
            staging,
            parent,
            folder_name: folder_name.to_string(),
            restored: false,
        })
    }

    /// Temporary parent directory; the archiver runs here.
    #[must_use]
    pub fn parent(&self) -> &Path {
        &self.parent
    }

    #[must_use]
    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }

    #[must_use]
    pub fn staged_dir(&self) -> PathBuf {
        self.parent.join(&self.folder_name)
    }

    /// Moves the tree back to its staging path and removes the parent.
    ///
    /// # Errors
    ///
    /// Returns `PackagingError::Restore` if either step fails.
    pub fn restore(mut self) -> ReleaseResult<()> {
        self.restored = true;
        self.undo().map_err(ReleaseError::from)
    }

    fn undo(&self) -> Result<(), PackagingError> {
        std::fs::rename(self.staged_dir(), &self.staging).map_err(|source| {
            PackagingError::Restore {
                path: self.staging.display().to_string(),
                source,
            }
        })?;
        std::fs::remove_dir(&self.parent).map_err(|source| PackagingError::Restore {
            path: self.parent.display().to_string(),
            source,
        })?;
        debug!(path = %self.staging.display(), "Restored staging directory");
        Ok(())
    }
}

impl Drop for StagedRelease {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        if let Err(e) = self.undo() {
            error!(path = %self.staging.display(), error = %e, "Failed to restore staging directory");
        }
    }
}

/// Packages `staging` into `<output_dir>/<release filename>`.
///
/// The staging directory is back in place when this returns, whether
/// packaging succeeded or not.
///
/// # Errors
///
/// Returns a `PackagingError` if staging, permission normalization or the
/// archiver fails, and an `FsError` if `output_dir` cannot be created.
pub async fn package(
    ctx: &ToolContext,
    staging: &Path,
    identity: &ReleaseIdentity,
    output_dir: &Path,
) -> ReleaseResult<PathBuf> {
    let output_dir = std::path::absolute(output_dir)?;
    if !ctx.is_dry_run() {
        std::fs::create_dir_all(&output_dir).map_err(|e| FsError::from_io(&output_dir, e))?;
    }
    let archive = output_dir.join(identity.release_filename());

    let staged = StagedRelease::acquire(staging, &identity.folder_name())?;
    let outcome = archive_staged(ctx, &staged, &archive).await;
    let restored = staged.restore();

    match (outcome, restored) {
        (Err(e), Err(restore)) => {
            error!(error = %restore, "Failed to restore staging directory");
            Err(e)
        }
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Ok(()), Ok(())) => Ok(archive),
    }
}

async fn archive_staged(
    ctx: &ToolContext,
    staged: &StagedRelease,
    archive: &Path,
) -> ReleaseResult<()> {
    let staged_dir = staged.staged_dir();
    for mode in PERMISSION_MODES {
        info!(path = %staged_dir.display(), mode, "Changing permissions recursively");
        ChmodTool::new(mode, &staged_dir)
            .run(ctx)
            .await
            .map_err(tool_failure)?;
    }

    info!(archive = %archive.display(), path = %staged_dir.display(), "Creating a package");
    TarTool::new()
        .archive(archive)
        .folder(staged.folder_name())
        .cwd(staged.parent())
        .run(ctx)
        .await
        .map_err(tool_failure)
}

fn tool_failure(err: anyhow::Error) -> ReleaseError {
    match err.downcast::<PackagingError>() {
        Ok(packaging) => packaging.into(),
        Err(other) => ReleaseError::Other(format!("{other:#}").into_boxed_str()),
    }
}
