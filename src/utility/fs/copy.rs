// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::Path;

use crate::error::{AssemblyError, ReleaseResult};

fn copy_error(from: &Path, to: &Path, source: std::io::Error) -> AssemblyError {
    AssemblyError::Copy {
        from: from.display().to_string(),
        to: to.display().to_string(),
        source,
    }
}

/// Copies `src` to `dst`, recursing into directories.
///
/// Symlinks are recreated with their original target rather than followed.
/// Regular files keep their permission bits.
///
/// # Errors
///
/// Returns `AssemblyError::DestinationExists` if `dst` is already present,
/// or `AssemblyError::Copy` / `AssemblyError::Symlink` on I/O failure.
pub fn copy_deep(src: &Path, dst: &Path) -> ReleaseResult<()> {
    if fs::symlink_metadata(dst).is_ok() {
        return Err(AssemblyError::DestinationExists(dst.display().to_string()).into());
    }

    let meta = fs::symlink_metadata(src).map_err(|e| copy_error(src, dst, e))?;
    let file_type = meta.file_type();

    if file_type.is_symlink() {
        let target = fs::read_link(src).map_err(|e| copy_error(src, dst, e))?;
        return create_symlink(&target, dst);
    }

    if file_type.is_dir() {
        fs::create_dir(dst).map_err(|source| AssemblyError::CreateDir {
            path: dst.display().to_string(),
            source,
        })?;

        let mut children = fs::read_dir(src)
            .map_err(|e| copy_error(src, dst, e))?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| copy_error(src, dst, e))?;
        children.sort();

        for name in children {
            copy_deep(&src.join(&name), &dst.join(&name))?;
        }
        return Ok(());
    }

    fs::copy(src, dst).map_err(|e| copy_error(src, dst, e))?;
    Ok(())
}

/// Creates a symlink at `link` pointing to the literal `target`.
///
/// The target is not checked; dangling links are allowed.
///
/// # Errors
///
/// Returns `AssemblyError::Symlink` if the link cannot be created.
pub fn create_symlink(target: &Path, link: &Path) -> ReleaseResult<()> {
    std::os::unix::fs::symlink(target, link).map_err(|source| {
        AssemblyError::Symlink {
            link: link.display().to_string(),
            target: target.display().to_string(),
            source,
        }
        .into()
    })
}

/// Creates `dir` and any missing parents.
///
/// # Errors
///
/// Returns `AssemblyError::CreateDir` on failure.
pub fn ensure_dir(dir: &Path) -> ReleaseResult<()> {
    fs::create_dir_all(dir).map_err(|source| {
        AssemblyError::CreateDir {
            path: dir.display().to_string(),
            source,
        }
        .into()
    })
}
