// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::error::{AssemblyError, ReleaseResult};

/// Kind of a visited entry, as seen without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    Symlink,
    Other,
}

/// A single visited path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    path: PathBuf,
    kind: EntryKind,
}

impl WalkEntry {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Walks `root` depth-first in file name order, root included.
///
/// Every entry is seen: hidden files are included, ignore files are not
/// consulted, and symlinks are reported without being followed.
///
/// # Errors
///
/// Returns an `AssemblyError::Walk` if the root does not exist or an entry
/// cannot be read.
pub fn walk(root: &Path) -> ReleaseResult<Vec<WalkEntry>> {
    let walk_error = |message: String| AssemblyError::Walk {
        path: root.display().to_string(),
        message,
    };

    if std::fs::symlink_metadata(root).is_err() {
        return Err(walk_error("root does not exist".to_string()).into());
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut entries = Vec::new();
    for result in walker {
        let entry = result.map_err(|e| walk_error(e.to_string()))?;
        let kind = match entry.file_type() {
            Some(ft) if ft.is_symlink() => EntryKind::Symlink,
            Some(ft) if ft.is_dir() => EntryKind::Dir,
            Some(ft) if ft.is_file() => EntryKind::File,
            _ => EntryKind::Other,
        };
        entries.push(WalkEntry {
            kind,
            path: entry.into_path(),
        });
    }
    Ok(entries)
}
