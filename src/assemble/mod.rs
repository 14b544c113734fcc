// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Distribution assembly.
//!
//! ```text
//! ReleaseManifest (expanded)
//!   |
//!   |  assemble(manifest, repo_root, dest)
//!   |    pattern sections:  mkdir dest/<section>
//!   |                       glob each pattern (relative -> repo_root)
//!   |                       copy_deep(match, dest/<section>/<basename>)
//!   |    %symlinks%:        mkdir parents, symlink dest/<link> -> target
//!   v
//! staging tree
//!   |
//!   |  reconcile(manifest, dest)
//!   |    drop "bin" (also skipped during the walk)
//!   |    walk dest: key = dir relative to dest ("." for root)
//!   |               values += files and symlinks (full paths)
//!   v
//! ReleaseManifest (inventory of what ships)
//! ```
//!
//! A pattern matching nothing is skipped with a debug log, so optional
//! artifacts may be listed in the manifest.

pub mod glob;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::ReleaseResult;
use crate::manifest::{BIN_SECTION, ReleaseManifest, Section};
use crate::utility::fs::copy::{copy_deep, create_symlink, ensure_dir};
use crate::utility::fs::walk::{EntryKind, walk};

use glob::{expand_pattern, resolve_pattern};

/// Populates `destination` from an expanded manifest.
///
/// Pattern sections are copied before any symlink section is created.
///
/// # Errors
///
/// Returns an `AssemblyError` if a directory, copy or symlink cannot be
/// created, a destination entry already exists, or a pattern is malformed.
pub fn assemble(
    manifest: &ReleaseManifest,
    repo_root: &Path,
    destination: &Path,
) -> ReleaseResult<()> {
    for (name, section) in manifest {
        if let Section::Patterns(patterns) = section {
            copy_section(name, patterns, repo_root, destination)?;
        }
    }

    for (_, section) in manifest {
        if let Section::Symlinks(links) = section {
            create_links(links, destination)?;
        }
    }

    info!(path = %destination.display(), "Created the distribution");
    Ok(())
}

fn copy_section(
    name: &str,
    patterns: &[String],
    repo_root: &Path,
    destination: &Path,
) -> ReleaseResult<()> {
    let section_dir = destination.join(name);
    ensure_dir(&section_dir)?;

    for pattern in patterns {
        let resolved = resolve_pattern(repo_root, pattern);
        let matches = expand_pattern(&resolved)?;
        if matches.is_empty() {
            debug!(section = %name, pattern = %resolved, "Pattern matched nothing");
            continue;
        }

        for source in matches {
            let Some(base_name) = source.file_name() else {
                warn!(path = %source.display(), "Skipping match without a file name");
                continue;
            };
            let target = section_dir.join(base_name);
            debug!(from = %source.display(), to = %target.display(), "Copying");
            copy_deep(&source, &target)?;
        }
    }
    Ok(())
}

fn create_links(links: &BTreeMap<String, String>, destination: &Path) -> ReleaseResult<()> {
    for (relative, target) in links {
        let link = destination.join(relative);
        debug!(link = %link.display(), target = %target, "Creating symlink");
        if let Some(parent) = link.parent() {
            ensure_dir(parent)?;
        }
        create_symlink(Path::new(target), &link)?;
    }
    Ok(())
}

/// Rebuilds the manifest from the assembled tree.
///
/// Every directory under `destination` gets an entry keyed by its relative
/// path, extended with the full paths of its files and symlinks in name
/// order. The result never has a `bin` key, not even for the staged `bin`
/// directory, so files shipped under `bin/` are deliberately left out and the
/// manifest is not a complete listing of the archive.
///
/// # Errors
///
/// Returns an `AssemblyError::Walk` if `destination` cannot be traversed.
pub fn reconcile(manifest: &ReleaseManifest, destination: &Path) -> ReleaseResult<ReleaseManifest> {
    let mut inventory: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for entry in walk(destination)? {
        if entry.kind() == EntryKind::Dir {
            inventory
                .entry(relative_key(destination, entry.path()))
                .or_default();
            continue;
        }
        let parent = entry.path().parent().unwrap_or(destination);
        inventory
            .entry(relative_key(destination, parent))
            .or_default()
            .push(entry.path().display().to_string());
    }

    let mut reconciled = manifest.clone();
    reconciled.remove(BIN_SECTION);
    for (key, paths) in inventory {
        if key != BIN_SECTION {
            reconciled.extend_patterns(&key, paths);
        }
    }

    if let Ok(json) = reconciled.to_pretty_json() {
        debug!(manifest = %json, "Effective release manifest");
    }
    Ok(reconciled)
}

fn relative_key(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Ok(relative) => relative.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}
