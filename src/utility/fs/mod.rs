// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem primitives used to build the staging tree.
//!
//! ```text
//! walk:  walk()          ignore::Walk, sorted, hidden included,
//!                        symlinks not followed
//! copy:  copy_deep()     recursive copy preserving symlinks
//!        create_symlink(), ensure_dir()
//! ```

pub mod copy;
pub mod walk;
