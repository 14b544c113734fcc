// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   walk:  walk(), WalkEntry
//!   copy:  copy_deep(), create_symlink(), ensure_dir()
//! ```

pub mod fs;
