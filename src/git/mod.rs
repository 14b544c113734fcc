// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!          query.rs
//!             |
//!      ,------------------,
//!      | backend (traits) |
//!      '--+----------+----'
//!         |          |
//!         v          v
//!     GitQuery   GitHistory
//!   (gix, read)  (CLI, diff/log)
//!         |          |
//!         v          v
//!    GixBackend  ShellBackend
//!    .head       .diff_against
//!                .commits_ahead_of
//! ```

pub mod backend;
pub mod query;

#[cfg(test)]
pub(crate) mod tests;
