// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::new("tar")
//!   .arg() .cwd() .capture_stderr()
//!   .run_with_cancellation(token)
//!       --> tokio::process::Command
//!           stdout to trace log, stderr kept
//!       --> ProcessOutput { exit_code, stderr, interrupted }
//! ```

pub mod builder;
mod io;
mod runner;
