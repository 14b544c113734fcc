// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release naming and packaging.
//!
//! ```text
//! BuildConfig + Config + PlatformInfo
//!        |
//!        v
//! ReleaseIdentity --> release_filename(), folder_name()
//!        |
//!        v
//! package(ctx, staging, identity, output_dir)
//!   StagedRelease guard --> chmod x3 --> tar --> restore
//!        |
//!        v
//! /abs/output/yugabyte-...tar.gz
//! ```

pub mod identity;
pub mod package;
pub mod platform;


pub use identity::ReleaseIdentity;
pub use package::{StagedRelease, package};
pub use platform::{Distro, PlatformInfo, normalize_os};
