// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |         package / manifest / name
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!              build      manifest    git
//!           version.txt   load and   gix/CLI
//!             pom.xml      expand
//!                 |           |
//!                 +-----+-----+
//!                       v
//!                   assemble  --> staging tree
//!                       |
//!                       v
//!                   release   --> identity, StagedRelease,
//!                       |         tools (chmod, tar)
//!                       v
//!                 yugabyte-...tar.gz
//!
//!   +-----------------------------------------+
//!   |  core   process                         |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod assemble;
pub mod build;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod manifest;
pub mod release;
pub mod tools;
pub mod utility;
