// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Host platform facts used in the release name.
//!
//! ```text
//! std::env::consts::{OS, ARCH} --> system, machine
//! /etc/os-release (Linux)      --> Distro { id, version, major_version }
//!
//! normalize_os():
//!   darwin                         (non-Linux: lowercased system)
//!   centos                         (centos 7, or almalinux on x86_64)
//!   ubuntu22.04                    (ubuntu: full version)
//!   almalinux9, rocky8, ...        (id + major version)
//! ```

use std::path::Path;

use tracing::{debug, warn};

const OS_RELEASE: &str = "/etc/os-release";

/// Linux distribution identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distro {
    id: String,
    version: String,
    major_version: String,
}

impl Distro {
    /// Creates a distro; the major version is the text before the first `.`.
    #[must_use]
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        let version = version.into();
        let major_version = version.split('.').next().unwrap_or_default().to_string();
        Self {
            id: id.into().to_lowercase(),
            version,
            major_version,
        }
    }

    /// Parses the `ID` and `VERSION_ID` fields of an os-release file.
    #[must_use]
    pub fn from_os_release(content: &str) -> Option<Self> {
        let mut id = None;
        let mut version = String::new();
        for line in content.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            match key {
                "ID" => id = Some(value.to_string()),
                "VERSION_ID" => version = value.to_string(),
                _ => {}
            }
        }
        id.filter(|id| !id.is_empty())
            .map(|id| Self::new(id, version))
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn major_version(&self) -> &str {
        &self.major_version
    }
}

/// Operating system, machine architecture and (on Linux) distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    system: String,
    machine: String,
    distro: Option<Distro>,
}

impl PlatformInfo {
    #[must_use]
    pub fn new(system: impl Into<String>, machine: impl Into<String>, distro: Option<Distro>) -> Self {
        Self {
            system: system.into(),
            machine: machine.into(),
            distro,
        }
    }

    /// Describes the running host.
    #[must_use]
    pub fn detect() -> Self {
        let (system, machine) = host_names(std::env::consts::OS, std::env::consts::ARCH);
        let distro = if system == "linux" {
            read_distro(Path::new(OS_RELEASE))
        } else {
            None
        };
        let info = Self::new(system, machine, distro);
        debug!(platform = ?info, "Detected platform");
        info
    }

    #[must_use]
    pub fn system(&self) -> &str {
        &self.system
    }

    #[must_use]
    pub fn machine(&self) -> &str {
        &self.machine
    }

    #[must_use]
    pub const fn distro(&self) -> Option<&Distro> {
        self.distro.as_ref()
    }
}

/// Maps Rust target names to `uname` style names.
fn host_names(os: &str, arch: &str) -> (String, String) {
    match (os, arch) {
        ("macos", "aarch64") => ("darwin".to_string(), "arm64".to_string()),
        ("macos", arch) => ("darwin".to_string(), arch.to_string()),
        (os, arch) => (os.to_string(), arch.to_string()),
    }
}

fn read_distro(path: &Path) -> Option<Distro> {
    match std::fs::read_to_string(path) {
        Ok(content) => Distro::from_os_release(&content),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read distribution info");
            None
        }
    }
}

/// Operating system token of the release file name.
#[must_use]
pub fn normalize_os(platform: &PlatformInfo) -> String {
    let system = platform.system().to_lowercase();
    if system != "linux" {
        return system;
    }
    let Some(distro) = platform.distro() else {
        return system;
    };

    let machine = platform.machine().to_lowercase();
    match distro.id() {
        "centos" if distro.major_version() == "7" => "centos".to_string(),
        "almalinux" if machine == "x86_64" => "centos".to_string(),
        "ubuntu" => format!("ubuntu{}", distro.version()),
        id => format!("{id}{}", distro.major_version()),
    }
}
