// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release manifest loading and section model.
//!
//! ```text
//! yb_release_manifest.json
//!   { "all": { "bin": [...], "lib": [...], "%symlinks%": {dst: target} },
//!     "cli": { ... } }
//!        |
//!        v  load(path, profile)
//! ReleaseManifest { section -> Section }
//!   Section::Patterns(Vec<String>)       every other key
//!   Section::Symlinks(BTreeMap<..>)      "%symlinks%" only
//!        |
//!        v  expand(manifest, ExpansionContext)
//! ReleaseManifest (placeholders substituted)
//! ```
//!
//! The section variant is decided by the key, never by the JSON value's
//! runtime type; a value of the wrong shape is a [`ConfigError`].

pub mod expand;


use std::collections::BTreeMap;
use std::collections::btree_map;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::ConfigError;

pub use expand::{ExpansionContext, expand};

/// Reserved section mapping destination-relative paths to symlink targets.
pub const SYMLINKS_SECTION: &str = "%symlinks%";

/// Section holding the seed executable patterns.
pub const BIN_SECTION: &str = "bin";

/// One top-level manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Section {
    /// Path patterns copied into the directory named after the section.
    Patterns(Vec<String>),
    /// Destination-relative link path -> literal link target.
    Symlinks(BTreeMap<String, String>),
}

/// Manifest of one package profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReleaseManifest {
    sections: BTreeMap<String, Section>,
}

impl ReleaseManifest {
    /// Loads the `profile` entry of the manifest file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file is missing or unreadable, is not
    /// valid JSON, has no `profile` entry, or a section has the wrong shape.
    pub fn load(path: &Path, profile: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content, profile, &path.display().to_string())
    }

    /// Parses the `profile` entry of manifest JSON; `origin` names the source
    /// in error messages.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), minus the read failure.
    pub fn from_json_str(content: &str, profile: &str, origin: &str) -> Result<Self, ConfigError> {
        let parse_error = |message: String| ConfigError::ParseError {
            path: origin.to_string(),
            message,
        };

        let root: Value = serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
        let Value::Object(mut profiles) = root else {
            return Err(parse_error("top level must be an object keyed by package name".into()));
        };
        let entry = profiles
            .remove(profile)
            .ok_or_else(|| ConfigError::UnknownProfile {
                path: origin.to_string(),
                profile: profile.to_string(),
            })?;
        let Value::Object(raw_sections) = entry else {
            return Err(parse_error(format!("package '{profile}' must be an object")));
        };

        let mut sections = BTreeMap::new();
        for (key, value) in raw_sections {
            let (parsed, expected) = if key == SYMLINKS_SECTION {
                (parse_symlinks(value), "an object of strings")
            } else {
                (parse_patterns(value), "a list of strings")
            };
            let section = parsed.ok_or_else(|| {
                parse_error(format!("section '{key}' of package '{profile}' must be {expected}"))
            })?;
            sections.insert(key, section);
        }

        Ok(Self { sections })
    }

    /// Builds a manifest directly from sections.
    #[must_use]
    pub const fn from_sections(sections: BTreeMap<String, Section>) -> Self {
        Self { sections }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Sections in key order.
    pub fn sections(&self) -> btree_map::Iter<'_, String, Section> {
        self.sections.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The `%symlinks%` mapping, if present.
    #[must_use]
    pub fn symlinks(&self) -> Option<&BTreeMap<String, String>> {
        match self.sections.get(SYMLINKS_SECTION) {
            Some(Section::Symlinks(links)) => Some(links),
            _ => None,
        }
    }

    /// Patterns of the `bin` section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSection` if there is no `bin` list.
    pub fn seed_executable_patterns(&self) -> Result<&[String], ConfigError> {
        match self.sections.get(BIN_SECTION) {
            Some(Section::Patterns(patterns)) => Ok(patterns),
            _ => Err(ConfigError::MissingSection(BIN_SECTION.to_string())),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Section> {
        self.sections.remove(name)
    }

    /// Appends to the pattern list `name`, creating it if absent.
    ///
    /// A symlink section of the same name is left untouched.
    pub fn extend_patterns(&mut self, name: &str, values: impl IntoIterator<Item = String>) {
        let section = self
            .sections
            .entry(name.to_string())
            .or_insert_with(|| Section::Patterns(Vec::new()));
        if let Section::Patterns(list) = section {
            list.extend(values);
        }
    }

    /// Pretty JSON with sorted keys.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a ReleaseManifest {
    type Item = (&'a String, &'a Section);
    type IntoIter = btree_map::Iter<'a, String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

fn parse_patterns(value: Value) -> Option<Section> {
    let Value::Array(items) = value else {
        return None;
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
        .map(Section::Patterns)
}

fn parse_symlinks(value: Value) -> Option<Section> {
    let Value::Object(map) = value else {
        return None;
    };
    map.into_iter()
        .map(|(link, target)| match target {
            Value::String(t) => Some((link, t)),
            _ => None,
        })
        .collect::<Option<BTreeMap<_, _>>>()
        .map(Section::Symlinks)
}
