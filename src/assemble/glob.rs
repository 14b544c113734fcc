// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem glob expansion for manifest patterns.
//!
//! ```text
//! /src/yb/thirdparty/*/lib/libz*.so
//! '--- literal root --''-''--''---'
//!                        |   |   '-- wax match over read_dir(lib)
//!                        |   '------ joined, kept if a directory
//!                        '---------- wax match over read_dir(root)
//! ```
//!
//! Components are expanded one at a time, so directory symlinks anywhere in
//! the pattern are followed. Only `*`, `?` and `[...]` are wildcards and
//! `**` matches like `*` within a single component. Other characters are
//! literal, except that a backslash is rejected.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use wax::{Glob, Program};

use crate::error::{AssemblyError, ReleaseResult};

const GLOB_MAGIC: &[char] = &['*', '?', '['];

/// Characters wax gives meaning to that a shell glob treats as text.
const WAX_ONLY_META: &[char] = &['(', ')', '<', '>', '{', '}', ']', ',', ':', '$'];

fn has_magic(component: &str) -> bool {
    component.contains(GLOB_MAGIC)
}

/// Index of the `]` closing the class opened at `open`, if any.
///
/// A `]` right after `[` or `[!` belongs to the class.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut start = open + 1;
    if chars.get(start) == Some(&'!') {
        start += 1;
    }
    if chars.get(start) == Some(&']') {
        start += 1;
    }
    chars
        .get(start..)?
        .iter()
        .position(|&c| c == ']')
        .map(|offset| start + offset)
}

fn push_class(expression: &mut String, body: &[char]) {
    expression.push('[');
    let body = match body.split_first() {
        Some((&'!', rest)) => {
            expression.push('!');
            rest
        }
        _ => body,
    };
    for (index, &c) in body.iter().enumerate() {
        let at_edge = index == 0 || index + 1 == body.len();
        if matches!(c, '[' | ']') || (c == '-' && at_edge) {
            expression.push('\\');
        }
        expression.push(c);
    }
    expression.push(']');
}

/// Rewrites one shell-style path component as a wax expression.
fn component_expression(pattern: &str, component: &str) -> ReleaseResult<String> {
    if component.contains('\\') {
        return Err(AssemblyError::InvalidPattern {
            pattern: pattern.to_string(),
            message: "backslashes are not supported in glob patterns".to_string(),
        }
        .into());
    }

    let chars: Vec<char> = component.chars().collect();
    let mut expression = String::with_capacity(component.len() + 4);
    let mut index = 0;

    while index < chars.len() {
        match chars[index] {
            '*' => {
                expression.push('*');
                while chars.get(index + 1) == Some(&'*') {
                    index += 1;
                }
            }
            '[' => match class_end(&chars, index) {
                Some(end) => {
                    push_class(&mut expression, &chars[index + 1..end]);
                    index = end;
                }
                None => expression.push_str("\\["),
            },
            c if WAX_ONLY_META.contains(&c) => {
                expression.push('\\');
                expression.push(c);
            }
            c => expression.push(c),
        }
        index += 1;
    }
    Ok(expression)
}

/// Roots a relative pattern at `repo_root`; absolute patterns are kept.
#[must_use]
pub fn resolve_pattern(repo_root: &Path, pattern: &str) -> String {
    if pattern.starts_with('/') {
        pattern.to_string()
    } else {
        repo_root.join(pattern).display().to_string()
    }
}

/// Expands an absolute pattern to the sorted list of existing paths it names.
///
/// A pattern without wildcards names itself when it exists, dangling symlinks
/// included. A wildcard component skips hidden entries unless it starts with
/// a dot itself. Intermediate components only match directories, symlinks to
/// directories included. No match yields an empty list.
///
/// # Errors
///
/// Returns `AssemblyError::InvalidPattern` for malformed glob syntax and
/// `AssemblyError::Walk` if a matched directory cannot be listed.
pub fn expand_pattern(pattern: &str) -> ReleaseResult<Vec<PathBuf>> {
    let components: Vec<&str> = pattern.split('/').collect();
    let literal_len = components.iter().take_while(|c| !has_magic(c)).count();

    if literal_len == components.len() {
        let path = PathBuf::from(pattern);
        return Ok(if std::fs::symlink_metadata(&path).is_ok() {
            vec![path]
        } else {
            Vec::new()
        });
    }

    let literal = components[..literal_len].join("/");
    let root = if literal.is_empty() && pattern.starts_with('/') {
        PathBuf::from("/")
    } else if literal.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(literal)
    };

    let rest: Vec<&str> = components[literal_len..]
        .iter()
        .copied()
        .filter(|c| !c.is_empty())
        .collect();
    let dirs_only = pattern.ends_with('/');

    let mut current = vec![root];
    for (index, component) in rest.iter().enumerate() {
        let want_dir = dirs_only || index + 1 < rest.len();
        current = if has_magic(component) {
            expand_component(pattern, &current, component, want_dir)?
        } else {
            current
                .iter()
                .map(|dir| dir.join(component))
                .filter(|path| {
                    if want_dir {
                        path.is_dir()
                    } else {
                        std::fs::symlink_metadata(path).is_ok()
                    }
                })
                .collect()
        };
        if current.is_empty() {
            break;
        }
    }

    current.sort();
    current.dedup();
    Ok(current)
}

fn expand_component(
    pattern: &str,
    dirs: &[PathBuf],
    component: &str,
    want_dir: bool,
) -> ReleaseResult<Vec<PathBuf>> {
    let expression = component_expression(pattern, component)?;
    let glob = Glob::new(&expression).map_err(|e| AssemblyError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    let include_hidden = component.starts_with('.');

    let mut matches = Vec::new();
    for dir in dirs {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                continue;
            }
            Err(e) => {
                return Err(AssemblyError::Walk {
                    path: dir.display().to_string(),
                    message: e.to_string(),
                }
                .into());
            }
        };

        for entry in entries {
            let entry = entry.map_err(|e| AssemblyError::Walk {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?;
            let name = entry.file_name();
            if !include_hidden && name.as_encoded_bytes().first() == Some(&b'.') {
                continue;
            }
            if !glob.is_match(Path::new(&name)) {
                continue;
            }
            let path = entry.path();
            if want_dir && !path.is_dir() {
                continue;
            }
            matches.push(path);
        }
    }
    matches.sort();
    Ok(matches)
}
