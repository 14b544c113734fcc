// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              ReleaseError (~24 bytes)
//!                     |
//!   +------+------+---+---+------+------+------+
//!   |      |      |       |      |      |      |
//!   v      v      v       v      v      v      v
//!  Git    Cfg  Assembly  Pkg   Proc    Fs    Io/Other
//!  Box    Box    Box     Box   Box    Box   Box/Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config    ReadError, ParseError, MissingKey, UnknownProfile
//!   Assembly  Copy, Symlink, DestinationExists, InvalidPattern
//!   Packaging TempDir, Move, Permissions, ArchiveFailed, Interrupted, Restore
//!   Git       Gix, CommandFailed
//!   Process   SpawnFailed, NonZeroExit
//!   Fs        NotFound, PermissionDenied, IoError
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ReleaseError`].
pub type ReleaseResult<T> = std::result::Result<T, ReleaseError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration, manifest or version file error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Distribution assembly error.
    #[error("assembly error: {0}")]
    Assembly(#[from] Box<AssemblyError>),

    /// Archive packaging error.
    #[error("packaging error: {0}")]
    Packaging(#[from] Box<PackagingError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl ReleaseError {
    /// Returns the configuration error if this is one.
    #[must_use]
    pub fn as_config(&self) -> Option<&ConfigError> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the assembly error if this is one.
    #[must_use]
    pub fn as_assembly(&self) -> Option<&AssemblyError> {
        match self {
            Self::Assembly(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the packaging error if this is one.
    #[must_use]
    pub fn as_packaging(&self) -> Option<&PackagingError> {
        match self {
            Self::Packaging(err) => Some(err),
            _ => None,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ReleaseError {
                fn from(err: $error) -> Self {
                    ReleaseError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    AssemblyError => Assembly,
    PackagingError => Packaging,
    ProcessError => Process,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to resolve HEAD to a commit.
    #[error("failed to resolve HEAD: {0}")]
    HeadId(#[from] Box<gix::reference::head_id::Error>),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),
}

// --- Config Errors ---

/// Configuration, manifest and version file errors.
///
/// All of these are raised before the staging tree is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration or input file.
    #[error("failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a configuration or input file.
    #[error("failed to parse '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// The manifest has no section for the requested package profile.
    #[error("package '{profile}' not found in release manifest '{path}'")]
    UnknownProfile { path: String, profile: String },

    /// A manifest section is missing.
    #[error("release manifest has no '{0}' section")]
    MissingSection(String),
}

// --- Assembly Errors ---

/// Distribution assembly errors.
///
/// A glob that matches nothing is not an error.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// Failed to create a directory in the staging tree.
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to copy an artifact.
    #[error("failed to copy '{from}' to '{to}': {source}")]
    Copy {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a symlink.
    #[error("failed to create symlink '{link}' -> '{target}': {source}")]
    Symlink {
        link: String,
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Destination entry already exists in the staging tree.
    #[error("destination already exists: {0}")]
    DestinationExists(String),

    /// Glob pattern could not be parsed.
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Failed to walk a directory tree.
    #[error("failed to walk '{path}': {message}")]
    Walk { path: String, message: String },
}

// --- Packaging Errors ---

/// Archive packaging errors.
///
/// Reported only after the staging directory has been restored.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// Temporary parent directory already exists or cannot be created.
    #[error("failed to create temporary directory '{path}': {source}")]
    TempDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to move the staging directory.
    #[error("failed to move '{from}' to '{to}': {source}")]
    Move {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    /// Permission normalization failed.
    #[error("failed to change permissions ({mode}) on '{path}': {message}")]
    Permissions {
        mode: String,
        path: String,
        message: String,
    },

    /// The archiving tool failed.
    #[error("failed to create archive '{archive}': {message}")]
    ArchiveFailed { archive: String, message: String },

    /// Packaging was interrupted.
    #[error("packaging interrupted")]
    Interrupted,

    /// Failed to restore the staging directory.
    #[error("failed to restore staging directory '{path}': {source}")]
    Restore {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Classifies an I/O error on `path`.
    pub fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        let display = path.display().to_string();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(display),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(display),
            _ => Self::IoError {
                path: display,
                source,
            },
        }
    }
}

#[cfg(test)]
mod tests;
