// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{AssemblyError, ConfigError, FsError, PackagingError, ReleaseError, ReleaseResult};
use std::path::Path;

#[test]
fn test_config_error_display() {
    let err = ConfigError::UnknownProfile {
        path: "yb_release_manifest.json".to_string(),
        profile: "server".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"package 'server' not found in release manifest 'yb_release_manifest.json'"
    );
}

#[test]
fn test_packaging_error_wraps_into_release_error() {
    let err: ReleaseError = PackagingError::ArchiveFailed {
        archive: "/tmp/out.tar.gz".to_string(),
        message: "tar exited with code 2".to_string(),
    }
    .into();

    assert!(err.as_packaging().is_some());
    assert!(err.as_config().is_none());
    insta::assert_snapshot!(
        err.to_string(),
        @"packaging error: failed to create archive '/tmp/out.tar.gz': tar exited with code 2"
    );
}

#[test]
fn test_assembly_error_accessor() {
    let err: ReleaseError = AssemblyError::DestinationExists("/stage/bin/yb-master".into()).into();
    assert!(matches!(
        err.as_assembly(),
        Some(AssemblyError::DestinationExists(_))
    ));
}

#[test]
fn test_fs_error_classification() {
    let not_found = FsError::from_io(
        Path::new("/missing"),
        std::io::Error::from(std::io::ErrorKind::NotFound),
    );
    let denied = FsError::from_io(
        Path::new("/root"),
        std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    );
    assert!(matches!(not_found, FsError::NotFound(_)));
    assert!(matches!(denied, FsError::PermissionDenied(_)));
}

#[test]
fn test_release_error_size() {
    // Box<str> (Other) is 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<ReleaseError>();
    assert!(size <= 24, "ReleaseError is {size} bytes, expected <= 24");
}

#[test]
fn test_release_result_size() {
    let size = std::mem::size_of::<ReleaseResult<()>>();
    assert!(size <= 24, "ReleaseResult<()> is {size} bytes, expected <= 24");
}
