// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader};
use crate::error::ConfigError;
use crate::logging::LogLevel;
use std::path::{Path, PathBuf};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(!config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.release.package_name, "all");
    assert_eq!(config.release.build_type, "release");
    assert_eq!(config.release.product, "yugabyte");
    assert_eq!(config.release.upstream_ref, "origin/master");
    assert_eq!(
        config.release.java_descriptor,
        PathBuf::from("java").join("pom.xml")
    );
}

#[test]
fn test_paths_default_to_repository_layout() {
    let config = Config::parse("", Path::new("/src/yugabyte-db")).unwrap();

    assert_eq!(
        config.paths.repository().unwrap(),
        Path::new("/src/yugabyte-db")
    );
    assert_eq!(
        config.paths.thirdparty().unwrap(),
        Path::new("/src/yugabyte-db/thirdparty")
    );
    assert_eq!(
        config.paths.output().unwrap(),
        Path::new("/src/yugabyte-db/build")
    );
    assert!(config.paths.build_root.is_none());
    assert!(config.paths.staging.is_none());
}

#[test]
fn test_relative_paths_resolve_against_repository() {
    let toml = r#"
[paths]
repository = "/src/yb"
build_root = "build/release-clang12-dynamic-ninja"
thirdparty = "/opt/yb-thirdparty"
output = "dist"
"#;
    let config = Config::parse(toml, Path::new("/elsewhere")).unwrap();

    assert_eq!(
        config.paths.build_root().unwrap(),
        Path::new("/src/yb/build/release-clang12-dynamic-ninja")
    );
    assert_eq!(
        config.paths.thirdparty().unwrap(),
        Path::new("/opt/yb-thirdparty")
    );
    assert_eq!(config.paths.output().unwrap(), Path::new("/src/yb/dist"));
}

#[test]
fn test_relative_repository_resolves_against_cwd() {
    let config = Config::parse("[paths]\nrepository = \"yb\"\n", Path::new("/work")).unwrap();
    assert_eq!(config.paths.repository().unwrap(), Path::new("/work/yb"));
}

#[test]
fn test_missing_build_root_is_config_error() {
    let config = Config::parse("", Path::new("/src/yb")).unwrap();
    let err = config.paths.build_root().unwrap_err();
    let config_err = err.downcast_ref::<ConfigError>().unwrap();
    insta::assert_snapshot!(
        config_err.to_string(),
        @"missing required config key 'build_root' in section '[paths]'"
    );
}

#[test]
fn test_release_section_overrides() {
    let toml = r#"
[release]
package_name = "cli"
build_type = "debug"
commit = "0123abc"
compiler_type = "gcc11"
"#;
    let config = Config::parse(toml, Path::new("/src/yb")).unwrap();
    assert_eq!(config.release.package_name, "cli");
    assert_eq!(config.release.build_type, "debug");
    assert_eq!(config.release.commit.as_deref(), Some("0123abc"));
    assert_eq!(config.release.compiler_type.as_deref(), Some("gcc11"));
}

#[test]
fn test_empty_package_name_rejected() {
    let err = Config::parse("[release]\npackage_name = \"\"\n", Path::new("/src/yb")).unwrap_err();
    assert!(err.downcast_ref::<ConfigError>().is_some());
}

#[test]
fn test_unknown_field_rejected() {
    let result = Config::parse("[release]\nflavour = \"x\"\n", Path::new("/src/yb"));
    assert!(result.is_err());
}

#[test]
fn test_loader_override_wins() {
    let config = ConfigLoader::new()
        .add_toml_str("[release]\nbuild_type = \"debug\"\n")
        .set("release.build_type", "asan")
        .unwrap()
        .with_cwd("/src/yb")
        .build()
        .unwrap();
    assert_eq!(config.release.build_type, "asan");
}

#[test]
fn test_loader_tracks_files() {
    let dir = tempfile::tempdir().unwrap();
    let present = dir.path().join("yb-release.toml");
    std::fs::write(&present, "[global]\ndry = true\n").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file_optional(&present)
        .add_toml_file_optional(dir.path().join("absent.toml"));
    assert_eq!(loader.loaded_files().len(), 1);

    let config = loader.with_cwd(dir.path()).build().unwrap();
    assert!(config.global.dry);
}

#[test]
fn test_format_options_sorted_and_aligned() {
    let config = Config::parse("[paths]\nrepository = \"/src/yb\"\n", Path::new("/")).unwrap();
    let options = config.format_options();

    assert!(options.iter().any(|line| line.starts_with("global.dry")));
    assert!(
        options
            .iter()
            .any(|line| line.contains("paths.repository") && line.ends_with("= /src/yb"))
    );
    let mut sorted = options.clone();
    sorted.sort();
    assert_eq!(options, sorted);
}

#[test]
fn test_loader_applies_set_overrides() {
    let config = ConfigLoader::new()
        .with_overrides(&[
            "release/package_name=cli".to_string(),
            "global/output_log_level=4".to_string(),
            "global/dry=true".to_string(),
        ])
        .unwrap()
        .with_cwd("/src/yb")
        .build()
        .unwrap();
    assert_eq!(config.release.package_name, "cli");
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert!(config.global.dry);
}

#[test]
fn test_loader_rejects_malformed_override() {
    let err = ConfigLoader::new()
        .with_overrides(&["package_name=cli".to_string()])
        .err()
        .unwrap();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidValue { .. })
    ));
}
