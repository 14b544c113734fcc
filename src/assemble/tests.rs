// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::glob::{expand_pattern, resolve_pattern};
use super::{assemble, reconcile};
use crate::error::AssemblyError;
use crate::manifest::{BIN_SECTION, ReleaseManifest, SYMLINKS_SECTION, Section};

struct Fixture {
    _temp: TempDir,
    repo: PathBuf,
    dest: PathBuf,
}

fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, path.display().to_string()).unwrap();
}

/// repo/
///   bin/yb-ctl
///   build/rel/bin/{yb-master,yb-tserver}
///   build/rel/lib/{libyb.so,.libyb.so.debug}
///   share/sql/{a.sql,b.sql}
fn fixture() -> Fixture {
    let temp = tempfile::tempdir().unwrap();
    let repo = temp.path().join("repo");
    touch(&repo.join("bin/yb-ctl"));
    touch(&repo.join("build/rel/bin/yb-master"));
    touch(&repo.join("build/rel/bin/yb-tserver"));
    touch(&repo.join("build/rel/lib/libyb.so"));
    touch(&repo.join("build/rel/lib/.libyb.so.debug"));
    touch(&repo.join("share/sql/a.sql"));
    touch(&repo.join("share/sql/b.sql"));
    let dest = temp.path().join("dist");
    std::fs::create_dir(&dest).unwrap();
    Fixture {
        _temp: temp,
        repo,
        dest,
    }
}

fn manifest(sections: &[(&str, Section)]) -> ReleaseManifest {
    ReleaseManifest::from_sections(
        sections
            .iter()
            .map(|(name, section)| ((*name).to_string(), section.clone()))
            .collect(),
    )
}

fn patterns(values: &[&str]) -> Section {
    Section::Patterns(values.iter().map(ToString::to_string).collect())
}

fn names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_assemble_copies_matches_under_base_name() {
    let fx = fixture();
    let build_bin = fx.repo.join("build/rel/bin/yb-*").display().to_string();
    let manifest = manifest(&[
        (BIN_SECTION, patterns(&[&build_bin, "bin/yb-ctl"])),
        ("share", patterns(&["share/sql"])),
    ]);

    assemble(&manifest, &fx.repo, &fx.dest).unwrap();

    assert_eq!(names(&fx.dest.join("bin")), ["yb-ctl", "yb-master", "yb-tserver"]);
    assert_eq!(names(&fx.dest.join("share/sql")), ["a.sql", "b.sql"]);
}

#[test]
fn test_assemble_zero_match_leaves_empty_section() {
    let fx = fixture();
    let manifest = manifest(&[("lib", patterns(&["build/rel/lib/*.dylib", "missing/file"]))]);

    assemble(&manifest, &fx.repo, &fx.dest).unwrap();

    assert!(fx.dest.join("lib").is_dir());
    assert!(names(&fx.dest.join("lib")).is_empty());
}

#[test]
fn test_assemble_wildcards_skip_hidden_files() {
    let fx = fixture();
    let manifest = manifest(&[("lib", patterns(&["build/rel/lib/*"]))]);

    assemble(&manifest, &fx.repo, &fx.dest).unwrap();
    assert_eq!(names(&fx.dest.join("lib")), ["libyb.so"]);
}

#[test]
fn test_assemble_symlinks_after_copies() {
    let fx = fixture();
    let mut links = BTreeMap::new();
    links.insert("postgres/bin/yb-master".to_string(), "../../bin/yb-master".to_string());
    links.insert("dangling".to_string(), "/nonexistent/target".to_string());
    let manifest = manifest(&[
        (SYMLINKS_SECTION, Section::Symlinks(links)),
        ("bin", patterns(&["build/rel/bin/yb-master"])),
    ]);

    assemble(&manifest, &fx.repo, &fx.dest).unwrap();

    let link = fx.dest.join("postgres/bin/yb-master");
    assert_eq!(
        std::fs::read_link(&link).unwrap(),
        PathBuf::from("../../bin/yb-master")
    );
    assert!(link.exists());
    assert!(
        std::fs::symlink_metadata(fx.dest.join("dangling"))
            .unwrap()
            .file_type()
            .is_symlink()
    );
    assert!(!fx.dest.join(SYMLINKS_SECTION).exists());
}

#[test]
fn test_assemble_destination_collision_is_error() {
    let fx = fixture();
    touch(&fx.repo.join("other/yb-ctl"));
    let manifest = manifest(&[("bin", patterns(&["bin/yb-ctl", "other/yb-ctl"]))]);

    let err = assemble(&manifest, &fx.repo, &fx.dest).unwrap_err();
    assert!(matches!(
        err.as_assembly(),
        Some(AssemblyError::DestinationExists(_))
    ));
}

#[test]
fn test_assemble_invalid_pattern_is_error() {
    let fx = fixture();
    let manifest = manifest(&[("lib", patterns(&["build/rel/lib/lib\\yb*"]))]);

    let err = assemble(&manifest, &fx.repo, &fx.dest).unwrap_err();
    assert!(matches!(
        err.as_assembly(),
        Some(AssemblyError::InvalidPattern { .. })
    ));
}

#[test]
fn test_reconcile_inventories_tree_without_bin() {
    let fx = fixture();
    let mut links = BTreeMap::new();
    links.insert("postgres/lib".to_string(), "../lib".to_string());
    let input = manifest(&[
        (BIN_SECTION, patterns(&["bin/yb-ctl"])),
        ("lib", patterns(&["build/rel/lib/libyb.so"])),
        (SYMLINKS_SECTION, Section::Symlinks(links)),
    ]);
    assemble(&input, &fx.repo, &fx.dest).unwrap();
    touch(&fx.dest.join("version_metadata.json"));

    let reconciled = reconcile(&input, &fx.dest).unwrap();
    let full = |rel: &str| fx.dest.join(rel).display().to_string();

    assert!(!reconciled.contains(BIN_SECTION));
    assert_eq!(
        reconciled.get("."),
        Some(&Section::Patterns(vec![full("version_metadata.json")]))
    );
    assert_eq!(
        reconciled.get("lib"),
        Some(&Section::Patterns(vec![
            "build/rel/lib/libyb.so".to_string(),
            full("lib/libyb.so"),
        ]))
    );
    assert_eq!(
        reconciled.get("postgres"),
        Some(&Section::Patterns(vec![full("postgres/lib")]))
    );
    assert!(reconciled.symlinks().is_some());
}

#[test]
fn test_reconcile_missing_destination() {
    let fx = fixture();
    let err = reconcile(&ReleaseManifest::default(), &fx.dest.join("missing")).unwrap_err();
    assert!(matches!(err.as_assembly(), Some(AssemblyError::Walk { .. })));
}

// --- glob ---

#[test]
fn test_resolve_pattern() {
    assert_eq!(resolve_pattern(Path::new("/src/yb"), "bin/*"), "/src/yb/bin/*");
    assert_eq!(resolve_pattern(Path::new("/src/yb"), "/opt/x"), "/opt/x");
}

#[test]
fn test_expand_pattern_double_star_stays_in_one_component() {
    let fx = fixture();
    let nested = format!("{}/share/**/*.sql", fx.repo.display());
    assert_eq!(
        expand_pattern(&nested).unwrap(),
        [
            fx.repo.join("share/sql/a.sql"),
            fx.repo.join("share/sql/b.sql")
        ]
    );

    let too_shallow = format!("{}/**/*.sql", fx.repo.display());
    assert!(expand_pattern(&too_shallow).unwrap().is_empty());

    let inside_name = format!("{}/lib**.so", fx.repo.join("build/rel/lib").display());
    assert_eq!(
        expand_pattern(&inside_name).unwrap(),
        [fx.repo.join("build/rel/lib/libyb.so")]
    );
}

#[test]
fn test_expand_pattern_follows_directory_symlinks() {
    let fx = fixture();
    touch(&fx.repo.join("tp/real/lib/libx.so"));
    std::os::unix::fs::symlink("real", fx.repo.join("tp/link")).unwrap();

    let pattern = format!("{}/tp/*/lib/*.so", fx.repo.display());
    assert_eq!(
        expand_pattern(&pattern).unwrap(),
        [
            fx.repo.join("tp/link/lib/libx.so"),
            fx.repo.join("tp/real/lib/libx.so")
        ]
    );
}

#[test]
fn test_expand_pattern_intermediate_components_match_directories_only() {
    let fx = fixture();
    touch(&fx.repo.join("tp/plain"));
    touch(&fx.repo.join("tp/real/lib/libx.so"));

    let pattern = format!("{}/tp/*/lib", fx.repo.display());
    assert_eq!(
        expand_pattern(&pattern).unwrap(),
        [fx.repo.join("tp/real/lib")]
    );
}

#[test]
fn test_expand_pattern_keeps_wax_syntax_literal() {
    let fx = fixture();
    let dir = fx.repo.join("odd");
    for name in ["a(1).txt", "b{2,3}.txt", "c<4:5>$.txt", "d].txt", "x[1"] {
        touch(&dir.join(name));
    }

    let matches = |glob: &str| {
        let pattern = format!("{}/{glob}", dir.display());
        expand_pattern(&pattern)
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
    };

    assert_eq!(matches("a(1)*"), ["a(1).txt"]);
    assert_eq!(matches("b{2,3}*"), ["b{2,3}.txt"]);
    assert_eq!(matches("c<4:5>$*"), ["c<4:5>$.txt"]);
    assert_eq!(matches("d]*"), ["d].txt"]);
    assert_eq!(matches("x[1*"), ["x[1"]);
}

#[test]
fn test_expand_pattern_character_classes() {
    let fx = fixture();
    let sql = fx.repo.join("share/sql");
    let matches = |glob: &str| expand_pattern(&format!("{}/{glob}", sql.display())).unwrap();

    assert_eq!(matches("[ab].sql"), [sql.join("a.sql"), sql.join("b.sql")]);
    assert_eq!(matches("[!a].sql"), [sql.join("b.sql")]);
    assert_eq!(matches("[a-].sql"), [sql.join("a.sql")]);
    assert_eq!(matches("?.sql"), [sql.join("a.sql"), sql.join("b.sql")]);
}

#[test]
fn test_expand_pattern_single_level_does_not_descend() {
    let fx = fixture();
    let pattern = format!("{}/*", fx.repo.join("share").display());
    assert_eq!(expand_pattern(&pattern).unwrap(), [fx.repo.join("share/sql")]);
}

#[test]
fn test_expand_pattern_explicit_hidden() {
    let fx = fixture();
    let pattern = format!("{}/.*.debug", fx.repo.join("build/rel/lib").display());
    assert_eq!(
        expand_pattern(&pattern).unwrap(),
        [fx.repo.join("build/rel/lib/.libyb.so.debug")]
    );
}

#[test]
fn test_expand_pattern_literal_paths() {
    let fx = fixture();
    let existing = fx.repo.join("bin/yb-ctl");
    assert_eq!(
        expand_pattern(&existing.display().to_string()).unwrap(),
        [existing.clone()]
    );

    let dangling = fx.repo.join("dangling");
    std::os::unix::fs::symlink("/nonexistent", &dangling).unwrap();
    assert_eq!(
        expand_pattern(&dangling.display().to_string()).unwrap(),
        [dangling.clone()]
    );

    let missing = fx.repo.join("missing");
    assert!(expand_pattern(&missing.display().to_string()).unwrap().is_empty());
}

#[test]
fn test_expand_pattern_missing_root() {
    let fx = fixture();
    let pattern = format!("{}/*.so", fx.repo.join("nope").display());
    assert!(expand_pattern(&pattern).unwrap().is_empty());
}
