// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the release pipeline.
//!
//! Drives manifest expansion, assembly, reconciliation and packaging through
//! the public API on a scratch source tree.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use yb_release::assemble::{assemble, reconcile};
use yb_release::build::BuildConfig;
use yb_release::config::Config;
use yb_release::manifest::{ReleaseManifest, Section, expand};
use yb_release::release::{PlatformInfo, ReleaseIdentity, package};
use yb_release::tools::ToolContext;

const MANIFEST: &str = r#"{
  "all": {
    "bin": ["$BUILD_ROOT/bin/yb-master", "$BUILD_ROOT/bin/yb-tserver", "bin/yugabyted"],
    "lib/yb": ["$BUILD_ROOT/lib/*.so*"],
    "lib/yb-thirdparty": ["thirdparty/installed/common/lib/libcrypto.so*"],
    "lib/uninstrumented": ["$THIRDPARTY_BUILD_SPECIFIC_DIR/lib/libunwind.so*"],
    "jars": ["java/yb-cli/target/yb-cli-${project.version}.jar"],
    "%symlinks%": {
      "postgres/bin": "../bin",
      "lib/yb/libyb_util.so": "libyb_util.so.1"
    }
  }
}"#;

struct SourceTree {
    _temp: tempfile::TempDir,
    root: PathBuf,
}

impl SourceTree {
    fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("yugabyte-db");
        for (relative, content) in [
            ("version.txt", "2.21.0.0-b0\n"),
            ("java/pom.xml", "<project><version>2.21.0.0-SNAPSHOT</version></project>"),
            ("java/yb-cli/target/yb-cli-2.21.0.0-SNAPSHOT.jar", "jar"),
            ("bin/yugabyted", "#!/usr/bin/env python3\n"),
            ("build/release-clang12-dynamic-ninja/bin/yb-master", "elf"),
            ("build/release-clang12-dynamic-ninja/bin/yb-tserver", "elf"),
            ("build/release-clang12-dynamic-ninja/lib/libyb_util.so.1", "elf"),
            ("thirdparty/installed/common/lib/libcrypto.so.3", "elf"),
            ("thirdparty/installed/uninstrumented/lib/libunwind.so.1", "elf"),
        ] {
            let path = root.join(relative);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        std::fs::write(root.join("yb_release_manifest.json"), MANIFEST).unwrap();
        Self { _temp: temp, root }
    }

    fn config(&self) -> Config {
        let toml = r#"
[release]
commit = "0123abcd"

[paths]
build_root = "build/release-clang12-dynamic-ninja"
"#;
        Config::parse(toml, &self.root).unwrap()
    }
}

fn patterns(manifest: &ReleaseManifest, key: &str) -> Vec<String> {
    match manifest.get(key) {
        Some(Section::Patterns(patterns)) => patterns.clone(),
        other => panic!("{key}: {other:?}"),
    }
}

#[test]
fn release_manifest_expansion() {
    let tree = SourceTree::new();
    let config = tree.config();
    let build = BuildConfig::from_config(&config).unwrap();
    assert_eq!(build.base_version(), "2.21.0.0");
    assert_eq!(build.project_version(), "2.21.0.0-SNAPSHOT");

    let manifest = ReleaseManifest::load(&tree.root.join("yb_release_manifest.json"), "all").unwrap();
    let expanded = expand(&manifest, &build.expansion_context(config.paths.thirdparty().unwrap()));
    let root = tree.root.display().to_string();

    assert_eq!(
        patterns(&expanded, "lib/yb-thirdparty"),
        [format!("{root}/thirdparty/installed/common/lib/libcrypto.so*")]
    );
    assert_eq!(
        patterns(&expanded, "lib/uninstrumented"),
        [format!("{root}/thirdparty/installed/uninstrumented/lib/libunwind.so*")]
    );
    assert_eq!(
        patterns(&expanded, "jars"),
        ["java/yb-cli/target/yb-cli-2.21.0.0-SNAPSHOT.jar"]
    );
    assert_eq!(
        expanded.seed_executable_patterns().unwrap()[0],
        format!("{root}/build/release-clang12-dynamic-ninja/bin/yb-master")
    );
}

#[tokio::test]
async fn release_full_pipeline() {
    let tree = SourceTree::new();
    let config = tree.config();
    let build = BuildConfig::from_config(&config).unwrap();
    let manifest = ReleaseManifest::load(&tree.root.join("yb_release_manifest.json"), "all").unwrap();
    let expanded = expand(&manifest, &build.expansion_context(config.paths.thirdparty().unwrap()));

    let staging_parent = tempfile::tempdir().unwrap();
    let staging = staging_parent.path().join("distribution");
    std::fs::create_dir(&staging).unwrap();

    assemble(&expanded, build.repository(), &staging).unwrap();
    assert!(staging.join("bin/yb-tserver").is_file());
    assert!(staging.join("lib/yb/libyb_util.so").is_file());
    assert!(staging.join("postgres/bin/yb-master").is_file());

    let reconciled = reconcile(&expanded, &staging).unwrap();
    assert!(!reconciled.contains("bin"));
    assert!(
        patterns(&reconciled, "postgres")
            .contains(&staging.join("postgres/bin").display().to_string())
    );

    let identity = ReleaseIdentity::resolve(&config, &build, &PlatformInfo::detect()).unwrap();
    assert!(
        identity
            .release_filename()
            .starts_with("yugabyte-2.21.0.0-0123abcd-release-")
    );

    let ctx = ToolContext::new(Arc::new(config.clone()), CancellationToken::new(), false);
    let output = config.paths.output().unwrap();
    let archive = package(&ctx, &staging, &identity, output).await.unwrap();

    assert_eq!(archive, output.join(identity.release_filename()));
    assert!(archive.is_file());
    assert!(staging.join("bin/yb-master").is_file());
    assert!(!Path::new(&format!("{}.tmp_for_tar_gz", staging.display())).exists());

    let listing = std::process::Command::new("tar")
        .arg("tzf")
        .arg(&archive)
        .output()
        .unwrap();
    let listing = String::from_utf8_lossy(&listing.stdout);
    assert!(listing.lines().all(|l| l.starts_with("yugabyte-2.21.0.0/")));
    assert!(listing.lines().any(|l| l == "yugabyte-2.21.0.0/jars/yb-cli-2.21.0.0-SNAPSHOT.jar"));
}
