//! Source discovery tests

use std::fs;
use std::path::Path;
use tempfile::tempdir;
use instabl::{core::Walker, models::config::Settings, InstablError};

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "package x\n").unwrap();
}

fn settings_for(root: &Path) -> Settings {
    Settings {
        root: root.to_path_buf(),
        ..Default::default()
    }
}

#[test]
fn test_finds_go_files_recursively() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("main.go"));
    touch(&root.join("pkg/a/a.go"));
    touch(&root.join("pkg/a/a_test.go"));
    touch(&root.join("pkg/b/deep/er/b.go"));
    touch(&root.join("README.md"));
    touch(&root.join("pkg/a/gen.go.txt"));

    let discovery = Walker::new(settings_for(root)).discover().unwrap();

    assert_eq!(
        discovery.files,
        vec![
            root.join("main.go"),
            root.join("pkg/a/a.go"),
            root.join("pkg/a/a_test.go"),
            root.join("pkg/b/deep/er/b.go"),
        ]
    );
    assert!(discovery.errors.is_empty());
}

#[test]
fn test_vendor_under_root_is_skipped() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("vendor/github.com/x/y/y.go"));
    touch(&root.join("vendorlike/v.go"));
    touch(&root.join("pkg/vendor/nested.go"));

    let discovery = Walker::new(settings_for(root)).discover().unwrap();

    // only the vendor directory directly under the root is special
    assert_eq!(
        discovery.files,
        vec![root.join("pkg/vendor/nested.go"), root.join("vendorlike/v.go")]
    );
}

#[test]
fn test_custom_vendor_dir() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("third_party/dep.go"));
    touch(&root.join("vendor/kept.go"));

    let settings = Settings {
        vendor_dir: "third_party".to_string(),
        ..settings_for(root)
    };
    let discovery = Walker::new(settings).discover().unwrap();

    assert_eq!(discovery.files, vec![root.join("vendor/kept.go")]);
}

#[test]
fn test_exclude_patterns() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("api/api.go"));
    touch(&root.join("api/api_gen.go"));
    touch(&root.join("testdata/fixture.go"));
    touch(&root.join("internal/testdata/other.go"));

    let settings = Settings {
        exclude_patterns: vec!["testdata".to_string(), "*_gen.go".to_string()],
        ..settings_for(root)
    };
    let discovery = Walker::new(settings).discover().unwrap();

    assert_eq!(discovery.files, vec![root.join("api/api.go")]);
}

#[test]
fn test_single_file_root() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("solo.go");
    touch(&file);
    touch(&dir.path().join("other.go"));

    let discovery = Walker::new(settings_for(&file)).discover().unwrap();
    assert_eq!(discovery.files, vec![file]);
}

#[test]
fn test_missing_root() {
    let dir = tempdir().unwrap();
    let err = Walker::new(settings_for(&dir.path().join("nope")))
        .discover()
        .unwrap_err();
    assert!(matches!(err, InstablError::InvalidRoot { .. }));
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_does_not_abort() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("ok/ok.go"));
    touch(&root.join("locked/hidden.go"));

    let locked = root.join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let discovery = Walker::new(settings_for(root)).discover();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let discovery = discovery.unwrap();
    assert!(discovery.files.contains(&root.join("ok/ok.go")));

    // root can read anything, so only assert on the error when access was refused
    if !discovery.files.contains(&root.join("locked/hidden.go")) {
        assert_eq!(discovery.errors.len(), 1);
        assert_eq!(discovery.errors[0].1.severity(), instabl::ErrorSeverity::Warning);
    }
}
