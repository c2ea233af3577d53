//! End-to-end analysis of small Go source trees laid out under a GOPATH-style
//! source root: `<tmp>/src/example.com/proj/...`.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};
use instabl::{
    core::Analyzer,
    models::{config::Settings, StabilityRecord},
    output::format_stats_text,
    PackageId,
};

struct Workspace {
    _dir: TempDir,
    base: PathBuf,
    source_root: PathBuf,
    root: PathBuf,
}

fn workspace() -> Workspace {
    let dir = tempdir().unwrap();
    let base = dir.path().to_path_buf();
    let source_root = base.join("src");
    let root = source_root.join("example.com").join("proj");
    fs::create_dir_all(&root).unwrap();
    Workspace {
        _dir: dir,
        base,
        source_root,
        root,
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn settings(ws: &Workspace) -> Settings {
    Settings {
        root: ws.root.clone(),
        source_root: Some(ws.source_root.clone()),
        ..Default::default()
    }
}

fn analyze(ws: &Workspace, settings: Settings) -> instabl::Analysis {
    Analyzer::with_base_dir(settings, &ws.base)
        .unwrap()
        .analyze()
        .unwrap()
}

fn id(s: &str) -> PackageId {
    PackageId::from(s)
}

fn record(fan_in: u64, fan_out: u64) -> StabilityRecord {
    StabilityRecord { fan_in, fan_out }
}

#[test]
fn test_two_package_scenario() {
    let ws = workspace();
    write(&ws.root.join("a/a.go"), "package a\n\nfunc A() {}\n");
    write(
        &ws.root.join("b/b.go"),
        "package b\n\nimport (\n\t\"example.com/proj/a\"\n\t\"github.com/pkg/errors\"\n)\n",
    );

    let analysis = analyze(&ws, settings(&ws));

    // a has no imports at all, so only b's edge creates its record
    assert_eq!(analysis.stats.len(), 2);
    assert_eq!(analysis.stats.get(&id("example.com/proj/a")), Some(&record(1, 0)));
    assert_eq!(analysis.stats.get(&id("example.com/proj/b")), Some(&record(0, 1)));

    assert_eq!(
        format_stats_text(&analysis.stats),
        "0.00\texample.com/proj/a\n1.00\texample.com/proj/b\n"
    );
}

#[test]
fn test_external_imports_only_create_owner_record() {
    let ws = workspace();
    write(
        &ws.root.join("cmd/main.go"),
        "package main\n\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n",
    );

    let analysis = analyze(&ws, settings(&ws));

    assert_eq!(analysis.stats.len(), 1);
    assert_eq!(analysis.stats.get(&id("example.com/proj/cmd")), Some(&record(0, 0)));
    assert_eq!(format_stats_text(&analysis.stats), "0.00\texample.com/proj/cmd\n");
}

#[test]
fn test_duplicate_imports_counted_as_written() {
    let ws = workspace();
    write(
        &ws.root.join("a/a.go"),
        "package a\n\nimport \"example.com/proj/b\"\n",
    );
    write(
        &ws.root.join("a/a2.go"),
        "package a\n\nimport b2 \"example.com/proj/b\"\n",
    );

    let analysis = analyze(&ws, settings(&ws));

    assert_eq!(analysis.stats.get(&id("example.com/proj/a")), Some(&record(0, 2)));
    assert_eq!(analysis.stats.get(&id("example.com/proj/b")), Some(&record(2, 0)));
}

#[test]
fn test_self_import_counts_both_ways() {
    let ws = workspace();
    write(
        &ws.root.join("a/a.go"),
        "package a\n\nimport \"example.com/proj/a\"\n",
    );

    let analysis = analyze(&ws, settings(&ws));
    assert_eq!(analysis.stats.get(&id("example.com/proj/a")), Some(&record(1, 1)));
}

#[test]
fn test_substring_namespace_match_is_local() {
    let ws = workspace();
    write(
        &ws.root.join("a/a.go"),
        "package a\n\nimport \"mirror.io/example.com/thing\"\n",
    );

    let analysis = analyze(&ws, settings(&ws));

    assert_eq!(analysis.stats.get(&id("example.com/proj/a")), Some(&record(0, 1)));
    assert_eq!(
        analysis.stats.get(&id("mirror.io/example.com/thing")),
        Some(&record(1, 0))
    );
}

#[test]
fn test_parse_failure_does_not_stop_analysis() {
    let ws = workspace();
    write(&ws.root.join("broken/broken.go"), "package broken\n\nfunc (((\n");
    write(
        &ws.root.join("ok/ok.go"),
        "package ok\n\nimport \"example.com/proj/lib\"\n",
    );

    let analysis = analyze(&ws, settings(&ws));

    assert_eq!(analysis.summary.files_discovered, 2);
    assert_eq!(analysis.stats.get(&id("example.com/proj/ok")), Some(&record(0, 1)));
    assert_eq!(analysis.stats.get(&id("example.com/proj/lib")), Some(&record(1, 0)));
    assert!(analysis.stats.get(&id("example.com/proj/broken")).is_none());
}

#[test]
fn test_latin1_comment_keeps_imports() {
    let ws = workspace();
    write(&ws.root.join("a/a.go"), "package a\n");
    fs::create_dir_all(ws.root.join("b")).unwrap();
    fs::write(
        ws.root.join("b/b.go"),
        b"package b\n// caf\xe9 au lait\nimport \"example.com/proj/a\"\n",
    )
    .unwrap();

    let analysis = analyze(&ws, settings(&ws));

    assert_eq!(analysis.summary.files_failed, 0);
    assert_eq!(analysis.summary.files_with_syntax_errors, 1);
    assert_eq!(analysis.stats.len(), 2);
    assert_eq!(analysis.stats.get(&id("example.com/proj/b")), Some(&record(0, 1)));
    assert_eq!(analysis.stats.get(&id("example.com/proj/a")), Some(&record(1, 0)));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let ws = workspace();
    write(&ws.root.join("a/a.go"), "package a\n\nimport \"fmt\"\n");
    let locked = ws.root.join("b/b.go");
    write(&locked, "package b\n\nimport \"os\"\n");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // root ignores file modes; nothing to check then
    if fs::read(&locked).is_ok() {
        return;
    }

    let analysis = analyze(&ws, settings(&ws));

    assert_eq!(analysis.summary.files_failed, 1);
    assert_eq!(analysis.stats.len(), 1);
    assert!(analysis.stats.get(&id("example.com/proj/a")).is_some());
}

#[test]
fn test_vendor_subtree_never_walked() {
    let ws = workspace();
    write(
        &ws.root.join("vendor/github.com/dep/dep.go"),
        "package dep\n\nimport \"example.com/proj/core\"\n",
    );
    write(&ws.root.join("core/core.go"), "package core\n\nimport \"strings\"\n");

    let analysis = analyze(&ws, settings(&ws));

    assert_eq!(analysis.summary.files_discovered, 1);
    assert_eq!(analysis.stats.get(&id("example.com/proj/core")), Some(&record(0, 0)));
}

#[test]
fn test_single_file_root() {
    let ws = workspace();
    let file = ws.root.join("tool/main.go");
    write(&file, "package main\n\nimport \"example.com/proj/lib\"\n");

    let mut s = settings(&ws);
    s.root = file;
    s.namespace = Some("example.com".to_string());

    let analysis = analyze(&ws, s);
    assert_eq!(analysis.stats.get(&id("example.com/proj/tool")), Some(&record(0, 1)));
}

#[test]
fn test_relative_source_root_resolves_against_base_dir() {
    let ws = workspace();
    write(
        &ws.root.join("a/a.go"),
        "package a\n\nimport \"example.com/proj/b\"\n",
    );

    let s = Settings {
        source_root: Some(PathBuf::from("src")),
        ..settings(&ws)
    };

    let analysis = analyze(&ws, s);
    assert_eq!(analysis.stats.get(&id("example.com/proj/a")), Some(&record(0, 1)));
}

#[test]
fn test_analysis_is_deterministic() {
    let ws = workspace();
    for (pkg, deps) in [
        ("api", vec!["model", "store"]),
        ("store", vec!["model"]),
        ("model", vec![]),
        ("cli", vec!["api", "model"]),
    ] {
        let imports: String = deps
            .iter()
            .map(|d| format!("\t\"example.com/proj/{}\"\n", d))
            .chain(std::iter::once("\t\"fmt\"\n".to_string()))
            .collect();
        write(
            &ws.root.join(pkg).join(format!("{}.go", pkg)),
            &format!("package {}\n\nimport (\n{})\n", pkg, imports),
        );
    }

    let first = analyze(&ws, settings(&ws));
    let second = analyze(&ws, Settings { parallel: false, ..settings(&ws) });

    assert_eq!(first.stats, second.stats);
    assert_eq!(format_stats_text(&first.stats), format_stats_text(&second.stats));
    assert_eq!(
        format_stats_text(&first.stats),
        "0.00\texample.com/proj/model\n\
         0.50\texample.com/proj/store\n\
         0.67\texample.com/proj/api\n\
         1.00\texample.com/proj/cli\n"
    );
}
