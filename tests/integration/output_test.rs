//! Report rendering over real analysis results

use std::fs;
use tempfile::tempdir;
use instabl::{
    core::Analyzer,
    models::{config::Settings, OutputFormat},
    output::{create_formatter, create_writer},
};

fn analyzed_fixture() -> (tempfile::TempDir, instabl::Analysis) {
    let dir = tempdir().unwrap();
    let source_root = dir.path().join("src");
    let root = source_root.join("example.com/proj");

    for (pkg, body) in [
        ("a", "package a\n"),
        (
            "b",
            "package b\n\nimport (\n\t\"example.com/proj/a\"\n\t\"net/http\"\n)\n",
        ),
        ("c", "package c\n\nimport \"example.com/proj/b\"\n"),
    ] {
        let path = root.join(pkg).join(format!("{}.go", pkg));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    let settings = Settings {
        root,
        source_root: Some(source_root),
        ..Default::default()
    };
    let analysis = Analyzer::with_base_dir(settings, dir.path())
        .unwrap()
        .analyze()
        .unwrap();
    (dir, analysis)
}

#[test]
fn test_text_output() {
    let (_dir, analysis) = analyzed_fixture();
    let text = create_formatter(OutputFormat::Text)
        .format(&analysis.stats)
        .unwrap();

    assert_eq!(
        text,
        "0.00\texample.com/proj/a\n0.50\texample.com/proj/b\n1.00\texample.com/proj/c\n"
    );
}

#[test]
fn test_json_output() {
    let (_dir, analysis) = analyzed_fixture();
    let json = create_formatter(OutputFormat::Json)
        .format(&analysis.stats)
        .unwrap();
    let rows: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();

    let packages: Vec<&str> = rows.iter().map(|r| r["package"].as_str().unwrap()).collect();
    assert_eq!(
        packages,
        vec!["example.com/proj/a", "example.com/proj/b", "example.com/proj/c"]
    );
    assert_eq!(rows[1]["fan_in"], 1);
    assert_eq!(rows[1]["fan_out"], 1);
    assert_eq!(rows[1]["instability"], 0.5);
}

#[test]
fn test_csv_output_to_file() {
    let (dir, analysis) = analyzed_fixture();
    let out = dir.path().join("report.csv");

    let csv = create_formatter(OutputFormat::Csv)
        .format(&analysis.stats)
        .unwrap();
    create_writer(Some(&out)).write(&csv).unwrap();

    let written = fs::read_to_string(&out).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("instability,package,fan_in,fan_out"));
    assert_eq!(lines.next(), Some("0.00,example.com/proj/a,1,0"));
    assert_eq!(lines.count(), 2);
}
