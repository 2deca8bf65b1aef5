//! Report artifacts written to disk.

use std::fs;
use std::path::Path;

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

use latte_config::Config;
use latte_oac::{analyze_dump, overlay_path, Analyzer, Oac, ReportError, ReportWriter};

const DUMP: &str = r#"<hierarchy>
  <node class="android.widget.FrameLayout" package="com.app" bounds="[0,0][100,100]">
    <node class="android.widget.TextView" package="com.app" text="A" drawing-order="1" bounds="[0,0][100,50]" />
    <node class="android.widget.TextView" package="com.app" text="B" drawing-order="2" bounds="[0,0][100,100]" />
  </node>
</hierarchy>"#;

fn screenshot(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("screen.png");
    RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]))
        .save(&path)
        .unwrap();
    path
}

#[test]
fn writes_report_counts_and_overlays() {
    let dir = TempDir::new().unwrap();
    let shot = screenshot(dir.path());
    let out = dir.path().join("out");

    let (analysis, written) = analyze_dump(DUMP, "com.app", Some(&shot), &out, &Config::default());
    let written = written.unwrap();

    let report = fs::read_to_string(written.report.as_ref().unwrap()).unwrap();
    assert_eq!(report.lines().count(), analysis.report.flagged_count());
    assert!(report.contains("\"OACs\":[\"P3_covered\",\"A1_pinvisible\"]"));

    let counts: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(written.counts.as_ref().unwrap()).unwrap())
            .unwrap();
    assert_eq!(counts["P3_covered"], 1);
    assert_eq!(counts["O_ad"], 0);

    assert_eq!(written.overlays.len(), Oac::ALL.len() + 1);
    assert!(overlay_path(&shot, "P3_covered", true).exists());
    assert!(overlay_path(&shot, "all", true).exists());
    assert!(overlay_path(&shot, "O_ad", false).exists());

    let painted = image::open(overlay_path(&shot, "P3_covered", true))
        .unwrap()
        .to_rgba8();
    assert_eq!(*painted.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
}

#[test]
fn empty_tree_writes_no_overlays() {
    let dir = TempDir::new().unwrap();
    let shot = screenshot(dir.path());
    let out = dir.path().join("out");

    let (analysis, written) = analyze_dump("garbage", "com.app", Some(&shot), &out, &Config::default());
    let written = written.unwrap();

    assert!(analysis.tree.is_empty());
    assert!(written.overlays.is_empty());
    assert_eq!(fs::read_to_string(written.report.unwrap()).unwrap(), "");
    let counts: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(written.counts.unwrap()).unwrap()).unwrap();
    assert!(counts.as_object().unwrap().values().all(|v| v == 0));
}

#[test]
fn missing_screenshot_is_partial_failure() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let missing = dir.path().join("nope.png");

    let analysis = Analyzer::default().analyze(DUMP, "com.app");
    let err = ReportWriter::new(&out)
        .write(&analysis.tree, &analysis.report, Some(&missing))
        .unwrap_err();

    match err {
        ReportError::Partial { written, failures } => {
            assert_eq!(written.len(), 2);
            assert_eq!(failures.len(), 1);
            assert!(matches!(failures[0], ReportError::Image { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(analysis.report.count(Oac::P3Covered), 1);
    assert!(out.join("oacs.jsonl").exists());
}

#[test]
fn overlays_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let shot = screenshot(dir.path());
    let analysis = Analyzer::default().analyze(DUMP, "com.app");

    let written = ReportWriter::new(dir.path().join("out"))
        .with_overlays(false)
        .write(&analysis.tree, &analysis.report, Some(&shot))
        .unwrap();
    assert!(written.overlays.is_empty());
    assert!(!overlay_path(&shot, "all", true).exists());
}
