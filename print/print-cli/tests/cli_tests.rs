//! Tests that run the `printquote` binary end to end.
//!
//! To run: cargo test -p print-cli --test cli_tests

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::process::{Command, Output};

use mesh_io::{StlEncoding, encode_stl};
use mesh_types::cube;
use tempfile::TempDir;

fn printquote(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_printquote"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run printquote")
}

fn write_cube(dir: &Path, name: &str, edge: f64, encoding: StlEncoding) -> String {
    let path = dir.join(name);
    std::fs::write(&path, encode_stl(&cube(edge), encoding).unwrap()).unwrap();
    path.display().to_string()
}

fn json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
}

#[test]
fn inspect_reports_encoding_and_count() {
    let dir = TempDir::new().unwrap();
    let path = write_cube(dir.path(), "part.stl", 10.0, StlEncoding::Ascii);

    let v = json(&printquote(&["--output", "json", "inspect", &path]));
    assert_eq!(v["format"], "STL");
    assert_eq!(v["isAscii"], true);
    assert_eq!(v["estimatedTriangles"], 12);
}

#[test]
fn analyze_ten_mm_cube() {
    let dir = TempDir::new().unwrap();
    let path = write_cube(dir.path(), "part.stl", 10.0, StlEncoding::Binary);

    let v = json(&printquote(&["--output", "json", "analyze", &path]));
    assert_eq!(v["triangleCount"], 12);
    assert_eq!(v["estimatedPrintTimeMinutes"], 2);
    assert_eq!(v["quality"], "measured");
    let volume = v["volumeCm3"].as_f64().unwrap();
    assert!((volume - 1.0).abs() < 1e-6);
}

#[test]
fn quote_small_part_pays_minimum() {
    let dir = TempDir::new().unwrap();
    let path = write_cube(dir.path(), "part.stl", 10.0, StlEncoding::Binary);

    let v = json(&printquote(&["--output", "json", "quote", &path]));
    assert_eq!(v["cost"]["total"], 10.0);
    assert_eq!(v["cost"]["minimumChargeApplied"], true);
    assert_eq!(v["buildVolume"]["exceeds"], false);
}

#[test]
fn quote_rejects_oversized_unless_allowed() {
    let dir = TempDir::new().unwrap();
    let path = write_cube(dir.path(), "big.stl", 300.0, StlEncoding::Binary);

    let out = printquote(&["quote", &path]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("File exceeds build volume"), "stderr: {stderr}");

    let v = json(&printquote(&["--output", "json", "quote", &path, "--allow-oversized"]));
    assert_eq!(v["buildVolume"]["exceeds"], true);
}

#[test]
fn quote_with_settings_document() {
    let dir = TempDir::new().unwrap();
    let path = write_cube(dir.path(), "part.stl", 10.0, StlEncoding::Binary);

    let defaults = json(&printquote(&["--output", "json", "settings"]));
    let mut doc = defaults.clone();
    doc["minimumCharge"] = serde_json::json!(25.0);
    let settings_path = dir.path().join("shop.json");
    std::fs::write(&settings_path, doc.to_string()).unwrap();
    let settings_arg = settings_path.display().to_string();

    let v = json(&printquote(&[
        "--output",
        "json",
        "quote",
        &path,
        "--settings",
        &settings_arg,
    ]));
    assert_eq!(v["cost"]["total"], 25.0);
}

#[test]
fn unknown_extension_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("part.step");
    std::fs::write(&path, b"ISO-10303-21;").unwrap();

    let out = printquote(&["analyze", &path.display().to_string()]);
    assert!(!out.status.success());
}

#[test]
fn unimplemented_format_message() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("part.3mf");
    std::fs::write(&path, b"PK\x03\x04").unwrap();

    let out = printquote(&["analyze", &path.display().to_string()]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("format not yet supported"), "stderr: {stderr}");
}
