//! Integration tests for the `kiln` binary

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper function to get the path to the kiln binary
fn kiln_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test executable name
    path.pop(); // Remove "deps"
    path.push("kiln");
    path
}

/// Helper function to create a test file
fn create_test_file(
    dir: &TempDir,
    name: &str,
    content: &str,
) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(kiln_bin())
        .args(args)
        .output()
        .expect("Failed to execute kiln")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// `if(c){return a;}else{return b;}`
const RETURNS: &str = r#"{
  "type": "script",
  "children": [
    { "type": "if", "children": [
      { "type": "identifier", "rel": "condition", "value": "c" },
      { "type": "block", "rel": "thenPart", "children": [
        { "type": "return", "children": [ { "type": "identifier", "rel": "value", "value": "a" } ] }
      ] },
      { "type": "block", "rel": "elsePart", "children": [
        { "type": "return", "children": [ { "type": "identifier", "rel": "value", "value": "b" } ] }
      ] }
    ] }
  ]
}"#;

/// `if` without a then-part.
const BROKEN: &str = r#"{
  "type": "script",
  "children": [
    { "type": "if", "children": [ { "type": "identifier", "rel": "condition", "value": "c" } ] }
  ]
}"#;

const MANIFEST: &str = r#"
[project]
name = "site"
detectors = ["core.detect.Locale"]

[fields.locale]
check = ["en", "de"]
detect = "core.detect.Locale"

[fields.debug]
check = "Boolean"

[build]
prefix = "site"

[build.permutate.locale]
[build.permutate.debug]
"#;

#[test]
fn test_optimize_prints_source() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "unit.json", RETURNS);

    let output = run(&["optimize", file.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "return c?a:b;");
}

#[test]
fn test_optimize_json_output() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "unit.json", RETURNS);

    let output = run(&["optimize", file.to_str().unwrap(), "--json"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("\"hook\""));
    assert!(!text.contains("\"if\""));
}

#[test]
fn test_optimize_invalid_tree_fails() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "unit.json", BROKEN);

    let output = run(&["optimize", file.to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn test_permutations_lists_hashes() {
    let dir = TempDir::new().unwrap();
    create_test_file(&dir, "kiln.toml", MANIFEST);

    let output = run(&["permutations", dir.path().to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].ends_with(r#"debug=true, locale="en""#));
    assert!(lines[3].ends_with(r#"debug=false, locale="de""#));
}

#[test]
fn test_export_prints_table() {
    let dir = TempDir::new().unwrap();
    create_test_file(&dir, "kiln.toml", MANIFEST);

    let output = run(&["export", dir.path().to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        r#"[['debug',2,true],['locale',1,core.detect.Locale,["en","de"]]]"#
    );
}

#[test]
fn test_export_without_project_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(&["export", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("kiln.toml"));
}

#[test]
fn test_build_reports_failed_units() {
    let dir = TempDir::new().unwrap();
    create_test_file(&dir, "kiln.toml", MANIFEST);
    let good = create_test_file(&dir, "units/good.json", RETURNS);
    let bad = create_test_file(&dir, "units/bad.json", BROKEN);

    let output = run(&[
        "build",
        dir.path().to_str().unwrap(),
        "--unit",
        good.to_str().unwrap(),
        "--unit",
        bad.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let text = stdout(&output);
    assert_eq!(text.matches("site-").count(), 4);
    assert_eq!(text.matches("  ok    ").count(), 4);
    assert_eq!(text.matches("  fail  ").count(), 4);
}
