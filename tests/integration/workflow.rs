//! End-to-end tests through the public API: manifest → session → pipeline

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use kiln::build::{Pipeline, Unit};
use kiln::permutation::{ExportRecord, FieldValue};
use kiln::project::{Workspace, MANIFEST_FILE};
use kiln::syntax::SyntaxTree;

const FRAMEWORK: &str = r#"
[project]
name = "framework"
detectors = ["core.detect.Locale"]

[fields.locale]
check = ["en", "de", "fr"]
detect = "core.detect.Locale"
default = "de"

[fields.debug]
check = "Boolean"
default = false
"#;

const APP: &str = r#"
[project]
name = "app"
include = ["../framework"]

[fields."app.theme"]
check = "String"
default = "light"

[build]
prefix = "app"
passes = 4

[build.set]
debug = false

[build.permutate.locale]
values = ["en", "de"]

[build.permutate."app.theme"]
values = ["light", "dark"]
"#;

fn write_project(
    root: &Path,
    name: &str,
    manifest: &str,
) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(MANIFEST_FILE), manifest).unwrap();
}

fn workspace() -> (TempDir, Workspace) {
    let tmp = TempDir::new().unwrap();
    write_project(tmp.path(), "framework", FRAMEWORK);
    write_project(tmp.path(), "app", APP);
    let workspace = Workspace::load(&tmp.path().join("app")).unwrap();
    (tmp, workspace)
}

/// `if(a){f();}else{g();}` as a JSON document.
const UNIT: &str = r#"{
  "type": "script",
  "children": [
    {
      "type": "if",
      "children": [
        { "type": "identifier", "rel": "condition", "value": "a" },
        { "type": "block", "rel": "thenPart", "children": [
          { "type": "semicolon", "children": [
            { "type": "call", "rel": "expression", "children": [
              { "type": "identifier", "value": "f" },
              { "type": "list" }
            ] }
          ] }
        ] },
        { "type": "block", "rel": "elsePart", "children": [
          { "type": "semicolon", "children": [
            { "type": "call", "rel": "expression", "children": [
              { "type": "identifier", "value": "g" },
              { "type": "list" }
            ] }
          ] }
        ] }
      ]
    }
  ]
}"#;

#[test]
fn test_session_from_manifests() {
    let (_tmp, workspace) = workspace();
    let session = workspace.session().unwrap();

    assert_eq!(session.scopes(), ["framework".to_string(), "app".to_string()]);
    let keys: Vec<String> = session.permutations().iter().map(|p| p.key()).collect();
    assert_eq!(
        keys,
        vec![
            r#"app.theme:"light";debug:false;locale:"en""#,
            r#"app.theme:"light";debug:false;locale:"de""#,
            r#"app.theme:"dark";debug:false;locale:"en""#,
            r#"app.theme:"dark";debug:false;locale:"de""#,
        ]
    );
}

#[test]
fn test_export_from_manifests() {
    let (_tmp, workspace) = workspace();
    let table = workspace.session().unwrap().export_fields().unwrap();

    assert_eq!(
        table.get("locale"),
        Some(&ExportRecord::Variable {
            name: "locale".to_string(),
            detect: "core.detect.Locale".to_string(),
            values: vec![FieldValue::from("de"), FieldValue::from("en")],
        })
    );
    assert_eq!(
        table.to_js(),
        r#"[['app.theme',2,"light"],['debug',2,false],['locale',1,core.detect.Locale,["de","en"]]]"#
    );
}

#[test]
fn test_pipeline_from_workspace() {
    let (_tmp, workspace) = workspace();
    let pipeline = Pipeline::from_workspace(&workspace).unwrap();
    let tree = SyntaxTree::from_json(UNIT).unwrap();

    let artifacts = pipeline.run(&[Unit::new("main.js", tree)]);
    assert_eq!(artifacts.len(), 4);

    for artifact in &artifacts {
        assert!(artifact.name.starts_with("app-"));
        artifact.ensure_success().unwrap();
        let output = artifact.unit("main.js").unwrap().output().unwrap();
        assert_eq!(output.tree.to_source(), "a?f():g();");
    }

    let mut names: Vec<&str> = artifacts.iter().map(|a| a.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 4);
}
