mod common;

use common::{fixture_analysis, fixture_source};
use std::fs;
use tokenweave::config::OutputConfig;
use tokenweave::source::{FileSource, MemorySource};
use tokenweave::{analyze, Layer};

#[test]
fn test_runs_are_deterministic() {
    let first = fixture_analysis();
    let second = analyze(&fixture_source()).unwrap();

    assert_eq!(first.to_css(), second.to_css());
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    assert_eq!(first.to_yaml().unwrap(), second.to_yaml().unwrap());
    assert_eq!(first.to_w3c(), second.to_w3c());
}

#[test]
fn test_emitting_twice_gives_the_same_text() {
    let analysis = fixture_analysis();
    assert_eq!(analysis.to_css(), analysis.to_css());
    assert_eq!(analysis.to_json().unwrap(), analysis.to_json().unwrap());
}

#[test]
fn test_analysis_serializes_as_the_docs_model() {
    let analysis = fixture_analysis();
    let direct = serde_json::to_value(&analysis).unwrap();
    let docs = serde_json::to_value(analysis.docs()).unwrap();
    assert_eq!(direct, docs);
}

#[test]
fn test_write_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let output = OutputConfig {
        css: dir.path().join("styles/tokens.css"),
        docs: dir.path().join("docs/tokens-data.json"),
        w3c_dir: dir.path().join("dist"),
    };
    let analysis = fixture_analysis();

    let written = analysis.write_artifacts(&output).unwrap();
    assert_eq!(
        written,
        vec![
            output.css.clone(),
            output.docs.clone(),
            output.w3c_dir.join("tokens.primitive.w3c.json"),
            output.w3c_dir.join("tokens.semantic.w3c.json"),
            output.w3c_dir.join("tokens.components.w3c.json"),
        ]
    );

    assert_eq!(fs::read_to_string(&output.css).unwrap(), analysis.to_css());
    let docs: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output.docs).unwrap()).unwrap();
    assert_eq!(docs, serde_json::to_value(&analysis).unwrap());

    let semantic: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(output.w3c_dir.join("tokens.semantic.w3c.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(semantic["primary"]["$value"], "{base.blue}");

    // No temporary files are left next to the artifacts.
    let leftovers: Vec<_> = fs::read_dir(dir.path().join("styles")).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}

#[test]
fn test_rewriting_replaces_previous_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let output = OutputConfig {
        css: dir.path().join("tokens.css"),
        docs: dir.path().join("tokens-data.json"),
        w3c_dir: dir.path().to_path_buf(),
    };
    fs::write(&output.css, "stale").unwrap();

    fixture_analysis().write_artifacts(&output).unwrap();
    let css = fs::read_to_string(&output.css).unwrap();
    assert!(css.starts_with("/**"));
    assert!(!css.contains("stale"));
}

#[test]
fn test_only_loaded_layers_get_w3c_files() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileSource::default().with_path(
        Layer::Primitive,
        common::fixture_path("tokens.primitive.json"),
    );
    let analysis = analyze(&source).unwrap();
    let output = OutputConfig {
        css: dir.path().join("tokens.css"),
        docs: dir.path().join("tokens-data.json"),
        w3c_dir: dir.path().join("dist"),
    };

    let written = analysis.write_artifacts(&output).unwrap();
    assert_eq!(written.len(), 3);
    assert!(output.w3c_dir.join("tokens.primitive.w3c.json").exists());
    assert!(!output.w3c_dir.join("tokens.semantic.w3c.json").exists());
}

#[test]
fn test_empty_source_gives_an_empty_stylesheet() {
    let analysis = analyze(&MemorySource::new()).unwrap();
    assert!(analysis.to_css().ends_with(":root {\n}\n"));
    assert!(analysis.to_w3c().is_empty());

    let docs: serde_json::Value = serde_json::from_str(&analysis.to_json().unwrap()).unwrap();
    assert_eq!(docs["order"], serde_json::json!([]));
    assert_eq!(docs["allVariables"], serde_json::json!({}));
}
