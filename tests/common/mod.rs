// Shared fixtures for the integration tests.
#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::PathBuf;
use tokenweave::source::{FileSource, MemorySource};
use tokenweave::{analyze, Analysis, Layer};

pub fn fixture_path(file_name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(file_name)
}

/// The three checked-in layer snapshots.
pub fn fixture_source() -> FileSource {
    FileSource::default()
        .with_path(Layer::Primitive, fixture_path("tokens.primitive.json"))
        .with_path(Layer::Semantic, fixture_path("tokens.semantic.json"))
        .with_path(Layer::Component, fixture_path("tokens.components.json"))
}

pub fn fixture_analysis() -> Analysis {
    analyze(&fixture_source()).unwrap_or_else(|err| panic!("{:?}", miette::Report::from(err)))
}

/// A single-mode collection entry.
pub fn collection(name: &str, mode: &str) -> Value {
    json!({ "name": name, "defaultModeId": mode, "modes": [{ "modeId": mode, "name": "Default" }] })
}

pub fn variable(name: &str, collection_id: &str, mode: &str, value: Value) -> Value {
    json!({
        "name": name,
        "variableCollectionId": collection_id,
        "resolvedType": "COLOR",
        "valuesByMode": { mode: value }
    })
}

pub fn alias(id: &str) -> Value {
    json!({ "type": "VARIABLE_ALIAS", "id": id })
}

pub fn rgb(r: f64, g: f64, b: f64) -> Value {
    json!({ "r": r, "g": g, "b": b, "a": 1.0 })
}

pub fn snapshot(collections: Value, variables: Value) -> String {
    json!({ "meta": { "variableCollections": collections, "variables": variables } }).to_string()
}

pub fn memory(layers: &[(Layer, String)]) -> MemorySource {
    layers
        .iter()
        .fold(MemorySource::new(), |source, (layer, text)| {
            source.with_layer(*layer, format!("tokens.{layer}.json"), text.clone())
        })
}

pub fn analysis_of(layers: &[(Layer, String)]) -> Analysis {
    analyze(&memory(layers)).unwrap_or_else(|err| panic!("{:?}", miette::Report::from(err)))
}
