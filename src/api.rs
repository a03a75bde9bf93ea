use log::info;
use serde::{Serialize, Serializer};
use std::path::PathBuf;

use crate::canonical::{build_canonical, CanonicalIndex};
use crate::config::OutputConfig;
use crate::emit::{self, docs_model, w3c_documents, w3c_file_name, DocsModel, TokenTree};
use crate::error::{EmitError, TokenError};
use crate::model::{FlatId, Layer, Variable};
use crate::resolver::{Resolution, Resolver};
use crate::source::SnapshotSource;
use crate::store::VariableStore;
use crate::utils::short_id;

/// The outcome of one pipeline run: the loaded store and its canonical index.
///
/// Every artifact is derived from these two on demand, so emitting the same artifact
/// twice yields the same text.
#[derive(Debug)]
pub struct Analysis {
    store: VariableStore,
    canonical: CanonicalIndex,
}

impl Serialize for Analysis {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.docs().serialize(serializer)
    }
}

impl Analysis {
    pub fn from_store(store: VariableStore) -> Self {
        let canonical = build_canonical(&store);
        Analysis { store, canonical }
    }

    pub fn store(&self) -> &VariableStore {
        &self.store
    }

    pub fn canonical(&self) -> &CanonicalIndex {
        &self.canonical
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.store, &self.canonical)
    }

    /// Finds a variable by short id, long id, flat id or custom-property name.
    #[must_use]
    pub fn find(&self, token: &str) -> Option<&Variable> {
        self.store
            .get(token)
            .or_else(|| self.store.get(&short_id(token)))
            .or_else(|| {
                let flat_id = FlatId::new(token.trim_start_matches("--"));
                self.canonical.owner_variable(&self.store, &flat_id)
            })
    }

    /// Resolves `token` (see [`Analysis::find`]) in `mode`, given as a mode id or a mode name
    /// of the token's collection.
    #[must_use]
    pub fn resolve(&self, token: &str, mode: Option<&str>) -> Option<Resolution> {
        let variable = self.find(token)?;
        let mode = mode.map(|mode| self.mode_id(variable, mode).unwrap_or(mode));
        Some(self.resolver().resolve(variable, mode))
    }

    fn mode_id<'s>(&'s self, variable: &Variable, mode: &str) -> Option<&'s str> {
        self.store
            .collection_of(variable)?
            .modes
            .iter()
            .find(|candidate| candidate.mode_id == mode || candidate.name.eq_ignore_ascii_case(mode))
            .map(|candidate| candidate.mode_id.as_str())
    }

    /// The CSS custom-property stylesheet.
    #[must_use]
    pub fn to_css(&self) -> String {
        emit::to_css(&self.store, &self.canonical)
    }

    /// The documentation lookup tables.
    #[must_use]
    pub fn docs(&self) -> DocsModel<'_> {
        docs_model(&self.store, &self.canonical)
    }

    /// Serializes the documentation tables into a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns an `EmitError` if serialization fails.
    pub fn to_json(&self) -> Result<String, EmitError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    /// Serializes the documentation tables into a YAML string.
    ///
    /// # Errors
    /// Returns an `EmitError` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, EmitError> {
        Ok(serde_yaml::to_string(&self)?)
    }

    /// The W3C token tree of every loaded layer.
    #[must_use]
    pub fn to_w3c(&self) -> Vec<(Layer, TokenTree)> {
        w3c_documents(&self.store)
    }

    /// Writes the stylesheet, the documentation JSON and one W3C file per layer.
    ///
    /// # Errors
    /// Returns an `EmitError` if an artifact cannot be serialized or written. Artifacts
    /// written before the failure are complete.
    pub fn write_artifacts(&self, output: &OutputConfig) -> Result<Vec<PathBuf>, EmitError> {
        let mut written = Vec::new();

        emit::write_atomic(&output.css, &self.to_css())?;
        written.push(output.css.clone());

        let mut docs = self.to_json()?;
        docs.push('\n');
        emit::write_atomic(&output.docs, &docs)?;
        written.push(output.docs.clone());

        for (layer, tree) in self.to_w3c() {
            let path = output.w3c_dir.join(w3c_file_name(layer));
            let mut json = serde_json::to_string_pretty(&tree)?;
            json.push('\n');
            emit::write_atomic(&path, &json)?;
            written.push(path);
        }

        for path in &written {
            info!("wrote {}", path.display());
        }
        Ok(written)
    }
}

/// Loads every layer from `source`, builds the canonical index and returns the result.
///
/// This is the primary entry point for processing a token snapshot.
///
/// # Errors
///
/// Returns a `TokenError` if a snapshot exists but cannot be read or parsed. Absent layers
/// are skipped with a warning.
pub fn analyze(source: &dyn SnapshotSource) -> Result<Analysis, TokenError> {
    let store = VariableStore::load(source)?;
    Ok(Analysis::from_store(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    const PRIMITIVE: &str = r#"{
        "meta": {
            "variableCollections": {
                "VariableCollectionId:1:0": {
                    "name": "Colors",
                    "defaultModeId": "1:0",
                    "modes": [{ "modeId": "1:0", "name": "Value" }]
                }
            },
            "variables": {
                "VariableID:1:1": {
                    "name": "base/red",
                    "variableCollectionId": "VariableCollectionId:1:0",
                    "resolvedType": "COLOR",
                    "valuesByMode": { "1:0": { "r": 1, "g": 0, "b": 0, "a": 1 } }
                }
            }
        }
    }"#;

    #[test]
    fn test_simple_snapshot_to_css() {
        let source = MemorySource::new().with_layer(Layer::Primitive, "primitive.json", PRIMITIVE);
        let analysis = analyze(&source).unwrap();

        let css = analysis.to_css();
        assert!(css.contains(":root {\n  --kds-sys-color-base-red: #FF0000;\n}\n"));
    }

    #[test]
    fn test_find_accepts_every_spelling() {
        let source = MemorySource::new().with_layer(Layer::Primitive, "primitive.json", PRIMITIVE);
        let analysis = analyze(&source).unwrap();

        for token in ["1:1", "VariableID:1:1", "kds-sys-color-base-red", "--kds-sys-color-base-red"] {
            assert_eq!(analysis.find(token).map(|v| v.id.as_str()), Some("1:1"), "{token}");
        }
        assert!(analysis.find("nope").is_none());
    }

    #[test]
    fn test_simple_snapshot_to_yaml() {
        let source = MemorySource::new().with_layer(Layer::Primitive, "primitive.json", PRIMITIVE);
        let analysis = analyze(&source).unwrap();

        let yaml = analysis.to_yaml().unwrap();
        assert!(yaml.contains("canonicalByKey:"));
        assert!(yaml.contains("kds-sys-color-base-red:"));
    }
}
