//! Where layer snapshots come from.
//!
//! The pipeline only ever sees [`SnapshotSource`]; fetching exports from the design
//! tool's API is a separate step that produces the files [`FileSource`] reads.

use indexmap::IndexMap;
use log::debug;
use miette::NamedSource;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::LayerConfig;
use crate::error::SnapshotError;
use crate::model::{Layer, Snapshot};
use crate::utils::offset_of;

/// A parsed snapshot together with the name it was loaded under.
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub name: String,
    pub snapshot: Snapshot,
}

pub trait SnapshotSource {
    /// Returns the snapshot for `layer`, or `Ok(None)` when the layer is absent and
    /// should be skipped.
    fn fetch(&self, layer: Layer) -> Result<Option<LoadedSnapshot>, SnapshotError>;
}

/// Parses the JSON text of one layer export.
pub fn parse_snapshot(text: &str, name: &str) -> Result<Snapshot, SnapshotError> {
    serde_json::from_str(text).map_err(|err| {
        let offset = offset_of(text, err.line(), err.column());
        let len = usize::from(offset < text.len());
        SnapshotError::Malformed {
            src: NamedSource::new(name, text.to_string()),
            span: (offset, len).into(),
            message: err.to_string(),
        }
    })
}

/// Reads one JSON file per layer from disk.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    paths: IndexMap<Layer, PathBuf>,
}

impl FileSource {
    pub fn new(layers: &LayerConfig) -> Self {
        let paths = Layer::ALL
            .iter()
            .map(|layer| (*layer, layers.path_for(*layer).to_path_buf()))
            .collect();
        FileSource { paths }
    }

    pub fn with_path(mut self, layer: Layer, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(layer, path.into());
        self
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

impl SnapshotSource for FileSource {
    fn fetch(&self, layer: Layer) -> Result<Option<LoadedSnapshot>, SnapshotError> {
        let Some(path) = self.paths.get(&layer) else {
            return Ok(None);
        };
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("{} not found", path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(SnapshotError::Read {
                    path: path.to_string_lossy().to_string(),
                    source,
                })
            }
        };
        let name = display_name(path);
        let snapshot = parse_snapshot(&text, &name)?;
        Ok(Some(LoadedSnapshot { name, snapshot }))
    }
}

/// Snapshots held as in-memory JSON text.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    layers: IndexMap<Layer, (String, String)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, layer: Layer, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.layers.insert(layer, (name.into(), text.into()));
        self
    }
}

impl SnapshotSource for MemorySource {
    fn fetch(&self, layer: Layer) -> Result<Option<LoadedSnapshot>, SnapshotError> {
        let Some((name, text)) = self.layers.get(&layer) else {
            return Ok(None);
        };
        let snapshot = parse_snapshot(text, name)?;
        Ok(Some(LoadedSnapshot { name: name.clone(), snapshot }))
    }
}
