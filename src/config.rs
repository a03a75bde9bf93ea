//! Pipeline configuration.
//!
//! `defaults/tokenweave.default.toml` is embedded into the binary. A user file layered on
//! top only needs the keys it changes; relative paths in it resolve against the file's own
//! directory.

use miette::NamedSource;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

use crate::error::ConfigError;
use crate::model::Layer;

const DEFAULT_TOML: &str = include_str!("../defaults/tokenweave.default.toml");

/// Looked up in the working directory when no configuration path is given.
pub const CONFIG_FILE_NAME: &str = "tokenweave.toml";

const PATH_SECTIONS: &[&str] = &["layers", "output"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    pub layers: LayerConfig,
    pub output: OutputConfig,
}

/// One snapshot file per layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerConfig {
    pub primitive: PathBuf,
    pub semantic: PathBuf,
    pub component: PathBuf,
}

impl LayerConfig {
    pub fn path_for(&self, layer: Layer) -> &Path {
        match layer {
            Layer::Primitive => &self.primitive,
            Layer::Semantic => &self.semantic,
            Layer::Component => &self.component,
        }
    }
}

/// Where artifacts are written.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub css: PathBuf,
    pub docs: PathBuf,
    pub w3c_dir: PathBuf,
}

impl PipelineConfig {
    pub fn defaults() -> Result<Self, ConfigError> {
        Loader::new().build()
    }

    /// Loads `path` over the defaults, or `tokenweave.toml` from the working directory if
    /// it exists.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Loader::new().with_file(path)?.build(),
            None => Loader::new().with_optional_file(CONFIG_FILE_NAME)?.build(),
        }
    }
}

#[derive(Debug, Clone)]
struct Layered {
    name: String,
    text: String,
    base: Option<PathBuf>,
}

/// Collects configuration sources; later sources override earlier ones key by key.
#[derive(Debug, Clone)]
pub struct Loader {
    sources: Vec<Layered>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        Loader {
            sources: vec![Layered {
                name: "tokenweave.default.toml".to_string(),
                text: DEFAULT_TOML.to_string(),
                base: None,
            }],
        }
    }

    /// Layer a configuration file. Missing files are an error.
    pub fn with_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        Ok(self.with_source(path, text))
    }

    /// Layer a configuration file if it exists.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(self.with_source(path, text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(self),
            Err(source) => Err(ConfigError::Read {
                path: path.to_string_lossy().to_string(),
                source,
            }),
        }
    }

    /// Layer TOML text whose relative paths are kept as written.
    pub fn with_str(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.sources.push(Layered {
            name: name.into(),
            text: text.into(),
            base: None,
        });
        self
    }

    fn with_source(mut self, path: &Path, text: String) -> Self {
        let base = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf);
        self.sources.push(Layered {
            name: path.to_string_lossy().to_string(),
            text,
            base,
        });
        self
    }

    /// Parse and merge every source, then deserialize the result.
    pub fn build(self) -> Result<PipelineConfig, ConfigError> {
        let mut merged = Table::new();
        for source in self.sources {
            let mut table: Table = toml::from_str(&source.text).map_err(|err| {
                let span = err.span().unwrap_or(0..0);
                ConfigError::Malformed {
                    src: NamedSource::new(&source.name, source.text.clone()),
                    span: (span.start, span.end - span.start).into(),
                    message: err.message().to_string(),
                }
            })?;
            if let Some(base) = &source.base {
                rebase(&mut table, base);
            }
            merge(&mut merged, table);
        }
        Value::Table(merged)
            .try_into()
            .map_err(|err: toml::de::Error| ConfigError::Invalid {
                message: err.message().to_string(),
            })
    }
}

fn rebase(table: &mut Table, base: &Path) {
    for section in PATH_SECTIONS {
        let Some(Value::Table(entries)) = table.get_mut(*section) else {
            continue;
        };
        for (_, value) in entries.iter_mut() {
            if let Value::String(path) = value {
                if Path::new(path.as_str()).is_relative() {
                    *path = base.join(path.as_str()).to_string_lossy().to_string();
                }
            }
        }
    }
}

fn merge(into: &mut Table, from: Table) {
    for (key, value) in from {
        match (into.get_mut(&key), value) {
            (Some(Value::Table(existing)), Value::Table(incoming)) => merge(existing, incoming),
            (_, value) => {
                into.insert(key, value);
            }
        }
    }
}
