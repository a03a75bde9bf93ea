use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use crate::rules::UNKNOWN_ID;

/// The three token layers, in canonicalization priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Primitive,
    Semantic,
    Component,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Primitive, Layer::Semantic, Layer::Component];

    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Primitive => "primitive",
            Layer::Semantic => "semantic",
            Layer::Component => "component",
        }
    }
}

impl Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical flat identifier such as `kds-sys-color-primary`.
///
/// Stored without the leading `--`; see [`FlatId::css_property`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FlatId(String);

impl FlatId {
    pub fn new(id: impl Into<String>) -> Self {
        FlatId(id.into())
    }

    pub fn unknown() -> Self {
        FlatId(UNKNOWN_ID.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The custom-property spelling, e.g. `--kds-sys-color-primary`.
    pub fn css_property(&self) -> String {
        format!("--{}", self.0)
    }
}

impl Display for FlatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Raw snapshot shape ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub meta: SnapshotMeta,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMeta {
    #[serde(default)]
    pub variable_collections: IndexMap<String, RawCollection>,
    #[serde(default)]
    pub variables: IndexMap<String, RawVariable>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCollection {
    pub name: String,
    #[serde(default)]
    pub default_mode_id: Option<String>,
    #[serde(default)]
    pub modes: Vec<Mode>,
}

impl RawCollection {
    /// The declared default mode, or the first mode when none is declared.
    pub fn default_mode(&self) -> Option<&str> {
        self.default_mode_id
            .as_deref()
            .or_else(|| self.modes.first().map(|mode| mode.mode_id.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub mode_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariable {
    pub name: String,
    #[serde(default)]
    pub variable_collection_id: String,
    #[serde(default)]
    pub resolved_type: String,
    #[serde(default)]
    pub values_by_mode: IndexMap<String, TokenValue>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A single mode's value: a literal or a reference to another variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Alias(AliasRef),
    Color(Color),
    Number(f64),
    Boolean(bool),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRef {
    #[serde(rename = "type")]
    pub kind: AliasKind,
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasKind {
    #[serde(rename = "VARIABLE_ALIAS")]
    VariableAlias,
}

/// A color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

// --- Loaded variables ---

/// A variable after ingestion, enriched with its layer, short id and flat id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,
    #[serde(skip)]
    pub raw_id: String,
    pub name: String,
    pub flat_id: FlatId,
    pub layer: Layer,
    pub collection: Option<String>,
    #[serde(skip)]
    pub collection_id: String,
    pub resolved_type: String,
    pub default_mode_id: Option<String>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub values_by_mode: IndexMap<String, TokenValue>,
    /// CSS output keeps only the alpha channel of this variable's value.
    #[serde(skip)]
    pub alpha_only: bool,
}

impl Variable {
    /// Last path segment of the name.
    pub fn leaf_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Everything before the last path segment, empty for top-level names.
    pub fn group_path(&self) -> &str {
        self.name.rsplit_once('/').map_or("", |(group, _)| group)
    }

    /// The value for `mode`, falling back to the default mode and then to the first value.
    pub fn value_for(&self, mode: Option<&str>) -> Option<&TokenValue> {
        mode.and_then(|mode| self.values_by_mode.get(mode))
            .or_else(|| self.default_value())
    }

    pub fn default_value(&self) -> Option<&TokenValue> {
        self.default_mode_id
            .as_deref()
            .and_then(|mode| self.values_by_mode.get(mode))
            .or_else(|| self.values_by_mode.values().next())
    }

    pub fn has_mode(&self, mode: &str) -> bool {
        self.values_by_mode.contains_key(mode)
    }
}
