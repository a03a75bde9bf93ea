//! Per-layer token files in the W3C design tokens format.

use indexmap::IndexMap;
use log::warn;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::format::color_to_w3c;
use crate::model::{Layer, TokenValue, Variable};
use crate::rules::w3c_type;
use crate::store::{LayerSnapshot, VariableStore};
use crate::utils::short_id;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct W3cToken {
    #[serde(rename = "$type")]
    pub kind: &'static str,
    #[serde(rename = "$value")]
    pub value: Value,
    #[serde(rename = "$description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A group of tokens keyed by name segment. A node may carry a token and children at once
/// when one variable's name is a prefix of another's.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenTree {
    #[serde(flatten)]
    pub token: Option<W3cToken>,
    #[serde(flatten)]
    pub children: IndexMap<String, TokenTree>,
}

impl TokenTree {
    fn insert(&mut self, path: &[String], token: W3cToken) {
        match path.split_first() {
            Some((head, rest)) => self
                .children
                .entry(head.clone())
                .or_default()
                .insert(rest, token),
            None => self.token = Some(token),
        }
    }

    /// The token at a dotted path such as `colors.base.blue`.
    pub fn get(&self, dotted: &str) -> Option<&W3cToken> {
        dotted
            .split('.')
            .try_fold(self, |node, segment| node.children.get(segment))
            .and_then(|node| node.token.as_ref())
    }
}

/// Alias targets by long and short id, mapped to their dotted token paths.
#[derive(Debug, Clone, Default)]
pub struct PathIndex {
    paths: HashMap<String, String>,
}

impl PathIndex {
    /// Indexes every loaded variable; a later layer's entry replaces an earlier one.
    pub fn new(store: &VariableStore) -> Self {
        let mut paths = HashMap::new();
        for variable in store.all() {
            let dotted = path_segments(&variable.name).join(".");
            paths.insert(variable.raw_id.clone(), dotted.clone());
            paths.insert(variable.id.clone(), dotted);
        }
        PathIndex { paths }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.paths
            .get(id)
            .or_else(|| self.paths.get(&short_id(id)))
            .map(String::as_str)
    }
}

/// Splits a `/`-separated name into trimmed segments with inner whitespace replaced by `_`.
pub fn path_segments(name: &str) -> Vec<String> {
    name.split('/')
        .map(|segment| segment.split_whitespace().collect::<Vec<_>>().join("_"))
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Named after the layer's snapshot file, so the component layer is `tokens.components.w3c.json`.
pub fn w3c_file_name(layer: Layer) -> &'static str {
    match layer {
        Layer::Primitive => "tokens.primitive.w3c.json",
        Layer::Semantic => "tokens.semantic.w3c.json",
        Layer::Component => "tokens.components.w3c.json",
    }
}

fn w3c_value(variable: &Variable, paths: &PathIndex) -> Value {
    match variable.default_value() {
        None => Value::Null,
        Some(TokenValue::Alias(alias)) => match paths.get(&alias.id) {
            Some(path) => Value::String(format!("{{{path}}}")),
            None => {
                warn!("{} aliases unknown variable {}", variable.name, alias.id);
                Value::Null
            }
        },
        Some(TokenValue::Color(color)) => Value::String(color_to_w3c(color)),
        Some(TokenValue::Number(number)) => number_value(*number),
        Some(TokenValue::Boolean(flag)) => Value::Bool(*flag),
        Some(TokenValue::String(text)) => Value::String(text.clone()),
    }
}

/// Whole numbers serialize without a fractional part.
fn number_value(number: f64) -> Value {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        json!(number as i64)
    } else {
        json!(number)
    }
}

/// Builds the token tree for one layer, reading every variable at its default mode.
pub fn w3c_document(store: &VariableStore, paths: &PathIndex, layer: &LayerSnapshot) -> TokenTree {
    let mut tree = TokenTree::default();
    for variable in store.layer_variables(layer) {
        let path = path_segments(&variable.name);
        if path.is_empty() {
            continue;
        }
        let token = W3cToken {
            kind: w3c_type(&variable.resolved_type),
            value: w3c_value(variable, paths),
            description: variable.description.clone(),
        };
        tree.insert(&path, token);
    }
    tree
}

/// One document per loaded layer, in priority order.
pub fn w3c_documents(store: &VariableStore) -> Vec<(Layer, TokenTree)> {
    let paths = PathIndex::new(store);
    store
        .layers()
        .iter()
        .map(|layer| (layer.layer, w3c_document(store, &paths, layer)))
        .collect()
}
