//! Fixed naming and formatting tables.
//!
//! Downstream stylesheets and the documentation UI depend on these exact
//! identifiers, so they live here as data rather than as branches inside the
//! normalizer and the literal formatter.

/// Namespace prefix shared by every generated identifier.
pub const PREFIX: &str = "kds";

/// Identifier given to a variable with no collection.
pub const UNKNOWN_ID: &str = "kds-unknown";

/// Value reported when an alias chain cannot reach a literal.
pub const ALIAS_PLACEHOLDER: &str = "Alias";

/// Maps collection names onto identifier namespaces.
pub struct CollectionRule {
    pub collections: &'static [&'static str],
    pub namespace: &'static str,
}

pub const COLLECTION_RULES: &[CollectionRule] = &[
    CollectionRule { collections: &["key", "colors"], namespace: "sys-color" },
    CollectionRule { collections: &["typography", "typescale"], namespace: "typography" },
    CollectionRule { collections: &["space"], namespace: "sys-space" },
    CollectionRule { collections: &["components"], namespace: "comp" },
    CollectionRule { collections: &["states"], namespace: "state" },
];

/// Collections that component-layer variables keep in the component namespace.
pub const COMPONENT_SOURCE_COLLECTIONS: &[&str] = &["components", "states"];
pub const COMPONENT_NAMESPACE: &str = "comp";

/// Collection exempt from the legacy overrides below.
pub const OVERRIDE_EXEMPT_COLLECTION: &str = "components";

/// Names pinned to the system color namespace whatever their collection.
pub const SYSTEM_COLOR_OVERRIDES: &[&str] = &[
    "primary",
    "on-primary",
    "secondary-container",
    "on-surface-variant",
];
pub const SYSTEM_COLOR_NAMESPACE: &str = "sys-color";

pub const OPACITY_KEYWORD: &str = "opacity";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateLayer {
    Hover,
    Focus,
    Press,
}

impl StateLayer {
    pub fn id(self) -> &'static str {
        match self {
            StateLayer::Hover => "kds-state-layer-opacity-hover",
            StateLayer::Focus => "kds-state-layer-opacity-focus",
            StateLayer::Press => "kds-state-layer-opacity-press",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum StatePattern {
    /// Name contains both the keyword and [`OPACITY_KEYWORD`].
    WithOpacity(&'static str),
    /// Name ends with the suffix.
    Suffix(&'static str),
}

impl StatePattern {
    fn matches(self, name: &str) -> bool {
        match self {
            StatePattern::WithOpacity(keyword) => {
                name.contains(keyword) && name.contains(OPACITY_KEYWORD)
            }
            StatePattern::Suffix(suffix) => name.ends_with(suffix),
        }
    }
}

/// Checked in order; the first match wins.
pub const STATE_LAYER_RULES: &[(StatePattern, StateLayer)] = &[
    (StatePattern::WithOpacity("hover"), StateLayer::Hover),
    (StatePattern::WithOpacity("focus"), StateLayer::Focus),
    (StatePattern::WithOpacity("press"), StateLayer::Press),
    (StatePattern::Suffix("opacity-08"), StateLayer::Hover),
    (StatePattern::Suffix("opacity-12"), StateLayer::Focus),
    (StatePattern::Suffix("opacity-16"), StateLayer::Press),
];

pub const WEIGHT_KEYWORD: &str = "weight";

pub const FONT_WEIGHTS: &[(&str, u16)] = &[
    ("thin", 100),
    ("extra-light", 200),
    ("light", 300),
    ("regular", 400),
    ("medium", 500),
    ("semibold", 600),
    ("bold", 700),
    ("extra-bold", 800),
    ("black", 900),
];

/// Numeric tokens whose name contains one of these render in degrees.
pub const ROTATION_KEYWORDS: &[&str] = &["rotation", "degree"];

/// `resolvedType` to W3C `$type`; anything else is a number.
pub const W3C_TYPES: &[(&str, &str)] = &[("COLOR", "color")];
pub const W3C_DEFAULT_TYPE: &str = "number";

pub fn namespace_for(collection: &str) -> Option<&'static str> {
    COLLECTION_RULES
        .iter()
        .find(|rule| rule.collections.contains(&collection))
        .map(|rule| rule.namespace)
}

pub fn state_layer_for(name: &str) -> Option<StateLayer> {
    STATE_LAYER_RULES
        .iter()
        .find(|(pattern, _)| pattern.matches(name))
        .map(|(_, layer)| *layer)
}

/// Case-insensitive lookup in [`FONT_WEIGHTS`].
pub fn font_weight(name: &str) -> Option<u16> {
    let name = name.to_lowercase();
    FONT_WEIGHTS
        .iter()
        .find(|(weight, _)| *weight == name)
        .map(|(_, value)| *value)
}

pub fn w3c_type(resolved_type: &str) -> &'static str {
    W3C_TYPES
        .iter()
        .find(|(figma, _)| *figma == resolved_type)
        .map_or(W3C_DEFAULT_TYPE, |(_, w3c)| *w3c)
}
