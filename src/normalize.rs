use crate::model::{FlatId, Layer};
use crate::rules::{
    self, COMPONENT_NAMESPACE, COMPONENT_SOURCE_COLLECTIONS, OPACITY_KEYWORD,
    OVERRIDE_EXEMPT_COLLECTION, PREFIX, SYSTEM_COLOR_NAMESPACE, SYSTEM_COLOR_OVERRIDES,
};

/// A flat identifier plus the presentation hint that comes with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub id: FlatId,
    pub alpha_only: bool,
}

impl Normalized {
    fn plain(id: String) -> Self {
        Normalized { id: FlatId::new(id), alpha_only: false }
    }

    fn unknown() -> Self {
        Normalized { id: FlatId::unknown(), alpha_only: false }
    }
}

/// Lower-cases `input` and joins its words with `-`.
///
/// Anything other than ASCII letters, digits and `_` separates words; runs of separators
/// collapse and separators at either end are dropped.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;
    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Computes the canonical flat identifier for a variable.
pub fn normalize(name: &str, collection: Option<&str>, layer: Layer) -> FlatId {
    normalize_detailed(name, collection, layer).id
}

/// Like [`normalize`], also reporting whether CSS output should keep only the alpha channel.
pub fn normalize_detailed(name: &str, collection: Option<&str>, layer: Layer) -> Normalized {
    let Some(collection) = collection else {
        return Normalized::unknown();
    };
    let name = slugify(name);
    let collection = slugify(collection);
    if name.is_empty() || collection.is_empty() {
        return Normalized::unknown();
    }

    if layer == Layer::Component && COMPONENT_SOURCE_COLLECTIONS.contains(&collection.as_str()) {
        return Normalized {
            alpha_only: name.contains(OPACITY_KEYWORD),
            id: FlatId::new(format!("{PREFIX}-{COMPONENT_NAMESPACE}-{name}")),
        };
    }

    let namespace = rules::namespace_for(&collection).unwrap_or(collection.as_str());
    let id = format!("{PREFIX}-{namespace}-{name}");
    if collection == OVERRIDE_EXEMPT_COLLECTION {
        return Normalized::plain(id);
    }

    if let Some(state) = rules::state_layer_for(&name) {
        return Normalized { id: FlatId::new(state.id()), alpha_only: true };
    }
    if SYSTEM_COLOR_OVERRIDES.contains(&name.as_str()) {
        return Normalized::plain(format!("{PREFIX}-{SYSTEM_COLOR_NAMESPACE}-{name}"));
    }
    Normalized::plain(id)
}
