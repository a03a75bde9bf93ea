use log::warn;
use std::collections::HashSet;

use crate::canonical::CanonicalIndex;
use crate::format::extract_alpha;
use crate::resolver::Resolver;
use crate::store::VariableStore;

pub const CSS_HEADER: &str = "/**\n * Auto-generated Design Tokens\n * Source: Figma Variables\n */\n\n";

/// Renders one custom property per canonical identifier inside a `:root` block.
///
/// Values come from each owner's default mode. Tokens without a collection and tokens whose
/// chain ends unresolved are left out.
pub fn to_css(store: &VariableStore, canonical: &CanonicalIndex) -> String {
    let resolver = Resolver::new(store, canonical);
    let mut emitted = HashSet::new();
    let mut css = String::from(CSS_HEADER);
    css.push_str(":root {\n");

    for flat_id in canonical.canonical_by_flat_id().keys() {
        if flat_id.is_unknown() || !emitted.insert(flat_id) {
            continue;
        }
        let Some(variable) = canonical.owner_variable(store, flat_id) else {
            continue;
        };
        let resolution = resolver.resolve_default(variable);
        if !resolution.is_resolved() {
            warn!(
                "{} did not resolve to a literal ({:?}), leaving it out of the stylesheet",
                flat_id, resolution.outcome
            );
            continue;
        }
        let value = resolution.value.to_string();
        let value = match extract_alpha(&value) {
            Some(alpha) if variable.alpha_only => alpha,
            _ => value.as_str(),
        };
        css.push_str(&format!("  {}: {};\n", flat_id.css_property(), value));
    }

    css.push_str("}\n");
    css
}
