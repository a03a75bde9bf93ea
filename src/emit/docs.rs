use indexmap::IndexMap;
use serde::Serialize;

use crate::canonical::{CanonicalEntry, CanonicalIndex};
use crate::model::{FlatId, Layer, Variable};
use crate::resolver::{Hop, Resolver};
use crate::store::VariableStore;

/// The lookup tables the documentation UI reads.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsModel<'a> {
    pub all_variables: IndexMap<&'a str, &'a Variable>,
    pub canonical_by_key: &'a IndexMap<FlatId, CanonicalEntry>,
    pub alias_to_canonical: &'a IndexMap<FlatId, FlatId>,
    pub alias_chains: IndexMap<&'a FlatId, Vec<Hop>>,
    pub order: Vec<Layer>,
}

pub fn docs_model<'a>(store: &'a VariableStore, canonical: &'a CanonicalIndex) -> DocsModel<'a> {
    let resolver = Resolver::new(store, canonical);
    let all_variables = store
        .variables()
        .map(|variable| (variable.id.as_str(), variable))
        .collect();

    let mut alias_chains: IndexMap<&FlatId, Vec<Hop>> = IndexMap::new();
    for variable in store.variables() {
        if alias_chains.contains_key(&variable.flat_id) {
            continue;
        }
        let chain = resolver.resolve_default(variable).chain;
        if !chain.is_empty() {
            alias_chains.insert(&variable.flat_id, chain);
        }
    }

    DocsModel {
        all_variables,
        canonical_by_key: canonical.canonical_by_flat_id(),
        alias_to_canonical: canonical.alias_to_canonical(),
        alias_chains,
        order: store.layers().iter().map(|layer| layer.layer).collect(),
    }
}
