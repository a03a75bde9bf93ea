use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use std::collections::HashSet;

use crate::model::{FlatId, Layer, TokenValue, Variable};
use crate::store::VariableStore;

/// The variable that owns a flat identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalEntry {
    pub id: String,
    pub layer: Layer,
    #[serde(skip)]
    slot: usize,
}

/// Canonical owners per flat id plus the pointer table built on top of them.
#[derive(Debug, Clone, Default)]
pub struct CanonicalIndex {
    canonical_by_flat_id: IndexMap<FlatId, CanonicalEntry>,
    alias_to_canonical: IndexMap<FlatId, FlatId>,
    shadowed: Vec<String>,
}

/// Picks the owner of every flat id and points each variable at what its owner denotes.
///
/// Owners are chosen walking layers in priority order and variables in file order, so an
/// earlier layer always wins a naming dispute. Nothing in the store is modified.
pub fn build_canonical(store: &VariableStore) -> CanonicalIndex {
    let mut index = CanonicalIndex::default();

    for layer in store.layers() {
        for slot in store.slots(layer) {
            let variable = store.at(slot);
            if index.canonical_by_flat_id.contains_key(&variable.flat_id) {
                index.shadowed.push(variable.id.clone());
                continue;
            }
            index.canonical_by_flat_id.insert(
                variable.flat_id.clone(),
                CanonicalEntry {
                    id: variable.id.clone(),
                    layer: variable.layer,
                    slot,
                },
            );
        }
    }

    for variable in store.variables() {
        let Some(owner) = index.owner_variable(store, &variable.flat_id) else {
            continue;
        };
        let target = terminal(store, owner);
        if target.flat_id != variable.flat_id && !index.alias_to_canonical.contains_key(&variable.flat_id) {
            debug!("{} points at {}", variable.flat_id, target.flat_id);
            index
                .alias_to_canonical
                .insert(variable.flat_id.clone(), target.flat_id.clone());
        }
    }

    index
}

/// Follows default-mode aliases from `start` until a literal, a missing target or a
/// revisited variable.
fn terminal<'s>(store: &'s VariableStore, start: &'s Variable) -> &'s Variable {
    let mut visited = HashSet::new();
    let mut current = start;
    while visited.insert(current.id.as_str()) {
        let Some(TokenValue::Alias(alias)) = current.default_value() else {
            break;
        };
        match store.lookup_alias(&alias.id) {
            Some(target) => current = target,
            None => break,
        }
    }
    current
}

impl CanonicalIndex {
    pub fn canonical_by_flat_id(&self) -> &IndexMap<FlatId, CanonicalEntry> {
        &self.canonical_by_flat_id
    }

    pub fn alias_to_canonical(&self) -> &IndexMap<FlatId, FlatId> {
        &self.alias_to_canonical
    }

    /// Short ids of variables that lost their flat id to an earlier definition.
    pub fn shadowed(&self) -> &[String] {
        &self.shadowed
    }

    pub fn owner(&self, flat_id: &FlatId) -> Option<&CanonicalEntry> {
        self.canonical_by_flat_id.get(flat_id)
    }

    pub fn owner_variable<'s>(&self, store: &'s VariableStore, flat_id: &FlatId) -> Option<&'s Variable> {
        self.owner(flat_id).map(|entry| store.at(entry.slot))
    }

    /// The identifier `flat_id` stands for, or `flat_id` itself when it points nowhere else.
    pub fn canonical_for<'a>(&'a self, flat_id: &'a FlatId) -> &'a FlatId {
        self.alias_to_canonical.get(flat_id).unwrap_or(flat_id)
    }

    pub fn is_canonical(&self, variable: &Variable) -> bool {
        self.owner(&variable.flat_id)
            .is_some_and(|entry| entry.layer == variable.layer && entry.id == variable.id)
    }
}
