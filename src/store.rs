use indexmap::map::Entry;
use indexmap::IndexMap;
use log::{debug, info, warn};
use std::collections::HashMap;

use crate::error::SnapshotError;
use crate::model::{FlatId, Layer, RawCollection, Variable};
use crate::normalize::normalize_detailed;
use crate::source::{LoadedSnapshot, SnapshotSource};
use crate::utils::short_id;

/// One loaded layer: its collections and the arena slots of its variables in file order.
#[derive(Debug, Clone)]
pub struct LayerSnapshot {
    pub layer: Layer,
    pub source: String,
    pub collections: IndexMap<String, RawCollection>,
    members: Vec<usize>,
}

impl LayerSnapshot {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Two variables of the same layer and collection that normalize to the same flat id.
/// The first in file order is kept as the canonical candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub layer: Layer,
    pub collection: String,
    pub flat_id: FlatId,
    pub kept: String,
    pub duplicate: String,
}

/// Every loaded variable, indexed by short id.
///
/// Variables live in an arena in load order. The short-id table points into it and keeps
/// the first occurrence, so a later layer reusing a short id never replaces an earlier one.
#[derive(Debug, Default)]
pub struct VariableStore {
    variables: Vec<Variable>,
    by_id: IndexMap<String, usize>,
    collections: IndexMap<String, RawCollection>,
    layers: Vec<LayerSnapshot>,
    collisions: Vec<Collision>,
}

impl VariableStore {
    /// Loads every layer from `source` in priority order. Absent layers are skipped.
    pub fn load(source: &dyn SnapshotSource) -> Result<Self, SnapshotError> {
        let mut store = VariableStore::default();
        for layer in Layer::ALL {
            match source.fetch(layer)? {
                Some(loaded) => store.ingest(layer, loaded),
                None => warn!("no snapshot for the {layer} layer, skipping it"),
            }
        }
        Ok(store)
    }

    /// Builds a store from already-parsed snapshots. Input order does not matter; layers
    /// are ingested in priority order.
    pub fn from_snapshots(snapshots: impl IntoIterator<Item = (Layer, LoadedSnapshot)>) -> Self {
        let mut snapshots: Vec<_> = snapshots.into_iter().collect();
        snapshots.sort_by_key(|(layer, _)| *layer);
        let mut store = VariableStore::default();
        for (layer, loaded) in snapshots {
            store.ingest(layer, loaded);
        }
        store
    }

    fn ingest(&mut self, layer: Layer, loaded: LoadedSnapshot) {
        let LoadedSnapshot { name: source, snapshot } = loaded;
        let collections = snapshot.meta.variable_collections;
        let mut members = Vec::with_capacity(snapshot.meta.variables.len());
        let mut seen: HashMap<(String, FlatId), String> = HashMap::new();

        for (raw_id, raw) in snapshot.meta.variables {
            let collection = collections.get(&raw.variable_collection_id);
            let normalized = normalize_detailed(
                &raw.name,
                collection.map(|collection| collection.name.as_str()),
                layer,
            );
            let default_mode_id = collection
                .and_then(RawCollection::default_mode)
                .map(str::to_string)
                .or_else(|| raw.values_by_mode.keys().next().cloned());
            let id = short_id(&raw_id);

            let key = (raw.variable_collection_id.clone(), normalized.id.clone());
            match seen.get(&key) {
                // Unknown ids share the sentinel without sharing a collection.
                _ if normalized.id.is_unknown() => {}
                Some(kept) => {
                    warn!(
                        "{kept} and {id} in {layer} collection '{}' both normalize to {}; keeping {kept}",
                        raw.variable_collection_id, normalized.id
                    );
                    self.collisions.push(Collision {
                        layer,
                        collection: raw.variable_collection_id.clone(),
                        flat_id: normalized.id.clone(),
                        kept: kept.clone(),
                        duplicate: id.clone(),
                    });
                }
                None => {
                    seen.insert(key, id.clone());
                }
            }

            let slot = self.variables.len();
            match self.by_id.entry(id.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(slot);
                }
                Entry::Occupied(entry) => {
                    let earlier = &self.variables[*entry.get()];
                    debug!(
                        "short id {id} from the {layer} layer is already taken by '{}' ({} layer)",
                        earlier.name, earlier.layer
                    );
                }
            }

            self.variables.push(Variable {
                id,
                raw_id,
                name: raw.name,
                flat_id: normalized.id,
                layer,
                collection: collection.map(|collection| collection.name.clone()),
                collection_id: raw.variable_collection_id,
                resolved_type: raw.resolved_type,
                default_mode_id,
                source: source.clone(),
                description: raw.description.filter(|text| !text.is_empty()),
                values_by_mode: raw.values_by_mode,
                alpha_only: normalized.alpha_only,
            });
            members.push(slot);
        }

        for (id, collection) in &collections {
            self.collections
                .entry(id.clone())
                .or_insert_with(|| collection.clone());
        }
        info!(
            "loaded {} variables from {source} ({layer} layer)",
            members.len()
        );
        self.layers.push(LayerSnapshot {
            layer,
            source,
            collections,
            members,
        });
    }

    /// Looks up a variable by short id.
    pub fn get(&self, id: &str) -> Option<&Variable> {
        self.by_id.get(id).map(|slot| &self.variables[*slot])
    }

    /// Follows an alias reference, which may use the long form of the target id.
    pub fn lookup_alias(&self, target: &str) -> Option<&Variable> {
        self.get(target).or_else(|| self.get(&short_id(target)))
    }

    /// The master table: first variable per short id, in load order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.by_id.values().map(|slot| &self.variables[*slot])
    }

    /// Every loaded variable, including ones whose short id was already taken.
    pub fn all(&self) -> &[Variable] {
        &self.variables
    }

    pub(crate) fn at(&self, slot: usize) -> &Variable {
        &self.variables[slot]
    }

    /// Arena slots of a layer's variables, in file order.
    pub(crate) fn slots<'s>(&'s self, layer: &'s LayerSnapshot) -> impl Iterator<Item = usize> + 's {
        layer.members.iter().copied()
    }

    pub fn layer_variables<'s>(&'s self, layer: &'s LayerSnapshot) -> impl Iterator<Item = &'s Variable> + 's {
        layer.members.iter().map(|slot| &self.variables[*slot])
    }

    pub fn layers(&self) -> &[LayerSnapshot] {
        &self.layers
    }

    pub fn layer(&self, layer: Layer) -> Option<&LayerSnapshot> {
        self.layers.iter().find(|snapshot| snapshot.layer == layer)
    }

    /// Collections from every layer, first definition per id.
    pub fn collections(&self) -> &IndexMap<String, RawCollection> {
        &self.collections
    }

    /// The collection a variable belongs to, looked up in its own layer first.
    pub fn collection_of(&self, variable: &Variable) -> Option<&RawCollection> {
        self.layer(variable.layer)
            .and_then(|layer| layer.collections.get(&variable.collection_id))
            .or_else(|| self.collections.get(&variable.collection_id))
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
