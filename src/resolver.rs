use log::debug;
use serde::Serialize;
use std::collections::HashSet;

use crate::canonical::CanonicalIndex;
use crate::format::{format_literal, ResolvedValue};
use crate::model::{FlatId, Layer, TokenValue, Variable};
use crate::store::VariableStore;

/// One variable visited while following an alias chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hop {
    pub flat_id: FlatId,
    pub layer: Layer,
    pub name: String,
    pub path: String,
}

impl Hop {
    fn of(variable: &Variable) -> Self {
        Hop {
            flat_id: variable.flat_id.clone(),
            layer: variable.layer,
            name: variable.leaf_name().to_string(),
            path: variable.group_path().to_string(),
        }
    }

    fn same_token(&self, other: &Hop) -> bool {
        self.name == other.name && self.path == other.path && self.layer == other.layer
    }
}

/// How a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Literal,
    /// The chain came back to a variable it had already visited.
    Cycle,
    /// An alias target was missing and no canonical fallback applied.
    Unresolved,
    /// The variable has no values at all.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub value: ResolvedValue,
    pub chain: Vec<Hop>,
    pub outcome: Outcome,
}

impl Resolution {
    fn halted(chain: Vec<Hop>, outcome: Outcome) -> Self {
        Resolution {
            value: ResolvedValue::Unresolved,
            chain,
            outcome,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome == Outcome::Literal
    }
}

/// Follows aliases from a variable to the literal it denotes.
///
/// Read-only over the store and the canonical index; every call starts with a fresh
/// visited set, so a resolver can be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    store: &'a VariableStore,
    canonical: &'a CanonicalIndex,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a VariableStore, canonical: &'a CanonicalIndex) -> Self {
        Resolver { store, canonical }
    }

    pub fn resolve_default(&self, variable: &'a Variable) -> Resolution {
        self.resolve(variable, None)
    }

    /// Resolves `variable` in `mode`, or in its default mode when it has no value for `mode`.
    ///
    /// Each alias target is read in its own default mode. A target that cannot be found falls
    /// back to the canonical owner of the current variable's identifier; a repeated variable
    /// halts the walk. Both dead ends report [`ResolvedValue::Unresolved`] with the chain so far.
    pub fn resolve(&self, variable: &'a Variable, mode: Option<&str>) -> Resolution {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut chain: Vec<Hop> = Vec::new();
        let mut current = variable;
        let mut mode = match mode {
            Some(mode) if variable.has_mode(mode) => Some(mode),
            _ => variable.default_mode_id.as_deref(),
        };

        loop {
            if !visited.insert(current.id.as_str()) {
                debug!("cycle at {} while resolving {}", current.flat_id, variable.flat_id);
                return Resolution::halted(chain, Outcome::Cycle);
            }
            push_hop(&mut chain, current);

            let Some(value) = current.value_for(mode) else {
                return Resolution::halted(chain, Outcome::Empty);
            };
            let TokenValue::Alias(alias) = value else {
                return Resolution {
                    value: format_literal(value, &current.name).unwrap_or(ResolvedValue::Unresolved),
                    chain,
                    outcome: Outcome::Literal,
                };
            };

            let next = match self.store.lookup_alias(&alias.id) {
                Some(target) => target,
                None => match self.canonical_fallback(current) {
                    Some(fallback) if !visited.contains(fallback.id.as_str()) => {
                        debug!(
                            "alias target {} of {} is missing, continuing at {}",
                            alias.id, current.flat_id, fallback.flat_id
                        );
                        fallback
                    }
                    _ => return Resolution::halted(chain, Outcome::Unresolved),
                },
            };
            mode = next.default_mode_id.as_deref().or(mode);
            current = next;
        }
    }

    fn canonical_fallback(&self, current: &Variable) -> Option<&'a Variable> {
        let key = self.canonical.canonical_for(&current.flat_id);
        self.canonical
            .owner_variable(self.store, key)
            .filter(|owner| !std::ptr::eq(*owner, current))
    }
}

fn push_hop(chain: &mut Vec<Hop>, variable: &Variable) {
    let hop = Hop::of(variable);
    if chain.last().is_some_and(|last| last.same_token(&hop)) {
        return;
    }
    chain.push(hop);
}
