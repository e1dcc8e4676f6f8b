//! Dependency resolution.
//!
//! Models are ordered so that every model referenced by a foreign key is
//! seeded before the model holding the key. Self-references and references
//! to models outside the set impose no ordering.
//!
//! Cyclic foreign keys cannot be ordered. Once no model without pending
//! dependencies remains, the rest are appended in declaration order. That
//! order may still violate a foreign key inside the cycle; it is a
//! best-effort fallback, not a guarantee.

use std::collections::{BTreeSet, HashMap};

use seed_core::SchemaModel;
use tracing::{debug, warn};

/// Result of resolving the seeding order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeedOrder {
    /// Every model, parents before children
    pub order: Vec<String>,
    /// Models placed by the declaration-order fallback
    pub cyclic: Vec<String>,
}

impl SeedOrder {
    /// Position of `model` in the order.
    pub fn position(&self, model: &str) -> Option<usize> {
        self.order.iter().position(|m| m == model)
    }

    pub fn has_cycles(&self) -> bool {
        !self.cyclic.is_empty()
    }
}

/// Directed "depends on" graph over model names.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    names: Vec<String>,
    index: HashMap<String, usize>,
    /// `deps[i]` holds the models `names[i]` depends on
    deps: Vec<BTreeSet<usize>>,
}

impl DependencyGraph {
    /// Build the graph from foreign-key fields.
    pub fn from_models(models: &[SchemaModel]) -> Self {
        let mut graph = Self::default();

        for model in models {
            if graph.index.contains_key(&model.name) {
                continue;
            }
            graph.index.insert(model.name.clone(), graph.names.len());
            graph.names.push(model.name.clone());
            graph.deps.push(BTreeSet::new());
        }

        for model in models {
            for field in model.foreign_keys() {
                if let Some(parent) = &field.relation_model {
                    graph.add_dependency(&model.name, parent);
                }
            }
        }

        graph
    }

    /// Record that `model` must come after `parent`.
    ///
    /// Returns false, changing nothing, for self-references and unknown
    /// models.
    pub fn add_dependency(&mut self, model: &str, parent: &str) -> bool {
        if model == parent {
            return false;
        }
        match (self.index.get(model), self.index.get(parent)) {
            (Some(&child), Some(&parent)) => {
                self.deps[child].insert(parent);
                true
            }
            _ => {
                debug!(
                    "Ignoring dependency of {} on {}: not in the model set",
                    model, parent
                );
                false
            }
        }
    }

    /// Models `model` directly depends on, in declaration order.
    pub fn dependencies(&self, model: &str) -> Vec<&str> {
        self.index
            .get(model)
            .map(|&i| self.deps[i].iter().map(|&d| self.names[d].as_str()).collect())
            .unwrap_or_default()
    }

    /// Topological order, ties broken by declaration order.
    pub fn resolve(&self) -> SeedOrder {
        let n = self.names.len();
        let mut placed = vec![false; n];
        let mut order = Vec::with_capacity(n);

        loop {
            let next = (0..n).find(|&i| !placed[i] && self.deps[i].iter().all(|&d| placed[d]));
            match next {
                Some(i) => {
                    placed[i] = true;
                    order.push(self.names[i].clone());
                }
                None => break,
            }
        }

        let cyclic: Vec<String> = (0..n)
            .filter(|&i| !placed[i])
            .map(|i| self.names[i].clone())
            .collect();

        if !cyclic.is_empty() {
            warn!(
                "Cyclic foreign keys between {:?}; seeding them in declaration order",
                cyclic
            );
            order.extend(cyclic.iter().cloned());
        }

        SeedOrder { order, cyclic }
    }
}

/// Resolve the seeding order of `models`.
pub fn resolve_order(models: &[SchemaModel]) -> SeedOrder {
    DependencyGraph::from_models(models).resolve()
}
