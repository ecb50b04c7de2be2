//! The feature catalog: an immutable, validated registry of features.
//!
//! Declaration order is the canonical order. The resolver re-orders its
//! output by it and the composer applies features in it, so everything
//! downstream is reproducible no matter how a selection was requested.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use super::DomainError;
use super::entities::{Feature, FeatureId};

/// Immutable registry of all known features.
///
/// Constructed once (see [`FeatureCatalog::new`]) and passed by reference to
/// the resolver and composer; there is no global instance.
#[derive(Debug, Clone, Default)]
pub struct FeatureCatalog {
    features: Vec<Feature>,
    index: HashMap<FeatureId, usize>,
}

impl FeatureCatalog {
    /// Build and validate a catalog.
    ///
    /// # Errors
    ///
    /// - [`DomainError::DuplicateFeature`] if an id is declared twice
    /// - [`DomainError::UnknownDependency`] / [`DomainError::UnknownConflict`]
    ///   if a relation names an undeclared id
    /// - [`DomainError::CatalogCycle`] if the dependency graph is not a DAG
    #[instrument(skip_all, fields(features = features.len()))]
    pub fn new(features: Vec<Feature>) -> Result<Self, DomainError> {
        let mut index = HashMap::with_capacity(features.len());
        for (pos, feature) in features.iter().enumerate() {
            if index.insert(feature.id().clone(), pos).is_some() {
                return Err(DomainError::DuplicateFeature {
                    id: feature.id().to_string(),
                });
            }
        }

        for feature in &features {
            if let Some(dep) = feature.dependencies().iter().find(|d| !index.contains_key(*d)) {
                return Err(DomainError::UnknownDependency {
                    feature: feature.id().to_string(),
                    dependency: dep.to_string(),
                });
            }
            if let Some(other) = feature.conflicts().iter().find(|c| !index.contains_key(*c)) {
                return Err(DomainError::UnknownConflict {
                    feature: feature.id().to_string(),
                    conflict: other.to_string(),
                });
            }
        }

        let mut catalog = Self { features, index };
        catalog.symmetrize_conflicts();
        catalog.validate()?;

        debug!(features = catalog.len(), "feature catalog loaded");
        Ok(catalog)
    }

    /// An empty catalog: only the base tree can be generated.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a feature by id.
    pub fn lookup(&self, id: &str) -> Result<&Feature, DomainError> {
        self.get(id).ok_or_else(|| DomainError::UnknownFeature { id: id.to_string() })
    }

    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.index.get(id).map(|&pos| &self.features[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All features in declaration order.
    pub fn list_all(&self) -> &[Feature] {
        &self.features
    }

    pub fn ids(&self) -> impl Iterator<Item = &FeatureId> {
        self.features.iter().map(Feature::id)
    }

    /// Declaration position of `id`, the tie-break for deterministic output.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Features that directly depend on `id`, in declaration order.
    pub fn dependents_of(&self, id: &str) -> Vec<&FeatureId> {
        self.features
            .iter()
            .filter(|f| f.dependencies().contains(id))
            .map(Feature::id)
            .collect()
    }

    /// Check the dependency graph is acyclic.
    ///
    /// Walks from every declared feature in declaration order and fails on
    /// the first back edge, naming the cycle as `a -> b -> a`.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut visited = HashSet::new();
        let mut stack = Vec::new();

        for pos in 0..self.features.len() {
            if let Some(cycle) = self.find_cycle(pos, &mut visited, &mut stack) {
                return Err(DomainError::CatalogCycle { cycle });
            }
        }

        Ok(())
    }

    fn find_cycle(
        &self,
        pos: usize,
        visited: &mut HashSet<usize>,
        stack: &mut Vec<usize>,
    ) -> Option<Vec<String>> {
        if let Some(start) = stack.iter().position(|&p| p == pos) {
            let mut cycle: Vec<String> = stack[start..]
                .iter()
                .map(|&p| self.features[p].id().to_string())
                .collect();
            cycle.push(self.features[pos].id().to_string());
            return Some(cycle);
        }
        if !visited.insert(pos) {
            return None;
        }

        stack.push(pos);
        for dep in self.features[pos].dependencies() {
            let Some(next) = self.position(dep.as_str()) else {
                continue;
            };
            if let Some(cycle) = self.find_cycle(next, visited, stack) {
                return Some(cycle);
            }
        }
        stack.pop();

        None
    }

    fn symmetrize_conflicts(&mut self) {
        let edges: Vec<(usize, FeatureId)> = self
            .features
            .iter()
            .flat_map(|f| {
                f.conflicts()
                    .iter()
                    .filter_map(|other| self.index.get(other).map(|&pos| (pos, f.id().clone())))
                    .collect::<Vec<_>>()
            })
            .collect();

        for (pos, id) in edges {
            self.features[pos].add_conflict(id);
        }
    }
}
