//! Dependency closure and conflict checking.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, instrument};

use super::DomainError;
use super::catalog::FeatureCatalog;
use super::entities::FeatureId;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureRequest {
    /// Base project only: the closure of the empty set.
    Minimal,
    /// Every catalog feature. A conflict here is an error, never a silent drop.
    All,
    /// An explicit set of ids, validated during resolution.
    Custom(BTreeSet<String>),
}

impl FeatureRequest {
    pub fn custom<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: BTreeSet<String> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            Self::Minimal
        } else {
            Self::Custom(ids)
        }
    }
}

/// A dependency-closed, conflict-free feature set in catalog order.
///
/// Only the [`Resolver`] creates non-empty selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResolvedSelection {
    ids: Vec<FeatureId>,
}

impl ResolvedSelection {
    /// The minimal selection. Trivially closed and conflict-free.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[FeatureId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureId> {
        self.ids.iter()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|f| f.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_subset_of(&self, other: &ResolvedSelection) -> bool {
        self.ids.iter().all(|id| other.contains(id.as_str()))
    }

    /// Members that were pulled in rather than asked for.
    pub fn added_beyond<'a>(&'a self, requested: &'a BTreeSet<String>) -> impl Iterator<Item = &'a FeatureId> {
        self.ids.iter().filter(|id| !requested.contains(id.as_str()))
    }
}

impl fmt::Display for ResolvedSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ids.is_empty() {
            return f.write_str("(none)");
        }
        let joined: Vec<&str> = self.ids.iter().map(FeatureId::as_str).collect();
        f.write_str(&joined.join(", "))
    }
}

/// Expands requested features into their dependency closure.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a FeatureCatalog,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a FeatureCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve a preset or explicit request.
    pub fn resolve_request(&self, request: &FeatureRequest) -> Result<ResolvedSelection, DomainError> {
        match request {
            FeatureRequest::Minimal => self.resolve(std::iter::empty::<&str>()),
            FeatureRequest::All => self.resolve(self.catalog.ids().map(FeatureId::as_str)),
            FeatureRequest::Custom(ids) => self.resolve(ids),
        }
    }

    /// Resolve an explicit id set.
    ///
    /// All-or-nothing: unknown ids are reported before any other work, then
    /// the closure is computed, then every pair is checked for conflicts.
    #[instrument(skip_all)]
    pub fn resolve<I, S>(&self, requested: I) -> Result<ResolvedSelection, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested: BTreeSet<String> = requested
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let mut frontier = Vec::with_capacity(requested.len());
        for id in &requested {
            let pos = self
                .catalog
                .position(id)
                .ok_or_else(|| DomainError::UnknownFeature { id: id.clone() })?;
            frontier.push(pos);
        }

        let features = self.catalog.list_all();

        // Positions sort in declaration order, so the closure is already canonical.
        let mut closure = BTreeSet::new();
        while let Some(pos) = frontier.pop() {
            if !closure.insert(pos) {
                continue;
            }
            for dep in features[pos].dependencies() {
                if let Some(dep_pos) = self.catalog.position(dep.as_str()) {
                    frontier.push(dep_pos);
                }
            }
        }

        let members: Vec<usize> = closure.into_iter().collect();
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                if features[a].conflicts_with(features[b].id())
                    || features[b].conflicts_with(features[a].id())
                {
                    return Err(DomainError::Conflict {
                        a: features[a].id().to_string(),
                        b: features[b].id().to_string(),
                    });
                }
            }
        }

        let selection = ResolvedSelection {
            ids: members.iter().map(|&pos| features[pos].id().clone()).collect(),
        };
        debug!(
            requested = requested.len(),
            resolved = selection.len(),
            selection = %selection,
            "features resolved"
        );
        Ok(selection)
    }
}
