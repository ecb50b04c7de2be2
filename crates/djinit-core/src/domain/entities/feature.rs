//! Features and the fragments they contribute.
//!
//! A [`Feature`] is a named optional capability (e.g. `drf`, `cors`) with
//! declared dependencies, conflicts, and an ordered list of [`Fragment`]s.
//! Each fragment targets one relative path and carries a [`MergeStrategy`]
//! telling the composer how to combine it with what is already there.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::DomainError;
use super::common::RelativePath;

// ── FeatureId ─────────────────────────────────────────────────────────────────

/// Unique feature identifier: `[a-z][a-z0-9_-]*`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FeatureId(String);

impl FeatureId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let invalid = |reason: &str| DomainError::InvalidFeatureId {
            id: id.clone(),
            reason: reason.to_string(),
        };

        let mut chars = id.chars();
        match chars.next() {
            None => return Err(invalid("id is empty")),
            Some(c) if !c.is_ascii_lowercase() => {
                return Err(invalid("must start with a lowercase letter"));
            }
            Some(_) => {}
        }
        if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-') {
            return Err(invalid("only lowercase letters, digits, '_' and '-' are allowed"));
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for FeatureId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Borrow<str> for FeatureId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Fragments ─────────────────────────────────────────────────────────────────

/// How a fragment combines with the file at its target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Supplies the whole file. The path must not exist yet.
    CreateOrReplace,
    /// Appends inside the `djinit:begin <anchor>` / `djinit:end <anchor>` region.
    AnchorInsert { anchor: String },
    /// Adds one line to a sorted, deduplicated list file.
    ListEntry,
}

impl MergeStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateOrReplace => "create-or-replace",
            Self::AnchorInsert { .. } => "anchor-insert",
            Self::ListEntry => "list-entry",
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnchorInsert { anchor } => write!(f, "anchor-insert({anchor})"),
            other => f.write_str(other.name()),
        }
    }
}

/// A single content contribution from a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub path: RelativePath,
    pub strategy: MergeStrategy,
    pub content: String,
}

impl Fragment {
    pub fn create(path: RelativePath, content: impl Into<String>) -> Self {
        Self {
            path,
            strategy: MergeStrategy::CreateOrReplace,
            content: content.into(),
        }
    }

    pub fn anchor(path: RelativePath, anchor: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path,
            strategy: MergeStrategy::AnchorInsert {
                anchor: anchor.into(),
            },
            content: content.into(),
        }
    }

    /// A trailing newline on `entry` is dropped; list files are one entry per line.
    pub fn list_entry(path: RelativePath, entry: impl Into<String>) -> Self {
        let entry = entry.into();
        Self {
            path,
            strategy: MergeStrategy::ListEntry,
            content: entry.trim_end_matches(['\r', '\n']).to_string(),
        }
    }

    /// Structural checks the composer relies on.
    pub(crate) fn validate(&self, feature: &FeatureId) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidFragment {
            feature: feature.to_string(),
            path: self.path.to_string(),
            reason: reason.to_string(),
        };

        match &self.strategy {
            MergeStrategy::CreateOrReplace => Ok(()),
            MergeStrategy::AnchorInsert { anchor } => {
                if anchor.trim().is_empty() || anchor.chars().any(char::is_whitespace) {
                    return Err(invalid("anchor name must be a single non-empty word"));
                }
                if self.content.trim().is_empty() {
                    return Err(invalid("anchor-insert content is empty"));
                }
                Ok(())
            }
            MergeStrategy::ListEntry => {
                if self.content.trim().is_empty() {
                    return Err(invalid("list entry is empty"));
                }
                if self.content.contains('\n') {
                    return Err(invalid("list entry must be a single line"));
                }
                Ok(())
            }
        }
    }
}

// ── Feature ───────────────────────────────────────────────────────────────────

/// A named optional capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    id: FeatureId,
    name: String,
    description: String,
    dependencies: BTreeSet<FeatureId>,
    conflicts: BTreeSet<FeatureId>,
    fragments: Vec<Fragment>,
}

impl Feature {
    pub fn builder(id: impl Into<String>) -> FeatureBuilder {
        FeatureBuilder::new(id)
    }

    pub fn id(&self) -> &FeatureId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn dependencies(&self) -> &BTreeSet<FeatureId> {
        &self.dependencies
    }

    pub fn conflicts(&self) -> &BTreeSet<FeatureId> {
        &self.conflicts
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn conflicts_with(&self, other: &FeatureId) -> bool {
        self.conflicts.contains(other)
    }

    /// Used by the catalog to make the conflict relation symmetric.
    pub(crate) fn add_conflict(&mut self, other: FeatureId) {
        self.conflicts.insert(other);
    }
}

/// Builder for [`Feature`]. Ids are parsed in [`FeatureBuilder::build`] so
/// every error surfaces in one place.
#[derive(Debug, Default)]
pub struct FeatureBuilder {
    id: String,
    name: Option<String>,
    description: String,
    dependencies: Vec<String>,
    conflicts: Vec<String>,
    fragments: Vec<Fragment>,
}

impl FeatureBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn depends_on(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    pub fn conflicts_with(mut self, id: impl Into<String>) -> Self {
        self.conflicts.push(id.into());
        self
    }

    pub fn fragment(mut self, fragment: Fragment) -> Self {
        self.fragments.push(fragment);
        self
    }

    pub fn fragments(mut self, fragments: impl IntoIterator<Item = Fragment>) -> Self {
        self.fragments.extend(fragments);
        self
    }

    pub fn build(self) -> Result<Feature, DomainError> {
        let id = FeatureId::new(self.id)?;

        let dependencies = self
            .dependencies
            .into_iter()
            .map(FeatureId::new)
            .collect::<Result<BTreeSet<_>, _>>()?;
        let conflicts = self
            .conflicts
            .into_iter()
            .map(FeatureId::new)
            .collect::<Result<BTreeSet<_>, _>>()?;

        if conflicts.contains(&id) {
            return Err(DomainError::SelfConflict {
                feature: id.to_string(),
            });
        }

        for fragment in &self.fragments {
            fragment.validate(&id)?;
        }

        Ok(Feature {
            name: self.name.unwrap_or_else(|| id.to_string()),
            id,
            description: self.description,
            dependencies,
            conflicts,
            fragments: self.fragments,
        })
    }
}
