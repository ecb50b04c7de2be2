//! Catalog Service - feature listing and resolution previews.
//!
//! Separated from ScaffoldService for single responsibility: nothing here
//! composes or writes files.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
    domain::{Feature, FeatureCatalog, FeatureId, FeatureRequest, Resolver},
    error::DjinitResult,
};

/// Information about a feature for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub dependencies: Vec<String>,
    pub conflicts: Vec<String>,
    pub required_by: Vec<String>,
    /// Distinct target paths this feature touches.
    pub files: Vec<String>,
}

/// What a request resolves to, and what came along with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionPreview {
    pub requested: Vec<String>,
    pub resolved: Vec<String>,
    pub auto_included: Vec<String>,
}

/// Read-only queries over a catalog.
pub struct CatalogService<'a> {
    catalog: &'a FeatureCatalog,
}

impl<'a> CatalogService<'a> {
    pub fn new(catalog: &'a FeatureCatalog) -> Self {
        Self { catalog }
    }

    /// All features in declaration order.
    pub fn list(&self) -> Vec<FeatureInfo> {
        self.catalog
            .list_all()
            .iter()
            .map(|f| self.info(f))
            .collect()
    }

    /// A single feature.
    pub fn describe(&self, id: &str) -> DjinitResult<FeatureInfo> {
        Ok(self.info(self.catalog.lookup(id)?))
    }

    /// Resolve without composing.
    pub fn preview(&self, request: &FeatureRequest) -> DjinitResult<ResolutionPreview> {
        let selection = Resolver::new(self.catalog).resolve_request(request)?;

        let requested: BTreeSet<String> = match request {
            FeatureRequest::Minimal => BTreeSet::new(),
            FeatureRequest::All => self.catalog.ids().map(ToString::to_string).collect(),
            FeatureRequest::Custom(ids) => ids.clone(),
        };

        Ok(ResolutionPreview {
            auto_included: selection
                .added_beyond(&requested)
                .map(ToString::to_string)
                .collect(),
            resolved: selection.iter().map(ToString::to_string).collect(),
            requested: requested.into_iter().collect(),
        })
    }

    fn info(&self, feature: &Feature) -> FeatureInfo {
        let mut files: Vec<String> = Vec::new();
        for fragment in feature.fragments() {
            let path = fragment.path.to_string();
            if !files.contains(&path) {
                files.push(path);
            }
        }

        FeatureInfo {
            id: feature.id().to_string(),
            name: feature.name().to_string(),
            description: feature.description().to_string(),
            dependencies: to_strings(feature.dependencies()),
            conflicts: to_strings(feature.conflicts()),
            required_by: self
                .catalog
                .dependents_of(feature.id().as_str())
                .into_iter()
                .map(ToString::to_string)
                .collect(),
            files,
        }
    }
}

fn to_strings(ids: &BTreeSet<FeatureId>) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}
