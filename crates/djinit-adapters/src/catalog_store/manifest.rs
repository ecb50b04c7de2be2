//! `catalog.toml` / `features.toml` manifest format.
//!
//! ```toml
//! [[features]]
//! id           = "api_docs"            # unique, [a-z][a-z0-9_-]*
//! name         = "Swagger docs"        # optional; defaults to id
//! description  = "drf-yasg pages"      # optional
//! dependencies = ["drf"]               # optional
//! conflicts    = ["spectacular"]       # optional
//!
//! [[features.fragments]]
//! path     = "requirements.txt"
//! strategy = "list-entry"              # create | anchor-insert | list-entry
//! content  = "drf-yasg==1.21.10"
//!
//! [[features.fragments]]
//! path     = "__PROJECT__/settings/base.py"
//! strategy = "anchor-insert"
//! anchor   = "third-party-apps"        # required for anchor-insert only
//! source   = "fragments/yasg_apps.py"  # file body instead of inline content
//! ```
//!
//! Each fragment carries exactly one of `content` or `source`.

use serde::Deserialize;

use djinit_core::{
    application::ApplicationError,
    domain::{Feature, Fragment, RelativePath},
    error::DjinitResult,
};

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialized manifest file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogManifest {
    #[serde(default)]
    pub features: Vec<FeatureEntry>,
}

/// One `[[features]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureEntry {
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub conflicts: Vec<String>,
    #[serde(default)]
    pub fragments: Vec<FragmentEntry>,
}

/// One `[[features.fragments]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FragmentEntry {
    pub path: String,
    pub strategy: StrategyName,
    pub anchor: Option<String>,
    pub content: Option<String>,
    /// Path of a file holding the fragment body, relative to the catalog root.
    pub source: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyName {
    Create,
    AnchorInsert,
    ListEntry,
}

// ── Conversion ────────────────────────────────────────────────────────────────

impl CatalogManifest {
    /// Parse manifest text. `source_name` only feeds error messages.
    pub fn parse(text: &str, source_name: &str) -> DjinitResult<Self> {
        toml::from_str(text).map_err(|e| {
            ApplicationError::CatalogLoad {
                source_name: source_name.to_string(),
                reason: format!("invalid manifest: {e}"),
            }
            .into()
        })
    }

    /// Build domain features in declaration order.
    ///
    /// `read_source` resolves a fragment's `source` to its text.
    pub fn into_features<F>(self, source_name: &str, mut read_source: F) -> DjinitResult<Vec<Feature>>
    where
        F: FnMut(&RelativePath) -> Result<String, String>,
    {
        let load_error = |reason: String| ApplicationError::CatalogLoad {
            source_name: source_name.to_string(),
            reason,
        };

        let mut features = Vec::with_capacity(self.features.len());
        for entry in self.features {
            let mut fragments = Vec::with_capacity(entry.fragments.len());
            for (index, raw) in entry.fragments.into_iter().enumerate() {
                let context = format!("feature '{}' fragment #{}", entry.id, index + 1);
                let body = match (raw.content, raw.source) {
                    (Some(content), None) => content,
                    (None, Some(source)) => {
                        let source = RelativePath::try_new(&source)?;
                        read_source(&source)
                            .map_err(|e| load_error(format!("{context}: cannot read {source}: {e}")))?
                    }
                    (Some(_), Some(_)) => {
                        return Err(load_error(format!("{context}: set either content or source, not both")).into());
                    }
                    (None, None) => {
                        return Err(load_error(format!("{context}: missing content or source")).into());
                    }
                };

                let path = RelativePath::try_new(&raw.path)?;
                let fragment = match (raw.strategy, raw.anchor) {
                    (StrategyName::AnchorInsert, Some(anchor)) => Fragment::anchor(path, anchor, body),
                    (StrategyName::AnchorInsert, None) => {
                        return Err(load_error(format!("{context}: anchor-insert requires an anchor")).into());
                    }
                    (_, Some(_)) => {
                        return Err(load_error(format!("{context}: anchor is only valid with anchor-insert")).into());
                    }
                    (StrategyName::Create, None) => Fragment::create(path, body),
                    (StrategyName::ListEntry, None) => Fragment::list_entry(path, body),
                };
                fragments.push(fragment);
            }

            let mut builder = Feature::builder(entry.id.as_str())
                .description(entry.description)
                .fragments(fragments);
            if let Some(name) = entry.name {
                builder = builder.name(name);
            }
            for dependency in entry.dependencies {
                builder = builder.depends_on(dependency);
            }
            for conflict in entry.conflicts {
                builder = builder.conflicts_with(conflict);
            }

            features.push(builder.build()?);
        }

        Ok(features)
    }
}
