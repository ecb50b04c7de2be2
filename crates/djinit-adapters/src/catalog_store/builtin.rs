//! The catalog that ships inside the binary.
//!
//! `catalog/features.toml` and every file under `catalog/base/` are embedded
//! at compile time, so a fresh install works without any files on disk.

use djinit_core::{
    application::ports::CatalogStore,
    domain::{FeatureCatalog, FileTree, RelativePath},
    error::DjinitResult,
};
use tracing::{debug, instrument};

use super::manifest::CatalogManifest;

const SOURCE_NAME: &str = "built-in catalog";

const FEATURES_TOML: &str = include_str!("../../catalog/features.toml");

/// The Django 5 skeleton every project starts from.
const BASE_FILES: &[(&str, &str)] = &[
    (".env.sample", include_str!("../../catalog/base/.env.sample")),
    (".gitignore", include_str!("../../catalog/base/.gitignore")),
    ("README.md", include_str!("../../catalog/base/README.md")),
    ("__APP__/__init__.py", include_str!("../../catalog/base/__APP__/__init__.py")),
    ("__APP__/admin.py", include_str!("../../catalog/base/__APP__/admin.py")),
    ("__APP__/apps.py", include_str!("../../catalog/base/__APP__/apps.py")),
    (
        "__APP__/migrations/__init__.py",
        include_str!("../../catalog/base/__APP__/migrations/__init__.py"),
    ),
    ("__APP__/models.py", include_str!("../../catalog/base/__APP__/models.py")),
    ("__APP__/tests.py", include_str!("../../catalog/base/__APP__/tests.py")),
    ("__APP__/urls.py", include_str!("../../catalog/base/__APP__/urls.py")),
    ("__APP__/views.py", include_str!("../../catalog/base/__APP__/views.py")),
    ("__PROJECT__/__init__.py", include_str!("../../catalog/base/__PROJECT__/__init__.py")),
    ("__PROJECT__/asgi.py", include_str!("../../catalog/base/__PROJECT__/asgi.py")),
    (
        "__PROJECT__/settings/__init__.py",
        include_str!("../../catalog/base/__PROJECT__/settings/__init__.py"),
    ),
    (
        "__PROJECT__/settings/base.py",
        include_str!("../../catalog/base/__PROJECT__/settings/base.py"),
    ),
    (
        "__PROJECT__/settings/development.py",
        include_str!("../../catalog/base/__PROJECT__/settings/development.py"),
    ),
    (
        "__PROJECT__/settings/production.py",
        include_str!("../../catalog/base/__PROJECT__/settings/production.py"),
    ),
    ("__PROJECT__/urls.py", include_str!("../../catalog/base/__PROJECT__/urls.py")),
    ("__PROJECT__/wsgi.py", include_str!("../../catalog/base/__PROJECT__/wsgi.py")),
    ("manage.py", include_str!("../../catalog/base/manage.py")),
    ("requirements.txt", include_str!("../../catalog/base/requirements.txt")),
];

/// Catalog store backed by compile-time embedded files.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self
    }
}

impl CatalogStore for BuiltinCatalog {
    fn source_name(&self) -> String {
        SOURCE_NAME.to_string()
    }

    #[instrument(skip(self))]
    fn catalog(&self) -> DjinitResult<FeatureCatalog> {
        let features = CatalogManifest::parse(FEATURES_TOML, SOURCE_NAME)?
            .into_features(SOURCE_NAME, |path| {
                Err(format!("the built-in catalog has no fragment file {path}"))
            })?;
        let catalog = FeatureCatalog::new(features)?;
        debug!(features = catalog.len(), "built-in catalog loaded");
        Ok(catalog)
    }

    fn base_tree(&self) -> DjinitResult<FileTree> {
        let mut tree = FileTree::new();
        for (path, content) in BASE_FILES {
            tree.insert(RelativePath::try_new(path)?, *content);
        }
        Ok(tree)
    }
}
