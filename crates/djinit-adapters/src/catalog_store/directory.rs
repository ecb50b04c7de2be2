//! Catalog loaded from a user directory.
//!
//! # Directory layout expected
//!
//! ```text
//! my-catalog/
//! ├── catalog.toml          ← manifest (required)
//! ├── base/                 ← skeleton copied into every project (required)
//! │   ├── manage.py
//! │   └── __PROJECT__/
//! │       └── settings.py
//! └── fragments/            ← optional bodies referenced by `source = "..."`
//!     └── drf_settings.py
//! ```
//!
//! The manifest format is described in [`super::manifest`].

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use djinit_core::{
    application::{ApplicationError, ports::CatalogStore},
    domain::{FeatureCatalog, FileTree, RelativePath},
    error::DjinitResult,
};

use super::manifest::CatalogManifest;

pub const MANIFEST_FILE: &str = "catalog.toml";
pub const BASE_DIR: &str = "base";

/// Catalog store reading `catalog.toml` and `base/` from disk on every call.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    root: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load_error(&self, reason: impl Into<String>) -> ApplicationError {
        ApplicationError::CatalogLoad {
            source_name: self.source_name(),
            reason: reason.into(),
        }
    }
}

impl CatalogStore for DirectoryCatalog {
    fn source_name(&self) -> String {
        self.root.display().to_string()
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn catalog(&self) -> DjinitResult<FeatureCatalog> {
        let manifest_path = self.root.join(MANIFEST_FILE);
        let text = fs::read_to_string(&manifest_path)
            .map_err(|e| self.load_error(format!("cannot read {}: {e}", manifest_path.display())))?;

        let source_name = self.source_name();
        let features = CatalogManifest::parse(&text, &source_name)?.into_features(&source_name, |source| {
            fs::read_to_string(self.root.join(source.as_path())).map_err(|e| e.to_string())
        })?;

        let catalog = FeatureCatalog::new(features)?;
        debug!(features = catalog.len(), "directory catalog loaded");
        Ok(catalog)
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn base_tree(&self) -> DjinitResult<FileTree> {
        let base_dir = self.root.join(BASE_DIR);
        if !base_dir.is_dir() {
            return Err(self
                .load_error(format!("missing base directory {}", base_dir.display()))
                .into());
        }

        let mut tree = FileTree::new();
        for walk_entry in WalkDir::new(&base_dir).min_depth(1).sort_by_file_name() {
            let walk_entry = walk_entry.map_err(|e| self.load_error(format!("directory walk error: {e}")))?;
            if !walk_entry.file_type().is_file() {
                continue;
            }

            let abs_path = walk_entry.path();
            let relative = abs_path.strip_prefix(&base_dir).map_err(|_| {
                self.load_error(format!(
                    "failed to relativise '{}' against '{}'",
                    abs_path.display(),
                    base_dir.display()
                ))
            })?;
            let path = RelativePath::try_new(relative.to_string_lossy())?;
            let content = fs::read_to_string(abs_path)
                .map_err(|e| self.load_error(format!("failed to read '{path}': {e}")))?;

            tree.insert(path, content);
        }

        debug!(files = tree.len(), "base tree loaded");
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use djinit_core::error::DjinitError;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn sample() -> TempDir {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            MANIFEST_FILE,
            r##"
            [[features]]
            id = "drf"
            [[features.fragments]]
            path = "requirements.txt"
            strategy = "list-entry"
            content = "djangorestframework==3.16.0"
            [[features.fragments]]
            path = "__PROJECT__/settings.py"
            strategy = "anchor-insert"
            anchor = "apps"
            source = "fragments/drf_apps.py"
            "##,
        );
        write(temp.path(), "fragments/drf_apps.py", "\"rest_framework\",\n");
        write(temp.path(), "base/requirements.txt", "Django==5.2.6\n");
        write(
            temp.path(),
            "base/__PROJECT__/settings.py",
            "APPS = [\n    # djinit:begin apps\n    # djinit:end apps\n]\n",
        );
        temp
    }

    #[test]
    fn loads_manifest_and_sources() {
        let temp = sample();
        let catalog = DirectoryCatalog::new(temp.path()).catalog().unwrap();

        let drf = catalog.lookup("drf").unwrap();
        assert_eq!(drf.fragments().len(), 2);
        assert_eq!(drf.fragments()[1].content, "\"rest_framework\",\n");
    }

    #[test]
    fn walks_base_directory() {
        let temp = sample();
        let base = DirectoryCatalog::new(temp.path()).base_tree().unwrap();

        assert_eq!(base.len(), 2);
        assert_eq!(base.get("requirements.txt"), Some("Django==5.2.6\n"));
        assert!(base.get("__PROJECT__/settings.py").is_some());
    }

    #[test]
    fn missing_manifest_is_a_load_error() {
        let temp = TempDir::new().unwrap();
        let err = DirectoryCatalog::new(temp.path()).catalog().unwrap_err();
        assert!(matches!(
            err,
            DjinitError::Application(ApplicationError::CatalogLoad { .. })
        ));
    }

    #[test]
    fn missing_base_is_a_load_error() {
        let temp = TempDir::new().unwrap();
        let err = DirectoryCatalog::new(temp.path()).base_tree().unwrap_err();
        assert!(err.to_string().contains("missing base directory"));
    }

    #[test]
    fn missing_fragment_source_is_a_load_error() {
        let temp = sample();
        fs::remove_file(temp.path().join("fragments/drf_apps.py")).unwrap();

        let err = DirectoryCatalog::new(temp.path()).catalog().unwrap_err();
        assert!(err.to_string().contains("fragments/drf_apps.py"));
    }

    #[test]
    fn catalog_validation_errors_surface() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            MANIFEST_FILE,
            r##"
            [[features]]
            id = "a"
            dependencies = ["b"]
            [[features]]
            id = "b"
            dependencies = ["a"]
            "##,
        );

        let err = DirectoryCatalog::new(temp.path()).catalog().unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }
}
