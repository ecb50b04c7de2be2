//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `djinit-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{FeatureCatalog, FileTree, RenderContext, VirtualFileTree};
use crate::error::DjinitResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `djinit_adapters::filesystem::LocalFilesystem` (production)
/// - `djinit_adapters::filesystem::MemoryFilesystem` (testing, dry runs)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> DjinitResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> DjinitResult<()>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> DjinitResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> DjinitResult<()>;
}

/// Port for the feature catalog and the base skeleton it composes onto.
///
/// Implemented by:
/// - `djinit_adapters::catalog_store::BuiltinCatalog` (embedded in the binary)
/// - `djinit_adapters::catalog_store::DirectoryCatalog` (user directory)
#[cfg_attr(test, mockall::automock)]
pub trait CatalogStore: Send + Sync {
    /// Human-readable origin, used in logs and error messages.
    fn source_name(&self) -> String;

    /// Load and validate the feature catalog.
    fn catalog(&self) -> DjinitResult<FeatureCatalog>;

    /// Load the unconditional base tree.
    fn base_tree(&self) -> DjinitResult<FileTree>;
}

/// Port for rendering the composed tree.
///
/// Implemented by:
/// - `djinit_adapters::renderer::SimpleRenderer` (variable substitution)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Substitute placeholders in paths and contents.
    fn render(&self, tree: &VirtualFileTree, context: &RenderContext)
    -> DjinitResult<VirtualFileTree>;
}

/// Port for initializing version control in a freshly written project.
///
/// Implemented by:
/// - `djinit_adapters::vcs::GitCli` (shells out to `git init`)
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl: Send + Sync {
    fn init(&self, root: &Path) -> DjinitResult<()>;
}
