//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Resolve the requested features against the catalog
//! 2. Compose the base tree with the resolved features' fragments
//! 3. Render placeholders
//! 4. Write to filesystem (with rollback), then optionally `git init`
//!
//! Steps 1-3 finish completely before anything touches the disk.

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CatalogStore, Filesystem, TemplateRenderer, VersionControl},
    },
    domain::{
        FeatureCatalog, FeatureRequest, FileTree, ProjectSpec, RenderContext, ResolvedSelection,
        Resolver, TemplateComposer, VirtualFileTree,
    },
    error::DjinitResult,
};

/// A fully rendered project, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    pub root: PathBuf,
    pub tree: VirtualFileTree,
}

/// Outcome of a successful scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub files_written: usize,
    pub git_initialized: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Replace an existing project directory instead of failing.
    pub force: bool,
}

/// Main scaffolding service.
///
/// Owns the catalog and base tree (loaded once) plus the driven adapters.
pub struct ScaffoldService {
    catalog: FeatureCatalog,
    base: FileTree,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    vcs: Box<dyn VersionControl>,
}

impl ScaffoldService {
    /// Create a scaffold service, loading catalog and base tree from `store`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use djinit_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     &store,     // impl CatalogStore
    ///     renderer,   // impl TemplateRenderer
    ///     filesystem, // impl Filesystem
    ///     vcs,        // impl VersionControl
    /// )?;
    /// ```
    #[instrument(skip_all, fields(source = %store.source_name()))]
    pub fn new(
        store: &dyn CatalogStore,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        vcs: Box<dyn VersionControl>,
    ) -> DjinitResult<Self> {
        let catalog = store.catalog()?;
        let base = store.base_tree()?;
        info!(
            features = catalog.len(),
            base_files = base.len(),
            "catalog loaded"
        );
        Ok(Self::from_parts(catalog, base, renderer, filesystem, vcs))
    }

    /// Create a scaffold service from an already loaded catalog.
    pub fn from_parts(
        catalog: FeatureCatalog,
        base: FileTree,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        vcs: Box<dyn VersionControl>,
    ) -> Self {
        Self {
            catalog,
            base,
            renderer,
            filesystem,
            vcs,
        }
    }

    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    /// Resolve a request against the owned catalog.
    pub fn resolve(&self, request: &FeatureRequest) -> DjinitResult<ResolvedSelection> {
        Ok(Resolver::new(&self.catalog).resolve_request(request)?)
    }

    /// Compose and render a project without writing it.
    #[instrument(skip_all, fields(project = %spec.project_name(), features = %spec.selection()))]
    pub fn plan(
        &self,
        spec: &ProjectSpec,
        context: &RenderContext,
        output_dir: &Path,
    ) -> DjinitResult<ScaffoldPlan> {
        let composed = TemplateComposer::new(&self.catalog).compose(&self.base, spec.selection())?;
        let tree = self.renderer.render(&composed, context)?;

        Ok(ScaffoldPlan {
            root: output_dir.join(spec.project_name()),
            tree,
        })
    }

    /// Scaffold a new project.
    ///
    /// This is the main use case: plan, write everything or nothing, then
    /// initialize version control if the project asks for it. A version control
    /// failure is logged and reported, not rolled back.
    #[instrument(
        skip_all,
        fields(
            project = %spec.project_name(),
            output_dir = %output_dir.display()
        )
    )]
    pub fn scaffold(
        &self,
        spec: &ProjectSpec,
        context: &RenderContext,
        output_dir: &Path,
        options: WriteOptions,
    ) -> DjinitResult<ScaffoldReport> {
        info!(features = %spec.selection(), "Scaffolding Django project");

        let plan = self.plan(spec, context, output_dir)?;
        self.write_plan(&plan, options)?;

        let git_initialized = spec.init_git() && self.init_vcs(&plan.root);

        info!("Scaffold completed successfully");
        Ok(ScaffoldReport {
            files_written: plan.tree.len(),
            root: plan.root,
            git_initialized,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Write the plan to the filesystem with rollback on failure.
    fn write_plan(&self, plan: &ScaffoldPlan, options: WriteOptions) -> DjinitResult<()> {
        if self.filesystem.exists(&plan.root) {
            if !options.force {
                return Err(ApplicationError::ProjectExists {
                    path: plan.root.clone(),
                }
                .into());
            }
            warn!(path = %plan.root.display(), "Replacing existing project directory");
            self.filesystem.remove_dir_all(&plan.root)?;
        }

        match self.write_all(plan) {
            Ok(()) => {
                info!(files = plan.tree.len(), "Successfully wrote all files");
                Ok(())
            }
            Err(e) => {
                warn!("Write failed, attempting rollback");
                self.rollback(&plan.root);
                Err(e)
            }
        }
    }

    fn write_all(&self, plan: &ScaffoldPlan) -> DjinitResult<()> {
        self.filesystem.create_dir_all(&plan.root)?;

        for (relative, content) in plan.tree.iter() {
            let path = plan.root.join(relative.as_path());

            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }

            self.filesystem.write_file(&path, content)?;

            if content.starts_with("#!") {
                self.filesystem.set_permissions(&path, true)?;
            }
        }

        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }

    fn init_vcs(&self, root: &Path) -> bool {
        match self.vcs.init(root) {
            Ok(()) => {
                info!(path = %root.display(), "Initialized git repository");
                true
            }
            Err(e) => {
                warn!(error = %e, "Version control initialization failed");
                false
            }
        }
    }
}
