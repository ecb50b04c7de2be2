//! djinit Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the djinit
//! Django project scaffolder, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           djinit-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (ScaffoldService, CatalogService)     │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Catalog, Filesystem, Render,   │
//! │          VersionControl)                │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    djinit-adapters (Infrastructure)     │
//! │ (BuiltinCatalog, LocalFilesystem, Git)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (FeatureCatalog, Resolver, Composer)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use djinit_core::domain::{
//!     Feature, FeatureCatalog, FileTree, Fragment, RelativePath, Resolver, TemplateComposer,
//! };
//!
//! let catalog = FeatureCatalog::new(vec![
//!     Feature::builder("drf").build()?,
//!     Feature::builder("api_docs")
//!         .depends_on("drf")
//!         .fragment(Fragment::list_entry(
//!             RelativePath::try_new("requirements.txt")?,
//!             "drf-yasg==1.21.10",
//!         ))
//!         .build()?,
//! ])?;
//!
//! let selection = Resolver::new(&catalog).resolve(["api_docs"])?;
//! assert_eq!(selection.to_string(), "drf, api_docs");
//!
//! let tree = TemplateComposer::new(&catalog).compose(&FileTree::new(), &selection)?;
//! assert_eq!(tree.get("requirements.txt"), Some("drf-yasg==1.21.10\n"));
//! # Ok::<(), djinit_core::domain::DomainError>(())
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CatalogService, FeatureInfo, ScaffoldService, WriteOptions,
        ports::{CatalogStore, Filesystem, TemplateRenderer, VersionControl},
    };
    pub use crate::domain::{
        Feature, FeatureCatalog, FeatureId, FeatureRequest, FileTree, Fragment, MergeStrategy,
        ProjectSpec, RenderContext, ResolvedSelection, Resolver, TemplateComposer,
        VirtualFileTree,
    };
    pub use crate::error::{DjinitError, DjinitResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
