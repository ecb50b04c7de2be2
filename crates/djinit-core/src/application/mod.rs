//! Application layer for djinit.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, CatalogService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Resolution and composition live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    CatalogService,
    FeatureInfo, // DTO for feature listings
    ResolutionPreview,
    ScaffoldPlan,
    ScaffoldReport,
    ScaffoldService,
    WriteOptions,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CatalogStore, Filesystem, TemplateRenderer, VersionControl};

pub use error::ApplicationError;
