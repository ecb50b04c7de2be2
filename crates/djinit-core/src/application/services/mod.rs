//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project" or "preview a selection".

pub mod catalog_service;
pub mod scaffold_service;

pub use catalog_service::{CatalogService, FeatureInfo, ResolutionPreview};
pub use scaffold_service::{ScaffoldPlan, ScaffoldReport, ScaffoldService, WriteOptions};
