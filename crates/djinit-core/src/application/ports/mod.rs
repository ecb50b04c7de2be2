//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `djinit-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `CatalogStore`: Feature catalog + base tree retrieval
//!   - `TemplateRenderer`: Placeholder substitution over the composed tree
//!   - `VersionControl`: Repository initialization
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CatalogStore, Filesystem, TemplateRenderer, VersionControl};

#[cfg(test)]
pub use output::{MockCatalogStore, MockFilesystem, MockTemplateRenderer, MockVersionControl};
