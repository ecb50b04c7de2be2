//! Infrastructure adapters for djinit.
//!
//! This crate implements the ports defined in `djinit-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod catalog_store;
pub mod filesystem;
pub mod renderer;
pub mod vcs;

// Re-export commonly used adapters
pub use catalog_store::{BuiltinCatalog, DirectoryCatalog};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;
pub use vcs::GitCli;
