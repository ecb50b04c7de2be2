//! Feature catalog stores.
//!
//! [`BuiltinCatalog`] is the default; [`DirectoryCatalog`] reads a user
//! catalog laid out as `catalog.toml` + `base/`.

mod builtin;
mod directory;
pub mod manifest;

pub use builtin::BuiltinCatalog;
pub use directory::{BASE_DIR, DirectoryCatalog, MANIFEST_FILE};
pub use manifest::CatalogManifest;
