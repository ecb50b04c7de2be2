//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into core calls and print results.
//! No resolution or composition logic lives here.

use djinit_adapters::{BuiltinCatalog, DirectoryCatalog};
use djinit_core::application::ports::CatalogStore;
use tracing::debug;

use crate::config::AppConfig;

pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod new;
pub mod resolve;

/// The catalog named by `catalog.path`, or the built-in one.
pub(crate) fn catalog_store(config: &AppConfig) -> Box<dyn CatalogStore> {
    match &config.catalog.path {
        Some(path) => {
            debug!(path = %path.display(), "using directory catalog");
            Box::new(DirectoryCatalog::new(path))
        }
        None => Box::new(BuiltinCatalog::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn builtin_catalog_by_default() {
        let store = catalog_store(&AppConfig::default());
        assert_eq!(store.source_name(), "built-in catalog");
    }

    #[test]
    fn configured_path_selects_directory_catalog() {
        let mut config = AppConfig::default();
        config.catalog.path = Some(PathBuf::from("/srv/catalog"));
        assert_eq!(catalog_store(&config).source_name(), "/srv/catalog");
    }
}
