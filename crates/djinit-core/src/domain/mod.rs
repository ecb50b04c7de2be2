// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for djinit.
//!
//! This module contains the feature resolution and template composition
//! engine. Everything here is pure: no filesystem, no terminal, no
//! process-wide state. I/O lives behind ports in the application layer.
//!
//! ## Pipeline
//!
//! ```text
//! requested ids ──► Resolver ──► ResolvedSelection ──► TemplateComposer ──► VirtualFileTree
//!                      ▲                                      ▲
//!                      └────────── FeatureCatalog ────────────┘
//! ```
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network, or external calls
//! - **Immutable catalog**: built once, passed by reference

pub mod catalog;
pub mod composer;
pub mod entities;
pub mod error;
pub mod resolver;
pub mod selection;

mod validation;

// Re-exports for convenience
pub use catalog::FeatureCatalog;
pub use composer::TemplateComposer;
pub use entities::{
    common::RelativePath,
    feature::{Feature, FeatureBuilder, FeatureId, Fragment, MergeStrategy},
    file_tree::{FileTree, VirtualFileTree},
    project::{ModuleName, ProjectSpec},
    render::{APP_TOKEN, PROJECT_TOKEN, RenderContext, generate_secret_key},
};
pub use error::{DomainError, ErrorCategory};
pub use resolver::{FeatureRequest, ResolvedSelection, Resolver};
pub use selection::{SelectionEvent, SelectionOutcome, SelectionState};
pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Whole-pipeline Tests
    // ========================================================================

    fn path(p: &str) -> RelativePath {
        RelativePath::try_new(p).unwrap()
    }

    fn catalog() -> FeatureCatalog {
        FeatureCatalog::new(vec![
            Feature::builder("drf")
                .name("Django REST Framework")
                .fragment(Fragment::list_entry(path("requirements.txt"), "djangorestframework==3.16.0"))
                .fragment(Fragment::anchor(
                    path("__PROJECT__/settings.py"),
                    "apps",
                    "\"rest_framework\",",
                ))
                .fragment(Fragment::create(
                    path("__APP__/serializers.py"),
                    "# serializers for {{ app_name }}\n",
                ))
                .build()
                .unwrap(),
            Feature::builder("api_docs")
                .depends_on("drf")
                .fragment(Fragment::list_entry(path("requirements.txt"), "drf-yasg==1.21.10"))
                .build()
                .unwrap(),
        ])
        .unwrap()
    }

    fn base() -> FileTree {
        FileTree::new()
            .with_file("requirements.txt", "Django==5.2.6\n")
            .unwrap()
            .with_file(
                "__PROJECT__/settings.py",
                "APPS = [\n    \"{{ app_name }}\",\n    # djinit:begin apps\n    # djinit:end apps\n]\n",
            )
            .unwrap()
    }

    #[test]
    fn resolve_compose_render() {
        let catalog = catalog();
        let selection = Resolver::new(&catalog).resolve(["api_docs"]).unwrap();
        let tree = TemplateComposer::new(&catalog)
            .compose(&base(), &selection)
            .unwrap();
        let rendered = tree.render(&RenderContext::new("shop", "catalog")).unwrap();

        assert_eq!(
            rendered.get("requirements.txt").unwrap(),
            "Django==5.2.6\ndjangorestframework==3.16.0\ndrf-yasg==1.21.10\n"
        );
        assert_eq!(
            rendered.get("shop/settings.py").unwrap(),
            "APPS = [\n    \"catalog\",\n    # djinit:begin apps\n    \"rest_framework\",\n    # djinit:end apps\n]\n"
        );
        assert_eq!(
            rendered.get("catalog/serializers.py").unwrap(),
            "# serializers for catalog\n"
        );
    }

    #[test]
    fn composing_twice_is_byte_identical() {
        let catalog = catalog();
        let selection = Resolver::new(&catalog).resolve(["drf", "api_docs"]).unwrap();
        let composer = TemplateComposer::new(&catalog);

        assert_eq!(
            composer.compose(&base(), &selection).unwrap(),
            composer.compose(&base(), &selection).unwrap()
        );
    }

    #[test]
    fn validator_checks_names_and_ids() {
        assert!(DomainValidator::validate_module_name("mysite").is_ok());
        assert!(DomainValidator::validate_module_name("import").is_err());
        assert!(DomainValidator::validate_feature_id("Bad").is_err());
        assert!(DomainValidator::validate_catalog(&catalog()).is_ok());
    }
}
